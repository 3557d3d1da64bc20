//! Concrete advisory source implementations

use std::sync::Arc;

use crate::advisory::source::{AdvisorySource, SourceKind};
use crate::config::FilterConfig;

pub mod github;
pub mod local;

pub use github::GitHubAdvisorySource;
pub use local::LocalAdvisorySource;

/// Build the advisory source selected by configuration.
///
/// Selection is by configuration value; every variant implements the same
/// [`AdvisorySource`] trait.
pub fn build_source(config: &FilterConfig) -> Arc<dyn AdvisorySource> {
    match config.source {
        SourceKind::GitHub => Arc::new(GitHubAdvisorySource::new(&config.github)),
        SourceKind::Local => Arc::new(LocalAdvisorySource::new(config.local.path.clone())),
    }
}
