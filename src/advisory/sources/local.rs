//! Local data-file advisory source

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::advisory::error::SourceError;
use crate::advisory::source::{AdvisorySource, RawAdvisoryDb, SourceKind, decode_insecure_db};

/// Advisory source backed by a safety-db data file on disk.
///
/// Covers deployments that vendor the dataset instead of fetching it, the
/// same JSON shape the GitHub source serves. Read or decode failure aborts
/// the load.
pub struct LocalAdvisorySource {
    path: PathBuf,
}

impl LocalAdvisorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl AdvisorySource for LocalAdvisorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    async fn fetch(&self) -> Result<RawAdvisoryDb, SourceError> {
        debug!("Reading safety db from {:?}", self.path);

        let body = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&body)?;

        decode_insecure_db(value)
    }
}
