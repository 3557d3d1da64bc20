use serde::Deserialize;
use std::path::PathBuf;

use crate::advisory::source::SourceKind;

// =============================================================================
// Default advisory database location
// =============================================================================

/// GitHub organization hosting the safety-db dataset
pub const DEFAULT_GIT_ORG: &str = "pyupio";

/// Repository name of the safety-db dataset
pub const DEFAULT_GIT_REPO: &str = "safety-db";

/// Branch to fetch the dataset from
pub const DEFAULT_GIT_BRANCH: &str = "master";

/// Base URL for raw GitHub content
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Default path for a local copy of the insecure database
pub const DEFAULT_LOCAL_DB_PATH: &str = "insecure.json";

/// Filter configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Which advisory source to load the database from
    pub source: SourceKind,
    pub github: GitHubSourceConfig,
    pub local: LocalSourceConfig,
}

/// Configuration for the GitHub-hosted advisory source
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubSourceConfig {
    pub base_url: String,
    pub org: String,
    pub repo: String,
    pub branch: String,
}

impl Default for GitHubSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            org: DEFAULT_GIT_ORG.to_string(),
            repo: DEFAULT_GIT_REPO.to_string(),
            branch: DEFAULT_GIT_BRANCH.to_string(),
        }
    }
}

/// Configuration for a local advisory database file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalSourceConfig {
    pub path: PathBuf,
}

impl Default for LocalSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOCAL_DB_PATH),
        }
    }
}
