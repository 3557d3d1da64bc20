//! GitHub raw-content advisory source

use serde_json::Value;
use tracing::{debug, warn};

use crate::advisory::error::SourceError;
use crate::advisory::source::{AdvisorySource, RawAdvisoryDb, SourceKind, decode_insecure_db};
use crate::config::GitHubSourceConfig;

/// Advisory source backed by the safety-db repository on GitHub.
///
/// Fetches `data/insecure.json` from raw repository content for the
/// configured org, repo and branch. Any transport failure or non-success
/// status aborts the load; there is no retry and no cached fallback.
pub struct GitHubAdvisorySource {
    client: reqwest::Client,
    base_url: String,
    org: String,
    repo: String,
    branch: String,
}

impl GitHubAdvisorySource {
    pub fn new(config: &GitHubSourceConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("safety-db-filter")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.clone(),
            org: config.org.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
        }
    }

    fn insecure_db_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/data/insecure.json",
            self.base_url, self.org, self.repo, self.branch
        )
    }
}

impl Default for GitHubAdvisorySource {
    fn default() -> Self {
        Self::new(&GitHubSourceConfig::default())
    }
}

#[async_trait::async_trait]
impl AdvisorySource for GitHubAdvisorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::GitHub
    }

    async fn fetch(&self) -> Result<RawAdvisoryDb, SourceError> {
        let url = self.insecure_db_url();
        debug!("Fetching safety db from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Safety db endpoint returned status {}: {}", status, url);
            return Err(SourceError::Status { status, url });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;

        decode_insecure_db(value)
    }
}
