use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or decoding the advisory dataset.
///
/// All of these are fatal to plugin initialization; there is no partial or
/// cached fallback.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Advisory endpoint returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to read advisory data from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid advisory JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid advisory data: {0}")]
    InvalidData(String),
}

/// A version specifier that could not be turned into a usable range.
///
/// Recovered locally while building the advisory table: the entry is dropped,
/// the drop is logged at the call site, and loading continues.
#[derive(Debug, Error)]
pub enum SpecParseError {
    #[error("Empty specifier")]
    Empty,

    #[error("Invalid requirement `{requirement}`: {reason}")]
    InvalidRequirement { requirement: String, reason: String },

    #[error("Requirement `{requirement}` carries no version constraints")]
    MissingSpecifiers { requirement: String },
}
