//! Advisory data source abstraction

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::advisory::error::SourceError;

/// Raw advisory mapping as decoded from a data source: package name to the
/// list of raw version-specifier strings, before any specifier parsing.
pub type RawAdvisoryDb = HashMap<String, Vec<String>>;

/// Which advisory source variant the plugin loads from.
///
/// Selection happens by configuration value (`FilterConfig::source`), never
/// by source subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The official safety-db repository on GitHub
    #[default]
    GitHub,
    /// A local copy of the dataset on disk
    Local,
}

impl SourceKind {
    /// Returns the string representation of the source kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GitHub => "github",
            SourceKind::Local => "local",
        }
    }
}

/// Trait for obtaining the raw advisory mapping from a data source
///
/// # Returns
/// * `Ok(RawAdvisoryDb)` - The decoded mapping; specifier strings pass
///   through unvalidated to the parsing stage
/// * `Err(SourceError)` - If the source is unreachable or its payload is not
///   advisory-shaped JSON; fatal to plugin initialization
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Returns the source variant this implementation handles
    fn kind(&self) -> SourceKind;

    /// Fetches and decodes the raw advisory mapping
    async fn fetch(&self) -> Result<RawAdvisoryDb, SourceError>;
}

/// Decode a JSON document into the raw advisory mapping.
///
/// Decoding is lenient at entry granularity: the published dataset carries a
/// `$meta` key whose value is an object, and individual array items are not
/// guaranteed to be strings. Any key whose value is not an array, and any
/// non-string item, is skipped with a warning; only a non-object top level
/// fails the load.
pub(crate) fn decode_insecure_db(value: Value) -> Result<RawAdvisoryDb, SourceError> {
    let Value::Object(map) = value else {
        return Err(SourceError::InvalidData(
            "expected a JSON object mapping package names to specifier lists".to_string(),
        ));
    };

    let mut db = RawAdvisoryDb::new();
    for (package, entry) in map {
        let Value::Array(items) = entry else {
            warn!("Ignoring advisory entry for {}: value is not an array", package);
            continue;
        };

        let mut specifiers = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(spec) => specifiers.push(spec),
                other => {
                    warn!("Ignoring non-string specifier for {}: {}", package, other);
                }
            }
        }
        db.insert(package, specifiers);
    }

    Ok(db)
}
