//! The release filter plugin tying an advisory source to the match table

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::advisory::error::SourceError;
use crate::advisory::source::AdvisorySource;
use crate::advisory::sources::build_source;
use crate::advisory::table::AdvisoryTable;
use crate::config::FilterConfig;

/// Release filter backed by the pyup.io safety-db dataset.
///
/// The filter is created empty and must be initialized before it removes
/// anything. Initialization fetches the advisory database once and builds
/// the match table; until that succeeds, every query reports no match and
/// release sets pass through untouched.
pub struct SafetyDbReleaseFilter {
    source: Arc<dyn AdvisorySource>,
    table: Option<AdvisoryTable>,
}

impl SafetyDbReleaseFilter {
    /// Identifier under which the filter registers with a mirror pipeline
    pub const NAME: &'static str = "safety_db_release";

    /// Creates a filter using the source selected by `config`
    pub fn new(config: &FilterConfig) -> Self {
        Self::with_source(build_source(config))
    }

    /// Creates a filter reading from an explicit advisory source
    pub fn with_source(source: Arc<dyn AdvisorySource>) -> Self {
        Self {
            source,
            table: None,
        }
    }

    /// Fetches the advisory database and builds the match table.
    ///
    /// Calling this again after a successful load is a no-op, so repeated
    /// initialization (one call per mirrored package is common) costs a
    /// single fetch. A load that produced an empty table does not count as
    /// successful and is retried on the next call. Fetch or decode failures
    /// are propagated to the caller; a mirror run must not proceed with a
    /// partial advisory table.
    pub async fn initialize(&mut self) -> Result<(), SourceError> {
        if self.table.as_ref().is_some_and(|table| !table.is_empty()) {
            debug!("Safety db already loaded, skipping fetch");
            return Ok(());
        }

        let raw = self.source.fetch().await?;
        let table = AdvisoryTable::from_raw(raw);
        info!(
            "Loaded safety db from {} source: {} packages, {} specifiers",
            self.source.kind().as_str(),
            table.len(),
            table.spec_count()
        );
        self.table = Some(table);
        Ok(())
    }

    /// Discards the loaded table so the next [`initialize`] fetches again
    ///
    /// [`initialize`]: Self::initialize
    pub fn reset(&mut self) {
        self.table = None;
    }

    /// Returns the loaded advisory table, if any
    pub fn table(&self) -> Option<&AdvisoryTable> {
        self.table.as_ref()
    }

    /// Whether the release `name`/`version` is listed as insecure
    pub fn matches(&self, name: &str, version: &str) -> bool {
        self.table
            .as_ref()
            .is_some_and(|table| table.matches(name, version))
    }

    /// Removes every insecure release of `name` from `releases` in place,
    /// returning the number removed. Without a loaded table the release set
    /// is left untouched.
    pub fn filter_releases<V>(&self, name: &str, releases: &mut IndexMap<String, V>) -> usize {
        let Some(table) = self.table.as_ref() else {
            warn!(
                "Safety db not loaded, leaving releases of {} untouched",
                name
            );
            return 0;
        };
        table.filter_releases(name, releases)
    }
}
