//! Filter insecure PyPI releases out of a package mirror.
//!
//! The crate loads the [pyup.io safety-db] dataset, a JSON mapping of
//! package names to PEP 440 version ranges with known vulnerabilities, and
//! removes every release falling inside one of those ranges from a mirror's
//! release metadata before it is written out.
//!
//! Matching is biased toward keeping releases: a version or specifier the
//! dataset spells in a way PEP 440 cannot parse is logged and treated as
//! not matching, so malformed advisory data can never empty a mirror.
//!
//! ```
//! use indexmap::IndexMap;
//! use safety_db_filter::{AdvisoryTable, RawAdvisoryDb};
//!
//! let mut raw = RawAdvisoryDb::new();
//! raw.insert("aiohttp".to_string(), vec!["<0.16.3".to_string()]);
//! let table = AdvisoryTable::from_raw(raw);
//!
//! let mut releases = IndexMap::from([
//!     ("0.15.1".to_string(), ()),
//!     ("0.16.3".to_string(), ()),
//! ]);
//! let removed = table.filter_releases("aiohttp", &mut releases);
//!
//! assert_eq!(removed, 1);
//! assert!(releases.contains_key("0.16.3"));
//! ```
//!
//! In a mirror pipeline the [`SafetyDbReleaseFilter`] plugin wraps this:
//! it fetches the dataset from GitHub (or a local file) on first use and
//! exposes the same filtering over the loaded table.
//!
//! [pyup.io safety-db]: https://github.com/pyupio/safety-db

pub mod advisory;
pub mod config;
pub mod plugin;

pub use advisory::error::{SourceError, SpecParseError};
pub use advisory::name::PackageName;
pub use advisory::source::{AdvisorySource, RawAdvisoryDb, SourceKind};
pub use advisory::sources::{GitHubAdvisorySource, LocalAdvisorySource, build_source};
pub use advisory::spec::RangeSpec;
pub use advisory::table::{AdvisoryEntry, AdvisoryTable};
pub use config::{FilterConfig, GitHubSourceConfig, LocalSourceConfig};
pub use plugin::SafetyDbReleaseFilter;

pub use pep508_rs::pep440_rs::Version;
