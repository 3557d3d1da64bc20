//! Advisory data layer for insecure-release filtering
//!
//! This module turns the raw safety-db dataset into an in-memory table of
//! insecure version ranges and answers match/filter queries against it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│    Table    │◀────│   Plugin    │
//! │  (fetch)    │     │  (matching) │     │  (adapter)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Sources   │     │  RangeSpec  │
//! │(github,file)│     │ (PEP 440)   │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! Sources are only concerned with producing a [`source::RawAdvisoryDb`];
//! all name canonicalization, specifier parsing and range matching happens
//! in the table layer so every source shares the same semantics.
//!
//! # Modules
//!
//! - [`error`]: Error types for source fetching and specifier parsing
//! - [`name`]: Canonical package-name newtype (PEP 503 normalization)
//! - [`source`]: Source trait and raw advisory-db decoding
//! - [`sources`]: Concrete source implementations (GitHub, local file)
//! - [`spec`]: Parsed version-range constraints
//! - [`table`]: The advisory table with match and filter operations

pub mod error;
pub mod name;
pub mod source;
pub mod sources;
pub mod spec;
pub mod table;
