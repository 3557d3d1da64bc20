//! Parsed version-range constraints

use std::fmt;

use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use pep508_rs::{Requirement, VersionOrUrl};

use crate::advisory::error::SpecParseError;
use crate::advisory::name::PackageName;

/// A single evaluable version-range constraint for one package.
///
/// The advisory dataset encodes ranges as name-scoped PEP 440 specifier
/// strings (`<0.16.3`, `>=1.0,<2.0`). Parsing concatenates the canonical
/// package name with the raw specifier to form a full requirement string,
/// exactly the shape the dataset's consumers feed to a requirement parser.
/// Comma-separated compound constraints are a logical AND.
#[derive(Debug, Clone)]
pub struct RangeSpec {
    /// Specifier text as it appeared in the dataset, for diagnostics
    raw: String,
    specifiers: VersionSpecifiers,
}

impl RangeSpec {
    /// Parse one raw specifier scoped to `name`.
    ///
    /// Leading and trailing whitespace is stripped before parsing. A raw
    /// string that is empty, does not parse as a requirement, or parses
    /// without any version constraints (garbage that merely extends the
    /// package name, or a URL requirement) is an error; callers drop the
    /// entry and continue.
    pub fn parse(name: &PackageName, raw: &str) -> Result<Self, SpecParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SpecParseError::Empty);
        }

        let requirement_str = format!("{name}{trimmed}");
        let requirement = requirement_str.parse::<Requirement>().map_err(|e| {
            SpecParseError::InvalidRequirement {
                requirement: requirement_str.clone(),
                reason: e.to_string(),
            }
        })?;

        match requirement.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specifiers)) => Ok(Self {
                raw: trimmed.to_string(),
                specifiers,
            }),
            _ => Err(SpecParseError::MissingSpecifiers {
                requirement: requirement_str,
            }),
        }
    }

    /// Whether `version` falls inside this range.
    ///
    /// Evaluation is exactly PEP 440, prereleases included: an in-range
    /// prerelease or dev version matches like any final release.
    pub fn contains(&self, version: &Version) -> bool {
        self.specifiers.contains(version)
    }

    /// The specifier text as it appeared in the dataset
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
