//! Canonical package names

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Runs of the separator characters PEP 503 treats as equivalent
static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("valid separator pattern"));

/// A package name in canonical form.
///
/// Canonicalization follows PEP 503: the name is trimmed, lowercased, and
/// runs of `-`, `_` and `.` are collapsed into a single `-`. Construction is
/// the only way to obtain a `PackageName`, so every table insertion and every
/// lookup goes through the same normalization and mixed-case or
/// separator-variant spellings of the same package always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Canonicalize an arbitrary package-name spelling
    pub fn new(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        Self(NAME_SEPARATORS.replace_all(&lowered, "-").into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("aiohttp", "aiohttp")]
    #[case("Aiohttp", "aiohttp")]
    #[case("AIOHTTP", "aiohttp")]
    #[case("aiida-core", "aiida-core")]
    #[case("aiida_core", "aiida-core")]
    #[case("Aiida.Core", "aiida-core")]
    #[case("aiida__core", "aiida-core")]
    #[case("ruamel.yaml", "ruamel-yaml")]
    #[case("A.B-C_d", "a-b-c-d")]
    #[case("  requests  ", "requests")]
    fn new_canonicalizes_spelling(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(PackageName::new(input).as_str(), expected);
    }

    #[test]
    fn equivalent_spellings_compare_equal() {
        assert_eq!(PackageName::new("Aiida_Core"), PackageName::new("aiida.core"));
    }

    #[test]
    fn display_uses_canonical_form() {
        assert_eq!(PackageName::new("AioHTTP").to_string(), "aiohttp");
    }
}
