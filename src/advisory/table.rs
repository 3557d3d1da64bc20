//! The in-memory advisory table and release filtering

use std::collections::HashMap;
use std::str::FromStr;

use indexmap::IndexMap;
use pep508_rs::pep440_rs::Version;
use tracing::{debug, info, trace, warn};

use crate::advisory::name::PackageName;
use crate::advisory::source::RawAdvisoryDb;
use crate::advisory::spec::RangeSpec;

/// All known-insecure ranges for one package
#[derive(Debug, Clone)]
pub struct AdvisoryEntry {
    name: PackageName,
    specs: Vec<RangeSpec>,
}

impl AdvisoryEntry {
    fn new(name: PackageName) -> Self {
        Self {
            name,
            specs: Vec::new(),
        }
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn specs(&self) -> &[RangeSpec] {
        &self.specs
    }

    /// Whether `version_string` falls inside any of this package's ranges.
    ///
    /// Ranges are a boolean OR: the first hit wins and order among them does
    /// not matter. An unparseable version is never treated as insecure; its
    /// range membership cannot be determined, so it reports no match.
    pub fn matches(&self, version_string: &str) -> bool {
        let Ok(version) = Version::from_str(version_string).inspect_err(|e| {
            debug!(
                "Package {}=={} has an invalid version: {}",
                self.name, version_string, e
            );
        }) else {
            return false;
        };

        for spec in &self.specs {
            if spec.contains(&version) {
                debug!(
                    "Safety db match: release {}=={} matches specifier {}",
                    self.name, version, spec
                );
                return true;
            }
        }
        trace!("Release {}=={} matches no specifier", self.name, version);
        false
    }
}

/// Advisory table mapping canonical package names to their insecure ranges.
///
/// Built once from the raw advisory mapping and reused for the process
/// lifetime; reads are lock-free and safe to share across concurrent filter
/// invocations. Names are canonicalized by [`PackageName`] on both insertion
/// and lookup, so spelling variants cannot make a lookup silently miss.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryTable {
    entries: HashMap<PackageName, AdvisoryEntry>,
}

impl AdvisoryTable {
    /// Build the table from a raw advisory mapping.
    ///
    /// Every specifier that fails to parse is logged at warn level and
    /// dropped; a package whose specifiers all fail is omitted entirely.
    /// Building never fails; malformed entries only shrink the table.
    pub fn from_raw(raw: RawAdvisoryDb) -> Self {
        let mut entries: HashMap<PackageName, AdvisoryEntry> = HashMap::new();

        for (package, specifiers) in raw {
            let name = PackageName::new(&package);
            if name.as_str().is_empty() {
                warn!("Skipping advisory entry with empty package name: {:?}", package);
                continue;
            }

            for raw_spec in specifiers {
                let spec = match RangeSpec::parse(&name, &raw_spec) {
                    Ok(spec) => spec,
                    Err(e) => {
                        warn!("Skipping invalid specifier for {}: {}", name, e);
                        continue;
                    }
                };
                entries
                    .entry(name.clone())
                    .or_insert_with(|| AdvisoryEntry::new(name.clone()))
                    .specs
                    .push(spec);
            }
        }

        Self { entries }
    }

    /// Number of packages with at least one usable range
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of parsed range specifiers across all packages
    pub fn spec_count(&self) -> usize {
        self.entries.values().map(|entry| entry.specs.len()).sum()
    }

    /// Look up the advisory entry for a canonical name
    pub fn get(&self, name: &PackageName) -> Option<&AdvisoryEntry> {
        self.entries.get(name)
    }

    /// Whether the release `name`/`version_string` is listed as insecure.
    ///
    /// The name is canonicalized with the same rules used at build time
    /// before lookup. A package absent from the table, or a version that
    /// does not parse, reports no match.
    pub fn matches(&self, name: &str, version_string: &str) -> bool {
        let canonical = PackageName::new(name);
        let Some(entry) = self.entries.get(&canonical) else {
            trace!("No advisories for package {}", canonical);
            return false;
        };
        entry.matches(version_string)
    }

    /// Remove every insecure release of `name` from `releases` in place.
    ///
    /// Returns the number of releases removed. Removal decisions are
    /// independent per version, so the result does not depend on iteration
    /// order and a second invocation removes nothing further. A package
    /// absent from the table is a no-op returning 0.
    pub fn filter_releases<V>(&self, name: &str, releases: &mut IndexMap<String, V>) -> usize {
        let canonical = PackageName::new(name);
        let Some(entry) = self.entries.get(&canonical) else {
            return 0;
        };

        let before = releases.len();
        releases.retain(|version, _| !entry.matches(version));
        let removed = before - releases.len();

        if removed > 0 {
            info!("Filtered {} insecure releases from {}", removed, canonical);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn table(entries: &[(&str, &[&str])]) -> AdvisoryTable {
        let raw: RawAdvisoryDb = entries
            .iter()
            .map(|(name, specs)| {
                (
                    name.to_string(),
                    specs.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        AdvisoryTable::from_raw(raw)
    }

    fn releases(versions: &[&str]) -> IndexMap<String, Value> {
        versions
            .iter()
            .map(|v| (v.to_string(), json!({})))
            .collect()
    }

    #[test]
    fn from_raw_keeps_valid_specifiers_and_drops_invalid_ones() {
        let table = table(&[("aiohttp", &["<0.16.3", ">>=garbage", ""])]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.spec_count(), 1);

        let entry = table.get(&PackageName::new("aiohttp")).unwrap();
        assert_eq!(entry.specs()[0].raw(), "<0.16.3");
    }

    #[test]
    fn from_raw_omits_packages_with_no_usable_specifier() {
        let table = table(&[("aiohttp", &["", "banana"]), ("django", &["<1.2"])]);

        assert_eq!(table.len(), 1);
        assert!(table.get(&PackageName::new("aiohttp")).is_none());
        assert!(table.get(&PackageName::new("django")).is_some());
    }

    #[test]
    fn from_raw_merges_spelling_variants_of_the_same_package() {
        let table = table(&[("Aiida.Core", &["<0.12.3"]), ("aiida_core", &[">=9.0"])]);

        assert_eq!(table.len(), 1);
        let entry = table.get(&PackageName::new("aiida-core")).unwrap();
        assert_eq!(entry.specs().len(), 2);
    }

    #[test]
    fn from_raw_skips_empty_package_names() {
        let table = table(&[("", &["<1.0"]), ("   ", &["<1.0"])]);
        assert!(table.is_empty());
    }

    #[test]
    fn matches_is_false_for_packages_not_in_the_table() {
        let table = table(&[("aiohttp", &["<0.16.3"])]);

        assert!(!table.matches("requests", "0.1.0"));
        assert!(!table.matches("", "0.1.0"));
    }

    #[test]
    fn matches_is_false_for_unparseable_versions() {
        let table = table(&[("aiohttp", &["<0.16.3"])]);

        assert!(!table.matches("aiohttp", "not-a-version"));
        assert!(!table.matches("aiohttp", ""));
        assert!(!table.matches("aiohttp", "1.0-banana!"));
    }

    // Lookups must succeed for any spelling variant whenever the canonical
    // form is present, however the dataset spelled the key.
    #[rstest]
    #[case("aiohttp")]
    #[case("Aiohttp")]
    #[case("AIOHTTP")]
    fn matches_normalizes_the_queried_name(#[case] queried: &str) {
        for stored in ["aiohttp", "AioHTTP", "AIOHTTP"] {
            let table = table(&[(stored, &["<0.16.3"])]);
            assert!(
                table.matches(queried, "0.16.0"),
                "stored as {stored}, queried as {queried}"
            );
        }
    }

    #[rstest]
    #[case("1.5", true)]
    #[case("2.0", false)]
    #[case("0.9", false)]
    fn matches_honors_compound_ranges(#[case] version: &str, #[case] expected: bool) {
        let table = table(&[("pkg", &[">=1.0,<2.0"])]);
        assert_eq!(table.matches("pkg", version), expected);
    }

    #[test]
    fn matches_is_an_or_across_specifiers() {
        let table = table(&[("pkg", &["<1.0", ">=2.0,<2.5"])]);

        assert!(table.matches("pkg", "0.5"));
        assert!(!table.matches("pkg", "1.5"));
        assert!(table.matches("pkg", "2.2"));
        assert!(!table.matches("pkg", "3.0"));
    }

    #[test]
    fn filter_releases_removes_insecure_versions_in_place() {
        let table = table(&[("aiohttp", &["<0.16.3"])]);
        let mut releases = releases(&["0.16.3", "0.16.0", "0.15.1"]);

        let removed = table.filter_releases("aiohttp", &mut releases);

        assert_eq!(removed, 2);
        assert_eq!(releases.keys().collect::<Vec<_>>(), vec!["0.16.3"]);
    }

    #[test]
    fn filter_releases_keeps_boundary_release_with_lower_precedence_versions() {
        let table = table(&[("aiida-core", &["<0.12.3"])]);
        let mut releases = releases(&["0.12.3", "0.6.0.1"]);

        let removed = table.filter_releases("aiida-core", &mut releases);

        assert_eq!(removed, 1);
        assert_eq!(releases.keys().collect::<Vec<_>>(), vec!["0.12.3"]);
    }

    #[test]
    fn filter_releases_is_a_no_op_for_an_empty_table() {
        let table = AdvisoryTable::default();
        let mut releases = releases(&["1.0", "2.0"]);

        assert_eq!(table.filter_releases("anything", &mut releases), 0);
        assert_eq!(releases.len(), 2);
    }

    #[test]
    fn filter_releases_is_a_no_op_for_unlisted_packages() {
        let table = table(&[("aiohttp", &["<0.16.3"])]);
        let mut releases = releases(&["0.1.0"]);

        assert_eq!(table.filter_releases("requests", &mut releases), 0);
        assert_eq!(releases.len(), 1);
    }

    #[test]
    fn filter_releases_is_idempotent() {
        let table = table(&[("aiohttp", &["<0.16.3"])]);
        let mut releases = releases(&["0.16.3", "0.16.0", "0.15.1"]);

        assert_eq!(table.filter_releases("aiohttp", &mut releases), 2);
        assert_eq!(table.filter_releases("aiohttp", &mut releases), 0);
        assert_eq!(releases.len(), 1);
    }

    #[test]
    fn filter_releases_preserves_order_and_metadata_of_survivors() {
        let table = table(&[("pkg", &["<1.0"])]);
        let mut releases: IndexMap<String, Value> = IndexMap::from([
            ("0.9".to_string(), json!({"yanked": false})),
            ("1.0".to_string(), json!({"files": 3})),
            ("0.5".to_string(), json!({})),
            ("2.0".to_string(), json!({"files": 1})),
        ]);

        table.filter_releases("pkg", &mut releases);

        assert_eq!(releases.keys().collect::<Vec<_>>(), vec!["1.0", "2.0"]);
        assert_eq!(releases["1.0"], json!({"files": 3}));
        assert_eq!(releases["2.0"], json!({"files": 1}));
    }

    #[test]
    fn filter_releases_never_removes_unparseable_versions() {
        let table = table(&[("pkg", &["<1.0"])]);
        let mut releases = releases(&["0.5", "bogus-version", "1.5"]);

        let removed = table.filter_releases("pkg", &mut releases);

        assert_eq!(removed, 1);
        assert!(releases.contains_key("bogus-version"));
        assert!(releases.contains_key("1.5"));
    }
}
