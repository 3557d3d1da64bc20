//! Shared test utilities

use indexmap::IndexMap;
use serde_json::{Value, json};

/// Install a debug-level tracing subscriber writing to the test output.
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Build a release set keyed by version, with empty metadata objects
pub fn release_set(versions: &[&str]) -> IndexMap<String, Value> {
    versions
        .iter()
        .map(|v| (v.to_string(), json!({})))
        .collect()
}
