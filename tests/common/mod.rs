//! Shared helpers for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `content` to a temporary `.toml` file, removed when the guard drops.
pub fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("redis-conf-")
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
