use anyhow::{Context, Result};
use apidoc_search::{Catalog, CatalogKey, LoadOptions, load_catalog_from_path};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load `tests/fixtures/<name>.json`, keyed by `name` when the file has no key.
pub fn fixture(name: &str) -> Result<Catalog> {
    init_tracing();
    let path = fixtures_dir().join(format!("{name}.json"));
    let options = LoadOptions {
        fallback_key: Some(CatalogKey(name.to_string())),
        ..Default::default()
    };
    load_catalog_from_path(&path, &options)
        .with_context(|| format!("loading fixture {}", path.display()))
}

pub fn write_catalog(dir: &Path, file_name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let text = serde_json::to_string_pretty(value)?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Route library logs to the test harness; `RUST_LOG=debug` shows them.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
