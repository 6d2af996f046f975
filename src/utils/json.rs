//! JSON file loading.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

/// Read and deserialize a JSON file.
///
/// I/O and parse errors are returned as-is.
pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let contents = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&contents)?)
}

/// Resolve a path relative to the crate root.
pub fn get_abs_path<P: AsRef<Path>>(path: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

/// Load the bundled JSON schema for `entity`.
pub fn load_schema(entity: &str) -> Result<Value> {
    load_schema_from(get_abs_path("schemas"), entity)
}

/// Load `<dir>/<entity>.json` as a schema document.
pub fn load_schema_from<P: AsRef<Path>>(dir: P, entity: &str) -> Result<Value> {
    let path = dir.as_ref().join(format!("{}.json", entity));
    info!(entity = %entity, path = %path.display(), "Loading schema");
    load_json(path)
}
