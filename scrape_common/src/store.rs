//! JSON file persistence for scraper output.
use std::fs;
use std::path::Path;

use chrono::Utc;
use log::info;
use serde::Serialize;

use crate::result::Result;

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`, the stamp used in every output file.
pub fn utc_stamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Writes `value` to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    info!("Successfully wrote to {:?}", path);
    Ok(())
}

/// Writes `value` to `path` as single-line JSON.
pub fn write_json_compact<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(value)?;
    fs::write(path, json)?;
    info!("Successfully wrote to {:?}", path);
    Ok(())
}
