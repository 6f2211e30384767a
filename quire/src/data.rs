//! Structured data is read from the file system and handed to templates
//! (and to the configuration loader) as JSON values.

use std::{fs, path::Path};

use eyre::Result;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::Error;

/// Load arbitrary structured data from the given text file.
///
/// The format is chosen by the file's extension: `.json`, `.yml` or `.yaml`.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
    load_as(path)
}

/// Load the given JSON or YAML file and deserialize it into `T`.
pub fn load_as<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?
        .to_ascii_lowercase();
    // Reject the extension before touching the file system.
    if !matches!(ext.as_str(), "json" | "yml" | "yaml") {
        return Err(Error::UnsupportedFileType(ext).into());
    }
    let content = fs::read_to_string(path)?;
    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&content).map_err(Error::from)?),
        _ => Ok(serde_yaml::from_str(&content).map_err(Error::from)?),
    }
}
