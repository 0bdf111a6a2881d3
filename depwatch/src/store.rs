//! Reading and writing the on-disk version map and rendered documents

use crate::error::InputError;
use anyhow::{Context, Result};
use depwatch_core::VersionMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Load a version map that must exist
pub fn load_required(path: &Path) -> Result<VersionMap, InputError> {
    load(path)?.ok_or_else(|| InputError::Missing {
        path: path.to_path_buf(),
    })
}

/// Load a version map, `None` if the file doesn't exist
pub fn load(path: &Path) -> Result<Option<VersionMap>, InputError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| InputError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a version map as sorted, 2-space indented JSON with a trailing newline
pub fn write(path: &Path, deps: &VersionMap) -> Result<()> {
    let json = serde_json::to_string_pretty(deps).context("Failed to serialize version map")?;

    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Read a text file, `None` if it doesn't exist
pub fn read_optional(path: &Path) -> Result<Option<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
