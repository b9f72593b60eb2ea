//! File Readers
//!
//! Thin wrappers over the filesystem used by the build context
//! and the template helpers. Text is normalized to `\n` line
//! endings so generated literals are the same on every
//! platform.
//!

use super::error::BuildError;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
use std::fs;
use std::path::Path;

// ------------------------------------------------------------- Public Functions

/// Reads a UTF-8 file, replacing `\r\n` with `\n`.
///
pub fn read_text(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path)
        .map(|text| text.replace("\r\n", "\n"))
        .map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads and parses a JSON file.
///
pub fn read_json(path: &Path) -> Result<Value, BuildError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file as standard, padded base64.
///
pub fn read_base64(path: &Path) -> Result<String, BuildError> {
    fs::read(path)
        .map(|bytes| STANDARD.encode(bytes))
        .map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Names of the entries in a directory, sorted.
///
pub fn list_dir(path: &Path) -> Result<Vec<String>, BuildError> {
    let read_err = |source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut names = fs::read_dir(path)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;

    names.sort();
    Ok(names)
}

/// Writes `content`, creating parent directories as needed.
///
pub fn write_text(path: &Path, content: &str) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    fs::write(path, content).map_err(write_err)
}

// ------------------------------------------------------------- Unit Tests
