//! Build Context
//!
//! Assembles the data every template and helper can read:
//! `package.json`, then `version.json` merged into `meta`, then
//! `key=value` overrides from the command line. The context is
//! built once per run and only ever borrowed afterwards.
//!

use super::error::BuildError;
use super::files;
use crate::html::TargetKind;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

// ------------------------------------------------------------- Public Consts

/// Package manifest providing the base data.
///
pub const PACKAGE_JSON: &str = "package.json";

/// Version info merged into `meta`.
///
pub const VERSION_JSON: &str = "version.json";

/// Source directory that `importCSS`/`importHTML` read from.
///
pub const SOURCE_DIR: &str = "src";

// ------------------------------------------------------------- Public Types

/// Immutable data and settings for one build run.
///
#[derive(Debug, Clone)]
pub struct BuildContext {
    data: Map<String, Value>,
    root: PathBuf,
    target: TargetKind,
}

// ------------------------------------------------------------- Public Implementations

impl BuildContext {
    /// Loads the context from `root`. Both JSON files are
    /// required; a missing file fails the build.
    ///
    pub fn load(root: &Path, target: TargetKind, overrides: &[String]) -> Result<Self, BuildError> {
        let package = files::read_json(&root.join(PACKAGE_JSON))?;
        let version = files::read_json(&root.join(VERSION_JSON))?;

        let mut data = Map::new();
        merge(&mut data, package);

        let meta = data
            .entry("meta")
            .or_insert_with(|| Value::Object(Map::new()));
        match meta {
            Value::Object(meta) => merge(meta, version),
            _ => return Err(BuildError::MetaNotObject),
        }

        for item in overrides {
            let (key, value) = parse_override(item)?;
            debug!(key = %key, "applying override");
            data.insert(key, value);
        }

        Ok(Self::from_data(data, root, target))
    }

    /// Builds a context from data already in memory.
    ///
    pub fn from_data(data: Map<String, Value>, root: &Path, target: TargetKind) -> Self {
        Self {
            data,
            root: root.to_path_buf(),
            target,
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn target(&self) -> TargetKind {
        self.target
    }

    /// Resolves a path relative to the project root.
    ///
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Resolves a path inside the `src/` directory.
    ///
    pub fn source_path(&self, relative: &str) -> PathBuf {
        self.root.join(SOURCE_DIR).join(relative)
    }

    /// Whether `assert()` emits checks, following JavaScript
    /// truthiness of `tests_enabled`.
    ///
    pub fn tests_enabled(&self) -> bool {
        self.data.get("tests_enabled").is_some_and(is_truthy)
    }
}

// ------------------------------------------------------------- Public Functions

/// Checks whether `output` needs to be rebuilt: it is missing,
/// or older than the input or either JSON file.
///
pub fn is_stale(root: &Path, input: &Path, output: &Path) -> bool {
    let sources = [
        input.to_path_buf(),
        root.join(PACKAGE_JSON),
        root.join(VERSION_JSON),
    ];

    sources.iter().any(|source| is_source_newer(source, output))
}

/// JavaScript truthiness of a JSON value.
///
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ------------------------------------------------------------- Private Functions

/// Shallow merge: top-level keys of `source` replace those in
/// `target`. Non-object sources contribute nothing.
///
fn merge(target: &mut Map<String, Value>, source: Value) {
    if let Value::Object(source) = source {
        target.extend(source);
    }
}

/// Splits `key=value` at the first `=`. Values that parse as a
/// JSON boolean, number, or null keep that type; anything else
/// is a string.
///
fn parse_override(item: &str) -> Result<(String, Value), BuildError> {
    let (key, raw) = item
        .split_once('=')
        .ok_or_else(|| BuildError::Override(item.to_string()))?;

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Null)) => value,
        _ => Value::String(raw.to_string()),
    };

    Ok((key.to_string(), value))
}

/// Returns true if the source file was modified more recently
/// than the output file, or if the output does not exist.
///
fn is_source_newer(source: &Path, output: &Path) -> bool {
    let Some(source_time) = modified(source) else {
        return false;
    };

    match modified(output) {
        Some(output_time) => source_time > output_time,
        None => true,
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

// ------------------------------------------------------------- Unit Tests
