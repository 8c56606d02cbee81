//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested (`setlocale`, `localeconv`, `category_value`).
    pub function: String,
    /// POSIX/C reference for the behavior.
    pub spec_section: String,
    /// Input parameters.
    pub inputs: serde_json::Value,
    /// Expected output, rendered as text.
    pub expected_output: String,
    /// `strict`, `hardened`, or `both`.
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Ok(Self::from_json(&content)?)
    }
}

/// Load every `*.json` fixture set in `dir`, sorted by file name.
///
/// An unreadable directory entry fails the whole load rather than silently
/// shrinking the fixture set.
pub fn load_dir(dir: &Path) -> Result<Vec<(PathBuf, FixtureSet)>, HarnessError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))? {
        let path = entry.map_err(|e| HarnessError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|p| FixtureSet::from_file(&p).map(|set| (p, set)))
        .collect()
}
