//! Package index definition and persistence.
//!
//! The index is a single human-readable JSON document at the repository
//! root. Writes are two-phase: new content is staged in a temp file, the
//! previous generation is demoted to `packages.json.bak`, and the staged
//! file is renamed into place. A crash at any point leaves either the old
//! index or the new one on disk, never a torn file, and the backup always
//! holds a complete earlier generation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the package index inside a repository.
pub const INDEX_FILE: &str = "packages.json";

/// Companion shell script whose version is recorded in the `tools` map.
const COMPANION_SCRIPT: &str = "pkg.sh";

/// Errors from reading or writing the index file.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Filesystem failure while staging, renaming or reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One indexed package.
///
/// Field order here is the field order in the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Package name (`pkgname`).
    pub name: String,
    /// Full version, `pkgver-pkgrel`.
    pub version: String,
    /// One-line description; empty when the manifest omits `pkgdesc`.
    #[serde(default)]
    pub description: String,
    /// Upstream url; empty when the manifest omits it.
    #[serde(default)]
    pub url: String,
    /// Tracked files of the package directory, sorted, without the
    /// manifest itself.
    #[serde(default)]
    pub files: Vec<String>,
}

/// The persisted index document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageIndex {
    /// Entries in repository scan order.
    pub packages: Vec<PackageEntry>,
    /// Version of every tool that participates in repository maintenance.
    pub tools: BTreeMap<String, String>,
}

impl PackageIndex {
    /// Assemble an index from aggregated entries and tool versions.
    pub fn new(packages: Vec<PackageEntry>, tools: BTreeMap<String, String>) -> Self {
        Self { packages, tools }
    }

    /// Read an index back from disk.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the index with a two-phase rename.
    ///
    /// The staged temp file lives next to the target so the final rename
    /// stays on one filesystem. An existing index is demoted to `.bak`
    /// before promotion; the backup is therefore always exactly one
    /// generation behind, never a copy of what was just written.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');

        let staged = path.with_extension("json.tmp");
        fs::write(&staged, &content)?;
        if path.exists() {
            fs::rename(path, path.with_extension("json.bak"))?;
        }
        fs::rename(&staged, path)?;
        Ok(())
    }
}

/// Versions of the maintenance tools, for the index `tools` map.
///
/// Always contains this binary's own version plus the companion
/// `pkg.sh` script's, read from its `VERSION=` line when the script is
/// present and parseable, `"unknown"` otherwise.
pub fn tool_versions(root: &Path) -> BTreeMap<String, String> {
    let mut tools = BTreeMap::new();
    tools.insert("repodev".to_string(), crate::version().to_string());
    tools.insert(
        COMPANION_SCRIPT.to_string(),
        script_version(&root.join(COMPANION_SCRIPT)),
    );
    tools
}

fn script_version(script: &Path) -> String {
    let unknown = || "unknown".to_string();
    let Ok(text) = fs::read_to_string(script) else {
        return unknown();
    };
    let Ok(re) = Regex::new(r#"(?m)^VERSION=["']?([A-Za-z0-9._-]+)"#) else {
        return unknown();
    };
    re.captures(&text)
        .and_then(|c| c.get(1))
        .map_or_else(unknown, |m| m.as_str().to_string())
}
