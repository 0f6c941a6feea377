//! PKGBUILD field extraction.
//!
//! PKGBUILDs are bash scripts, so the only faithful parser is bash: the
//! manifest is sourced in a subprocess and the interesting variables are
//! echoed back as one pipe-separated line. Decoding that line into
//! [`Fields`] is a separate pure step with typed failures, so a manifest
//! that evaluates but produces garbage is rejected loudly instead of
//! being silently truncated.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Fields extracted from one manifest evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    /// `pkgname`.
    pub name: String,
    /// `pkgver`.
    pub version: String,
    /// `pkgrel`.
    pub release: String,
    /// `pkgdesc`; may be empty.
    pub description: String,
    /// `url`; may be empty.
    pub url: String,
}

impl Fields {
    /// The `pkgver-pkgrel` string recorded in the index.
    pub fn full_version(&self) -> String {
        format!("{}-{}", self.version, self.release)
    }
}

/// Why a single manifest could not be turned into [`Fields`].
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The bash subprocess could not be spawned at all.
    #[error("failed to run bash: {0}")]
    Io(#[from] std::io::Error),

    /// Sourcing the manifest exited non-zero (e.g. an explicit `exit`).
    #[error("evaluation of {} failed: {status}", .path.display())]
    Eval {
        /// Manifest that was being evaluated.
        path: PathBuf,
        /// Exit status of the bash subprocess.
        status: ExitStatus,
    },

    /// The echoed line had fewer fields than the protocol requires.
    #[error("malformed output from {}: expected at least 4 fields, got {fields}", .path.display())]
    Malformed {
        /// Manifest that was being evaluated.
        path: PathBuf,
        /// Number of fields actually present.
        fields: usize,
    },

    /// `pkgname` evaluated to the empty string.
    #[error("{} evaluated to an empty pkgname", .path.display())]
    MissingName {
        /// Manifest that was being evaluated.
        path: PathBuf,
    },

    /// `pkgver` or `pkgrel` evaluated to the empty string.
    #[error("{} evaluated to an empty pkgver or pkgrel", .path.display())]
    MissingVersion {
        /// Manifest that was being evaluated.
        path: PathBuf,
    },
}

/// Source the manifest at `path` in bash and decode the echoed fields.
///
/// The subprocess runs with the package directory as its working
/// directory, since manifests routinely reference sibling files. Script
/// stderr is discarded; a non-zero exit is the package author opting out.
pub fn evaluate(path: &Path) -> Result<Fields, ManifestError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let script = format!(
        r#"source "{}" 2>/dev/null; echo "${{pkgname}}|${{pkgver}}|${{pkgrel}}|${{pkgdesc}}|${{url}}""#,
        path.display()
    );
    let output = Command::new("bash")
        .arg("-c")
        .arg(&script)
        .current_dir(dir)
        .output()?;

    if !output.status.success() {
        return Err(ManifestError::Eval {
            path: path.to_path_buf(),
            status: output.status,
        });
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    decode(raw.trim(), path)
}

/// Decode one pipe-separated evaluation line.
///
/// The line must carry at least name, version, release and description;
/// a fifth field is the url and anything beyond that is ignored. A
/// missing name or version component rejects the manifest.
pub fn decode(raw: &str, path: &Path) -> Result<Fields, ManifestError> {
    let parts: Vec<&str> = raw.split('|').collect();
    if parts.len() < 4 {
        return Err(ManifestError::Malformed {
            path: path.to_path_buf(),
            fields: parts.len(),
        });
    }
    if parts[0].is_empty() {
        return Err(ManifestError::MissingName {
            path: path.to_path_buf(),
        });
    }
    if parts[1].is_empty() || parts[2].is_empty() {
        return Err(ManifestError::MissingVersion {
            path: path.to_path_buf(),
        });
    }

    Ok(Fields {
        name: parts[0].to_string(),
        version: parts[1].to_string(),
        release: parts[2].to_string(),
        description: parts[3].to_string(),
        url: parts.get(4).copied().unwrap_or("").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MANIFEST;

    fn at() -> PathBuf {
        PathBuf::from("pkg/PKGBUILD")
    }

    #[test]
    fn decode_four_fields_leaves_url_empty() {
        let fields = decode("jq|1.7|2|JSON processor", &at()).expect("decode");
        assert_eq!(fields.name, "jq");
        assert_eq!(fields.full_version(), "1.7-2");
        assert_eq!(fields.description, "JSON processor");
        assert_eq!(fields.url, "");
    }

    #[test]
    fn decode_five_fields_sets_url() {
        let fields = decode("jq|1.7|2|JSON processor|https://jqlang.org", &at()).expect("decode");
        assert_eq!(fields.url, "https://jqlang.org");
    }

    #[test]
    fn decode_ignores_trailing_extra_fields() {
        let fields = decode("jq|1.7|2|desc|url|junk|more", &at()).expect("decode");
        assert_eq!(fields.url, "url");
    }

    #[test]
    fn decode_rejects_too_few_fields() {
        let err = decode("jq|1.7|2", &at()).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { fields: 3, .. }));
    }

    #[test]
    fn decode_rejects_empty_name() {
        // A manifest that sets nothing still echoes the separators.
        let err = decode("||||", &at()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingName { .. }));
    }

    #[test]
    fn decode_rejects_empty_version_or_release() {
        let err = decode("jq||2|desc", &at()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion { .. }));
        let err = decode("jq|1.7||desc", &at()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion { .. }));
    }

    #[test]
    fn decode_keeps_empty_description() {
        let fields = decode("jq|1.7|2|", &at()).expect("decode");
        assert_eq!(fields.description, "");
    }

    fn bash_available() -> bool {
        Command::new("bash")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    #[test]
    fn evaluate_reads_fields_from_disk() {
        if !bash_available() {
            eprintln!("skipping: bash not available");
            return;
        }
        let temp = tempfile::tempdir().expect("tempdir");
        let manifest = temp.path().join(MANIFEST);
        std::fs::write(
            &manifest,
            "pkgname=demo\npkgver=0.3.1\npkgrel=1\npkgdesc=\"A demo\"\nurl=\"https://example.com\"\n",
        )
        .expect("write manifest");

        let fields = evaluate(&manifest).expect("evaluate");
        assert_eq!(fields.name, "demo");
        assert_eq!(fields.full_version(), "0.3.1-1");
        assert_eq!(fields.url, "https://example.com");
    }

    #[test]
    fn evaluate_surfaces_nonzero_exit() {
        if !bash_available() {
            eprintln!("skipping: bash not available");
            return;
        }
        let temp = tempfile::tempdir().expect("tempdir");
        let manifest = temp.path().join(MANIFEST);
        std::fs::write(&manifest, "exit 3\n").expect("write manifest");

        let err = evaluate(&manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Eval { .. }));
    }

    #[test]
    fn evaluate_runs_from_package_directory() {
        if !bash_available() {
            eprintln!("skipping: bash not available");
            return;
        }
        // pkgver is derived from a sibling file, which only resolves if the
        // subprocess cwd is the package directory.
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("version.txt"), "9.9.9").expect("write sibling");
        let manifest = temp.path().join(MANIFEST);
        std::fs::write(
            &manifest,
            "pkgname=demo\npkgver=$(cat version.txt)\npkgrel=1\npkgdesc=x\n",
        )
        .expect("write manifest");

        let fields = evaluate(&manifest).expect("evaluate");
        assert_eq!(fields.version, "9.9.9");
    }
}
