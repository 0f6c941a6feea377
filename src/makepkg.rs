//! Wrappers around the Arch packaging tools (`makepkg`, `updpkgsums`).

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Metadata snapshot regenerated next to each manifest.
pub const SRCINFO: &str = ".SRCINFO";

/// Regenerate `.SRCINFO` from the manifest in `dir`.
///
/// Runs `makepkg --printsrcinfo` and writes its stdout verbatim. The
/// previous snapshot is only replaced after a successful run.
pub fn write_srcinfo(dir: &Path) -> Result<()> {
    let output = Command::new("makepkg")
        .arg("--printsrcinfo")
        .current_dir(dir)
        .output()
        .context("failed to run makepkg")?;

    if !output.status.success() {
        bail!(
            "makepkg --printsrcinfo failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    fs::write(dir.join(SRCINFO), &output.stdout)
        .with_context(|| format!("could not write {SRCINFO} in {}", dir.display()))?;
    Ok(())
}

/// Build the package in `dir` with `makepkg -f`.
///
/// Output is inherited so the caller sees compiler and download progress
/// live; only the exit status is interpreted here.
pub fn build(dir: &Path) -> Result<()> {
    let status = Command::new("makepkg")
        .args(["-f", "--noconfirm"])
        .current_dir(dir)
        .status()
        .context("failed to run makepkg")?;

    if !status.success() {
        bail!("makepkg exited with {status}");
    }
    Ok(())
}

/// Refresh the manifest checksums in `dir` with `updpkgsums`.
pub fn update_checksums(dir: &Path) -> Result<()> {
    let output = Command::new("updpkgsums")
        .current_dir(dir)
        .output()
        .context("failed to run updpkgsums")?;

    if !output.status.success() {
        bail!(
            "updpkgsums failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
