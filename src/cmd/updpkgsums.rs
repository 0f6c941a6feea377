//! Updpkgsums command (checksum refresh)

use anyhow::{Context, Result, bail};
use repodev::repo::{self, Repo};
use repodev::{makepkg, ui};

/// Refresh the source checksums of one package in place.
pub fn updpkgsums(repo: &Repo, name: &str) -> Result<()> {
    let dir = repo.package_dir(name);
    if !dir.join(repo::MANIFEST).is_file() {
        bail!("package '{name}' not found");
    }

    makepkg::update_checksums(&dir)
        .with_context(|| format!("Failed to update checksums for '{name}'"))?;
    ui::success(&format!("Updated checksums for {name}"));
    Ok(())
}
