//! Clean command (build artifact removal)

use std::fs;

use anyhow::{Context, Result};
use repodev::repo::Repo;
use repodev::ui;

/// Working directories makepkg leaves behind.
const BUILD_DIRS: [&str; 2] = ["src", "pkg"];

/// Remove makepkg debris from every package directory.
///
/// Deletes `src/` and `pkg/` working trees plus built artifacts
/// (`*.pkg.tar.*`) and log files. Manifests and tracked sources are never
/// touched.
pub fn clean(repo: &Repo) -> Result<()> {
    let mut removed = 0usize;
    for dir in repo.package_dirs()? {
        for sub in BUILD_DIRS {
            let path = dir.join(sub);
            if path.is_dir() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_file() && (file_name.contains(".pkg.tar.") || file_name.ends_with(".log")) {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
    }

    ui::success(&format!(
        "Removed {removed} build artifact{}",
        if removed == 1 { "" } else { "s" }
    ));
    Ok(())
}
