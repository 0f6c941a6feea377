//! Test command (makepkg builds)

use std::path::PathBuf;

use anyhow::{Result, bail};
use repodev::repo::{self, Repo};
use repodev::{makepkg, ui};

/// Build one package, or every package when no name is given.
///
/// A failing build does not stop the batch; the command exits non-zero at
/// the end if anything failed.
pub fn test(repo: &Repo, name: Option<&str>) -> Result<()> {
    let dirs: Vec<PathBuf> = match name {
        Some(name) => {
            let dir = repo.package_dir(name);
            if !dir.join(repo::MANIFEST).is_file() {
                bail!("package '{name}' not found");
            }
            vec![dir]
        }
        None => repo.package_dirs()?,
    };

    let mut failed = 0usize;
    for dir in &dirs {
        let pkg = repo::dir_name(dir);
        ui::info(&format!("Building {pkg}"));
        match makepkg::build(dir) {
            Ok(()) => ui::success(&format!("{pkg} built")),
            Err(e) => {
                failed += 1;
                ui::error(&format!("{pkg}: {e:#}"));
            }
        }
    }

    if failed > 0 {
        bail!(
            "{failed} package{} failed to build",
            if failed == 1 { "" } else { "s" }
        );
    }
    ui::success(&format!(
        "Built {} package{}",
        dirs.len(),
        if dirs.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}
