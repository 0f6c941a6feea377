//! Check command (manifest validation)

use anyhow::{Result, bail};
use repodev::repo::{self, Repo};
use repodev::{manifest, ui};

/// Evaluate every manifest and report problems without touching the index.
///
/// Evaluation and decode failures are errors; an empty `pkgdesc` or `url`
/// is only worth a warning, matching what the indexer tolerates.
pub fn check(repo: &Repo) -> Result<()> {
    let dirs = repo.package_dirs()?;
    if dirs.is_empty() {
        ui::info("No packages to check");
        return Ok(());
    }

    let mut failed = 0usize;
    for dir in &dirs {
        let name = repo::dir_name(dir);
        match manifest::evaluate(&dir.join(repo::MANIFEST)) {
            Ok(fields) => {
                if fields.description.is_empty() {
                    ui::warning(&format!("{name}: pkgdesc is empty"));
                }
                if fields.url.is_empty() {
                    ui::warning(&format!("{name}: url is empty"));
                }
                ui::success(&format!("{name} {}", fields.full_version()));
            }
            Err(e) => {
                failed += 1;
                ui::error(&format!("{name}: {e}"));
            }
        }
    }

    if failed > 0 {
        bail!(
            "{failed} package{} failed validation",
            if failed == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
