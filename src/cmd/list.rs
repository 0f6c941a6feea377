//! List command

use anyhow::Result;
use repodev::repo::{self, Repo};
use repodev::{manifest, ui};

/// List every package with its version and description.
pub fn list(repo: &Repo) -> Result<()> {
    let dirs = repo.package_dirs()?;

    if dirs.is_empty() {
        println!("No packages found.");
        println!("Run 'repodev new <name>' to create one.");
        return Ok(());
    }

    for dir in &dirs {
        match manifest::evaluate(&dir.join(repo::MANIFEST)) {
            Ok(fields) => {
                println!(
                    "{:<20} {:<12} {}",
                    fields.name,
                    fields.full_version(),
                    fields.description
                );
            }
            Err(e) => ui::warning(&format!("{}: {e}", repo::dir_name(dir))),
        }
    }

    Ok(())
}
