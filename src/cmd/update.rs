//! Update command

use std::sync::Arc;

use anyhow::{Context, Result};
use repodev::index::{self, INDEX_FILE, PackageIndex};
use repodev::indexer::{self, RepoSource};
use repodev::repo::Repo;
use repodev::ui;

/// Scan the repository, aggregate every package and rewrite the index.
pub async fn update(repo: &Repo) -> Result<()> {
    let dirs = repo.package_dirs().context("Failed to scan repository")?;
    ui::info(&format!(
        "Indexing {} package{}",
        dirs.len(),
        if dirs.len() == 1 { "" } else { "s" }
    ));

    let scanned = dirs.len();
    let source = Arc::new(RepoSource::new(repo.clone()));
    let entries = indexer::build_entries(source, dirs, num_cpus::get()).await;
    let skipped = scanned - entries.len();

    let index = PackageIndex::new(entries, index::tool_versions(repo.root()));
    index
        .save(&repo.index_path())
        .context("Failed to write package index")?;

    let indexed = index.packages.len();
    let plural = if indexed == 1 { "" } else { "s" };
    if skipped > 0 {
        ui::success(&format!(
            "Wrote {INDEX_FILE} ({indexed} package{plural}, {skipped} skipped)"
        ));
    } else {
        ui::success(&format!("Wrote {INDEX_FILE} ({indexed} package{plural})"));
    }
    Ok(())
}
