//! Publish command

use anyhow::{Context, Result};
use repodev::repo::Repo;
use repodev::ui;

/// Commit message used for every publish.
const COMMIT_MESSAGE: &str = "Update packages";

/// Rebuild the index, then commit and push whatever changed.
///
/// Nothing is committed when the work tree already matches HEAD after the
/// rebuild; that is the common no-op case, not an error.
pub async fn publish(repo: &Repo) -> Result<()> {
    super::update::update(repo).await?;

    repo.add_all().context("Failed to stage changes")?;
    if !repo.has_staged_changes()? {
        ui::info("No changes to publish");
        return Ok(());
    }

    repo.commit(COMMIT_MESSAGE)?;
    repo.push()?;
    ui::success("Published package index");
    Ok(())
}
