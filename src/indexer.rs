//! Parallel package aggregation.
//!
//! The aggregator turns a list of scanned package directories into index
//! entries. Each directory is independent, so the work fans out across a
//! pool of blocking tasks bounded by the host's parallelism; because the
//! pool completes in arbitrary order, every result carries its submission
//! slot and the final list is re-sorted before it is returned. A directory
//! that fails to parse is reported and dropped without disturbing its
//! siblings, and never aborts the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};

use crate::index::PackageEntry;
use crate::repo::{self, Repo};
use crate::{makepkg, manifest, ui};

/// Produces one index entry from a package directory.
///
/// The aggregator calls [`load`](Self::load) from many worker tasks at
/// once, so implementations must not rely on shared mutable state.
pub trait PackageSource: Send + Sync {
    /// Build the entry for a single package directory.
    fn load(&self, dir: &Path) -> Result<PackageEntry>;
}

/// The production source: evaluates the manifest, lists tracked files,
/// and refreshes the package's `.SRCINFO` snapshot as a side effect.
#[derive(Debug)]
pub struct RepoSource {
    repo: Repo,
}

impl RepoSource {
    /// Create a source reading from the given repository.
    pub fn new(repo: Repo) -> Self {
        Self { repo }
    }
}

impl PackageSource for RepoSource {
    fn load(&self, dir: &Path) -> Result<PackageEntry> {
        let fields = manifest::evaluate(&dir.join(repo::MANIFEST))?;

        let mut files = self.repo.ls_files(dir)?;
        files.retain(|f| f != repo::MANIFEST);
        files.sort();
        files.dedup();

        if fields.description.is_empty() {
            tracing::warn!("{} has an empty pkgdesc", repo::dir_name(dir));
        }

        // Best-effort: a stale .SRCINFO degrades AUR-style mirroring, not
        // the index itself, so the entry survives a failure here.
        if let Err(e) = makepkg::write_srcinfo(dir) {
            ui::warning(&format!(
                "could not refresh {} for {}: {e:#}",
                makepkg::SRCINFO,
                repo::dir_name(dir)
            ));
        }

        let version = fields.full_version();
        Ok(PackageEntry {
            name: fields.name,
            version,
            description: fields.description,
            url: fields.url,
            files,
        })
    }
}

/// Aggregate index entries for every directory, preserving scan order.
///
/// At most `jobs` directories are in flight at a time (clamped to at
/// least one). Each failure is printed as a warning naming the directory
/// and the offending package is omitted from the result.
pub async fn build_entries<S>(source: Arc<S>, dirs: Vec<PathBuf>, jobs: usize) -> Vec<PackageEntry>
where
    S: PackageSource + 'static,
{
    let jobs = jobs.max(1);
    tracing::debug!("aggregating {} package(s) on {jobs} worker(s)", dirs.len());

    let mut slots: Vec<(usize, Option<PackageEntry>)> = stream::iter(dirs.into_iter().enumerate())
        .map(|(slot, dir)| {
            let source = Arc::clone(&source);
            async move {
                let handle = tokio::task::spawn_blocking(move || {
                    let entry = source.load(&dir);
                    (dir, entry)
                });
                match handle.await {
                    Ok((_, Ok(entry))) => (slot, Some(entry)),
                    Ok((dir, Err(e))) => {
                        ui::warning(&format!("skipping {}: {e:#}", repo::dir_name(&dir)));
                        (slot, None)
                    }
                    Err(e) => {
                        ui::warning(&format!("aggregation worker failed: {e}"));
                        (slot, None)
                    }
                }
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    // Completion order is arbitrary; the index wants scan order.
    slots.sort_by_key(|(slot, _)| *slot);
    slots.into_iter().filter_map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct StubSource;

    impl PackageSource for StubSource {
        fn load(&self, dir: &Path) -> Result<PackageEntry> {
            let name = repo::dir_name(dir);
            if name.starts_with("bad") {
                anyhow::bail!("synthetic failure");
            }
            if name == "slowest" {
                std::thread::sleep(Duration::from_millis(40));
            }
            Ok(PackageEntry {
                name,
                version: "1-1".to_string(),
                description: String::new(),
                url: String::new(),
                files: Vec::new(),
            })
        }
    }

    fn dirs(names: &[&str]) -> Vec<PathBuf> {
        names.iter().copied().map(PathBuf::from).collect()
    }

    #[tokio::test]
    async fn entries_keep_submission_order() {
        // First directory is the slowest; order must not follow completion.
        let out = build_entries(Arc::new(StubSource), dirs(&["slowest", "bb", "cc"]), 4).await;
        let names: Vec<&str> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["slowest", "bb", "cc"]);
    }

    #[tokio::test]
    async fn failing_directories_are_dropped() {
        let out = build_entries(Arc::new(StubSource), dirs(&["aa", "bad-one", "cc"]), 4).await;
        let names: Vec<&str> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["aa", "cc"]);
    }

    #[tokio::test]
    async fn worker_count_does_not_change_output() {
        let input = dirs(&["aa", "bb", "bad-mid", "cc", "dd"]);
        let serial = build_entries(Arc::new(StubSource), input.clone(), 1).await;
        let parallel = build_entries(Arc::new(StubSource), input, 8).await;
        assert_eq!(serial, parallel);
    }

    #[tokio::test]
    async fn zero_jobs_clamps_to_one() {
        let out = build_entries(Arc::new(StubSource), dirs(&["aa"]), 0).await;
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn empty_scan_yields_empty_entries() {
        let out = build_entries(Arc::new(StubSource), Vec::new(), 4).await;
        assert!(out.is_empty());
    }
}
