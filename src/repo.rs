//! Repository layout and git plumbing.
//!
//! A package repository is a flat directory: every immediate subdirectory
//! containing a `PKGBUILD` is a package, everything else is ignored. All
//! git interaction in the crate goes through [`Repo`] so commands never
//! spawn `git` themselves.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, bail};

/// Manifest file expected in every package directory.
pub const MANIFEST: &str = "PKGBUILD";

/// Directory names that are never package candidates, even if someone
/// drops a PKGBUILD into them.
pub const SKIP_DIRS: [&str; 7] = [
    ".git",
    ".github",
    "node_modules",
    "__pycache__",
    ".vscode",
    "patches",
    "docs",
];

/// An opened package repository rooted at a directory on disk.
///
/// Holds only immutable configuration (canonical root, resolved git
/// binary), so it is cheap to clone and safe to share across workers.
#[derive(Debug, Clone)]
pub struct Repo {
    root: PathBuf,
    git: PathBuf,
}

impl Repo {
    /// Open a repository rooted at `root`.
    ///
    /// The root is canonicalized so manifest paths handed to subprocesses
    /// are absolute regardless of each subprocess's working directory. A
    /// missing root is a hard error; a root that is not a git checkout is
    /// not, since several commands never touch git.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = root
            .canonicalize()
            .with_context(|| format!("repository root {} is not accessible", root.display()))?;
        if !root.is_dir() {
            bail!("repository root {} is not a directory", root.display());
        }
        let git = which::which("git").unwrap_or_else(|_| PathBuf::from("git"));
        Ok(Self { root, git })
    }

    /// Open the repository at the current working directory.
    pub fn open_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        Self::open(cwd)
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the package index file inside this repository.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(crate::index::INDEX_FILE)
    }

    /// Directory a package of the given name lives in (whether or not it
    /// exists yet).
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Scan the root for package directories.
    ///
    /// A package directory is an immediate subdirectory whose name is not
    /// in [`SKIP_DIRS`] and which contains a `PKGBUILD`. The result is
    /// sorted by name so every downstream consumer sees a deterministic
    /// order. Files at the root level and nested directories are never
    /// considered.
    pub fn package_dirs(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("could not read {}", self.root.display()))?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if SKIP_DIRS.contains(&name) {
                continue;
            }
            if path.join(MANIFEST).is_file() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Tracked files of one package directory, as reported by
    /// `git ls-files`, one raw line per entry.
    ///
    /// Fails when the directory is not inside a git work tree; callers
    /// treat that as a parse failure for the package rather than guessing
    /// at directory contents.
    pub fn ls_files(&self, dir: &Path) -> Result<Vec<String>> {
        let output = self.git(&["ls-files"], dir)?;
        if !output.status.success() {
            bail!(
                "git ls-files failed in {}: {}",
                dir.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Stage every change in the repository (`git add -A`).
    pub fn add_all(&self) -> Result<()> {
        let output = self.git(&["add", "-A"], &self.root)?;
        if !output.status.success() {
            bail!(
                "git add failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    /// Whether anything is staged, via `git diff --cached --quiet`.
    ///
    /// Exit 0 means a clean cache, exit 1 means staged changes; anything
    /// else is a real git failure.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.git(&["diff", "--cached", "--quiet"], &self.root)?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => bail!(
                "git diff failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }
    }

    /// Commit staged changes with the given message.
    pub fn commit(&self, message: &str) -> Result<()> {
        let output = self.git(&["commit", "-m", message], &self.root)?;
        if !output.status.success() {
            bail!(
                "git commit failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    /// Push the current branch to its upstream.
    pub fn push(&self) -> Result<()> {
        let output = self.git(&["push"], &self.root)?;
        if !output.status.success() {
            bail!(
                "git push failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    fn git(&self, args: &[&str], cwd: &Path) -> Result<Output> {
        Command::new(&self.git)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))
    }
}

/// Display name of a package directory (its final path component).
pub fn dir_name(dir: &Path) -> String {
    dir.file_name().map_or_else(
        || dir.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Whether `name` is acceptable for a new package directory.
///
/// Mirrors the pacman pkgname rules: ASCII alphanumerics plus `@._+-`,
/// not starting with a hyphen or dot. Existing directories are taken as
/// found; this only gates scaffolding.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['-', '.'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '+' | '-'))
}
