//! repodev - maintenance tooling for a PKGBUILD package repository.
//!
//! The repository layout is one directory per package, each holding a
//! `PKGBUILD` plus whatever install scripts and patches the package needs.
//! `repodev` scaffolds new package directories, drives `makepkg` builds,
//! and aggregates every manifest into a `packages.json` index consumed by
//! the repository's download tooling.
//!
//! # Architecture
//!
//! - **Delegated parsing**: PKGBUILDs are bash, so field extraction sources
//!   the manifest in a `bash` subprocess rather than reimplementing the
//!   grammar. See [`manifest`].
//! - **Bounded fan-out**: index aggregation runs one blocking task per
//!   package, capped at the host's parallelism, and restores scan order
//!   afterwards so output is deterministic. See [`indexer`].
//! - **Two-phase writes**: the index writer stages new content in a temp
//!   file and keeps the previous generation as `packages.json.bak`, so a
//!   crash never leaves a torn index. See [`index`].

pub mod index;
pub mod indexer;
pub mod makepkg;
pub mod manifest;
pub mod repo;
pub mod ui;

/// Version reported by the binary and recorded in the index `tools` map.
///
/// Derived from `git describe` at build time, falling back to the Cargo
/// package version outside a git checkout.
pub fn version() -> &'static str {
    env!("REPODEV_VERSION")
}
