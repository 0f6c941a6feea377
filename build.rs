//! Embeds a git-derived version into the binary at compile time, so
//! tagged releases report the tag instead of a hand-synced Cargo version.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=REPODEV_VERSION={version}");
}

/// `git describe` output with any leading tag `v` stripped; `None` when
/// building outside a checkout (e.g. from a source tarball).
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=-dev"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let raw = String::from_utf8(output.stdout).ok()?;
    Some(raw.trim().trim_start_matches('v').to_string())
}
