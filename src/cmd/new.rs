//! New command (package scaffolding)

use std::fs;

use anyhow::{Context, Result, bail};
use repodev::repo::{self, Repo};
use repodev::ui;

/// Create a package directory from the scaffold templates.
pub fn new(repo: &Repo, name: &str) -> Result<()> {
    if !repo::is_valid_name(name) {
        bail!("'{name}' is not a valid package name");
    }
    let dir = repo.package_dir(name);
    if dir.exists() {
        bail!("package '{name}' already exists");
    }

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(dir.join(repo::MANIFEST), pkgbuild_template(name))?;
    fs::write(dir.join("readme.md"), readme_template(name))?;

    ui::success(&format!("Created {name}/"));
    ui::info(&format!(
        "Edit {name}/PKGBUILD, then run 'repodev updpkgsums {name}'"
    ));
    Ok(())
}

fn pkgbuild_template(name: &str) -> String {
    format!(
        r#"# Maintainer:

pkgname={name}
pkgver=1.0.0
pkgrel=1
pkgdesc=""
arch=('x86_64')
url=""
license=('GPL')
depends=()
makedepends=()
source=()
sha256sums=()

package() {{
    :
}}
"#
    )
}

fn readme_template(name: &str) -> String {
    format!(
        r#"# {name}

## Description

{name} package.

## Optimizations

- Built with the repository's default optimization flags.

## Installation

```bash
makepkg -si
```
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkgbuild_template_fills_in_name() {
        let body = pkgbuild_template("ripgrep");
        assert!(body.contains("pkgname=ripgrep"));
        assert!(body.contains("pkgver=1.0.0"));
        assert!(body.contains("pkgrel=1"));
        assert!(body.contains("package()"));
    }

    #[test]
    fn readme_template_has_expected_sections() {
        let body = readme_template("ripgrep");
        assert!(body.starts_with("# ripgrep"));
        assert!(body.contains("## Description"));
        assert!(body.contains("## Optimizations"));
        assert!(body.contains("## Installation"));
    }
}
