//! File-presence applicability pass.
//!
//! Decides which capabilities apply to a source tree by checking for the
//! marker files each package manager leaves behind. This is only the
//! applicability decision; detector internals live elsewhere.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use super::Capability;

/// Marker files for a capability. Any match makes the capability applicable.
fn marker_files(capability: Capability) -> &'static [&'static str] {
    match capability {
        Capability::Cargo => &["Cargo.toml"],
        Capability::Cocoapods => &["Podfile", "Podfile.lock"],
        Capability::Composer => &["composer.json", "composer.lock"],
        Capability::Conda => &["environment.yml", "environment.yaml"],
        Capability::Docker => &["Dockerfile"],
        Capability::Go => &["go.mod"],
        Capability::Gradle => &["build.gradle", "build.gradle.kts"],
        Capability::Hex => &["mix.exs"],
        Capability::Maven => &["pom.xml"],
        Capability::Npm => &["package.json"],
        Capability::Nuget => &["packages.config", "nuget.config"],
        Capability::Pip => &["requirements.txt", "setup.py", "pyproject.toml"],
        Capability::Rubygems => &["Gemfile", "Gemfile.lock"],
        Capability::Sbt => &["build.sbt"],
        Capability::Yarn => &["yarn.lock"],
    }
}

/// Check if any of the files exist relative to the source root.
fn any_file_exists(source_root: &Path, files: &[&str]) -> Option<String> {
    files
        .iter()
        .find(|f| source_root.join(f).exists())
        .map(|f| f.to_string())
}

/// Determine the applicable capabilities for a source tree.
pub fn applicable_capabilities(source_root: &Path) -> BTreeSet<Capability> {
    let mut applicable = BTreeSet::new();
    for capability in Capability::ALL {
        if let Some(marker) = any_file_exists(source_root, marker_files(capability)) {
            debug!("{} applies: found {}", capability, marker);
            applicable.insert(capability);
        }
    }
    applicable
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_tree_has_no_applicable_capabilities() {
        let temp = TempDir::new().unwrap();
        assert!(applicable_capabilities(temp.path()).is_empty());
    }

    #[test]
    fn marker_file_makes_capability_applicable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();

        let applicable = applicable_capabilities(temp.path());
        assert!(applicable.contains(&Capability::Cargo));
        assert_eq!(applicable.len(), 1);
    }

    #[test]
    fn any_marker_is_enough() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Gemfile.lock"), "").unwrap();

        let applicable = applicable_capabilities(temp.path());
        assert!(applicable.contains(&Capability::Rubygems));
    }

    #[test]
    fn multiple_capabilities_can_apply() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        fs::write(temp.path().join("Dockerfile"), "FROM scratch").unwrap();

        let applicable = applicable_capabilities(temp.path());
        assert!(applicable.contains(&Capability::Npm));
        assert!(applicable.contains(&Capability::Yarn));
        assert!(applicable.contains(&Capability::Docker));
        assert_eq!(applicable.len(), 3);
    }
}
