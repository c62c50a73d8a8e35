//! Detector capability identifiers and the required-capability check.
//!
//! A capability is a named category of dependency detection Cairn can
//! perform (one per supported package manager or build system). Users may
//! declare a comma-separated list of capabilities that *must* apply to the
//! scan target; [`check_required`] computes which of those are missing from
//! the set actually discovered.

pub mod detection;

use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

/// A detector capability. Closed set; parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Cargo,
    Cocoapods,
    Composer,
    Conda,
    Docker,
    Go,
    Gradle,
    Hex,
    Maven,
    Npm,
    Nuget,
    Pip,
    Rubygems,
    Sbt,
    Yarn,
}

impl Capability {
    /// All known capabilities, in display order.
    pub const ALL: [Capability; 15] = [
        Capability::Cargo,
        Capability::Cocoapods,
        Capability::Composer,
        Capability::Conda,
        Capability::Docker,
        Capability::Go,
        Capability::Gradle,
        Capability::Hex,
        Capability::Maven,
        Capability::Npm,
        Capability::Nuget,
        Capability::Pip,
        Capability::Rubygems,
        Capability::Sbt,
        Capability::Yarn,
    ];

    /// Map a raw token to a capability, case-insensitively.
    ///
    /// Returns `None` for tokens outside the closed set; never fails.
    pub fn from_token(token: &str) -> Option<Capability> {
        match token.trim().to_ascii_uppercase().as_str() {
            "CARGO" => Some(Capability::Cargo),
            "COCOAPODS" => Some(Capability::Cocoapods),
            "COMPOSER" => Some(Capability::Composer),
            "CONDA" => Some(Capability::Conda),
            "DOCKER" => Some(Capability::Docker),
            "GO" => Some(Capability::Go),
            "GRADLE" => Some(Capability::Gradle),
            "HEX" => Some(Capability::Hex),
            "MAVEN" => Some(Capability::Maven),
            "NPM" => Some(Capability::Npm),
            "NUGET" => Some(Capability::Nuget),
            "PIP" => Some(Capability::Pip),
            "RUBYGEMS" => Some(Capability::Rubygems),
            "SBT" => Some(Capability::Sbt),
            "YARN" => Some(Capability::Yarn),
            _ => None,
        }
    }

    /// Canonical upper-case name, as accepted by [`Capability::from_token`].
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Cargo => "CARGO",
            Capability::Cocoapods => "COCOAPODS",
            Capability::Composer => "COMPOSER",
            Capability::Conda => "CONDA",
            Capability::Docker => "DOCKER",
            Capability::Go => "GO",
            Capability::Gradle => "GRADLE",
            Capability::Hex => "HEX",
            Capability::Maven => "MAVEN",
            Capability::Npm => "NPM",
            Capability::Nuget => "NUGET",
            Capability::Pip => "PIP",
            Capability::Rubygems => "RUBYGEMS",
            Capability::Sbt => "SBT",
            Capability::Yarn => "YARN",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a required-capability check: the set difference
/// `required − applicable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCapabilityResult {
    missing: BTreeSet<Capability>,
}

impl RequiredCapabilityResult {
    /// Whether any required capability was missing.
    pub fn any_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    /// The missing capabilities, in display order.
    pub fn missing(&self) -> &BTreeSet<Capability> {
        &self.missing
    }

    /// Comma-separated canonical names of the missing capabilities.
    pub fn missing_names(&self) -> String {
        self.missing
            .iter()
            .map(Capability::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a comma-separated required-capability value.
///
/// Tokens that do not map to a known capability are logged as warnings and
/// dropped; duplicates collapse. An entirely unparseable value yields an
/// empty set.
pub fn parse_required(raw: &str) -> BTreeSet<Capability> {
    let mut required = BTreeSet::new();
    for token in raw.split(',') {
        if token.trim().is_empty() {
            continue;
        }
        match Capability::from_token(token) {
            Some(capability) => {
                required.insert(capability);
            }
            None => warn!("Unable to parse detector type: {}", token.trim()),
        }
    }
    required
}

/// Check a required-capability value against the applicable set.
///
/// Never fails: unparseable tokens are dropped (with a warning) during
/// parsing, so an entirely unparseable value yields no missing capabilities.
pub fn check_required(
    raw: &str,
    applicable: &BTreeSet<Capability>,
) -> RequiredCapabilityResult {
    let required = parse_required(raw);
    let missing = required.difference(applicable).copied().collect();
    RequiredCapabilityResult { missing }
}
