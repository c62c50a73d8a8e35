//! Run identity and per-run file management.

pub mod files;

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use files::FileManager;

/// A unique run identifier.
///
/// Format: `<UTC timestamp, second precision>-<8 hex chars>`, e.g.
/// `2026-08-07-14-31-12-3f9ac210`. The timestamp names the run directory;
/// the suffix keeps concurrent runs on the same second apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId {
    timestamp: DateTime<Utc>,
    suffix: String,
}

impl RunId {
    /// Generate a new run id.
    pub fn new() -> Self {
        let uuid = Uuid::new_v4();
        let suffix = uuid.simple().to_string()[..8].to_string();
        Self {
            timestamp: Utc::now(),
            suffix,
        }
    }

    /// When the run started.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The id as a string.
    pub fn as_str(&self) -> String {
        self.to_string()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.timestamp.format("%Y-%m-%d-%H-%M-%S"),
            self.suffix
        )
    }
}

/// Identity of the running tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub os: &'static str,
}

impl ToolInfo {
    /// The current build's identity.
    pub fn current() -> Self {
        Self {
            name: "cairn",
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
        }
    }
}
