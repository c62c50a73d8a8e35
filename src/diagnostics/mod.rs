//! Diagnostics collection for a run.
//!
//! Diagnostics are opt-in via the `-d`/`-dp` boot flags. When enabled, the
//! manager owns a per-run diagnostics directory and collects the artifacts
//! later phases register. Protected mode additionally admits files that may
//! contain project contents. Diagnostics never fail the boot: if the
//! directory cannot be created, collection is disabled with a warning.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{options, ScanOptions};
use crate::run::RunId;

/// Diagnostics collection mode for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiagnosticsMode {
    Disabled,
    Enabled { protected: bool },
}

/// Owns the diagnostics directory and the registered artifacts.
#[derive(Debug)]
pub struct DiagnosticsManager {
    mode: DiagnosticsMode,
    directory: Option<PathBuf>,
    artifacts: Vec<PathBuf>,
}

impl DiagnosticsManager {
    /// Build the manager from configuration, run identity, and the boot
    /// flags. Never fails.
    pub fn new(
        scan_options: &ScanOptions,
        run_id: &RunId,
        diagnostic: bool,
        diagnostic_protected: bool,
    ) -> Self {
        if !diagnostic && !diagnostic_protected {
            return Self {
                mode: DiagnosticsMode::Disabled,
                directory: None,
                artifacts: Vec::new(),
            };
        }

        let directory = PathBuf::from(scan_options.value(options::OUTPUT_PATH))
            .join("diagnostics")
            .join(run_id.to_string());
        match std::fs::create_dir_all(&directory) {
            Ok(()) => {
                debug!("Diagnostics directory: {}", directory.display());
                Self {
                    mode: DiagnosticsMode::Enabled {
                        protected: diagnostic_protected,
                    },
                    directory: Some(directory),
                    artifacts: Vec::new(),
                }
            }
            Err(e) => {
                warn!(
                    "Could not create diagnostics directory {}: {}; diagnostics disabled",
                    directory.display(),
                    e
                );
                Self {
                    mode: DiagnosticsMode::Disabled,
                    directory: None,
                    artifacts: Vec::new(),
                }
            }
        }
    }

    /// Whether diagnostics collection is active.
    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, DiagnosticsMode::Enabled { .. })
    }

    /// Whether protected files are admitted.
    pub fn is_protected(&self) -> bool {
        matches!(
            self.mode,
            DiagnosticsMode::Enabled { protected: true }
        )
    }

    /// The diagnostics directory, when enabled.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Register an artifact for collection. Protected artifacts are dropped
    /// unless protected mode is on.
    pub fn register_artifact(&mut self, path: &Path, protected: bool) {
        if !self.is_enabled() {
            return;
        }
        if protected && !self.is_protected() {
            debug!(
                "Skipping protected artifact {} (run with -dp to include it)",
                path.display()
            );
            return;
        }
        self.artifacts.push(path.to_path_buf());
    }

    /// Artifacts registered so far.
    pub fn artifacts(&self) -> &[PathBuf] {
        &self.artifacts
    }
}
