//! Per-run output directory management.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::options::{self, ScanOptions};
use crate::error::Result;
use crate::run::RunId;

/// Owns the run directory `<output>/runs/<run-id>` and its subdirectories.
#[derive(Debug)]
pub struct FileManager {
    run_directory: PathBuf,
    cleanup: bool,
}

impl FileManager {
    /// Create the run directory under the configured output path.
    ///
    /// Expects the output path to be fully resolved (tilde expansion happens
    /// during configuration processing).
    pub fn new(options: &ScanOptions, run_id: &RunId) -> Result<Self> {
        let run_directory = PathBuf::from(options.value(options::OUTPUT_PATH))
            .join("runs")
            .join(run_id.to_string());
        std::fs::create_dir_all(&run_directory)?;
        debug!("Run directory: {}", run_directory.display());

        Ok(Self {
            run_directory,
            cleanup: options.bool_value(options::CLEANUP),
        })
    }

    /// The run directory.
    pub fn run_directory(&self) -> &Path {
        &self.run_directory
    }

    /// A named subdirectory of the run directory, created on demand.
    pub fn subdirectory(&self, name: &str) -> Result<PathBuf> {
        let dir = self.run_directory.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write a file into the run directory.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.run_directory.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Apply the cleanup policy: delete the run directory when
    /// `cairn.cleanup` is set.
    pub fn apply_cleanup(&self) -> Result<()> {
        if self.cleanup {
            info!("Cleaning up {}", self.run_directory.display());
            std::fs::remove_dir_all(&self.run_directory)?;
        }
        Ok(())
    }
}
