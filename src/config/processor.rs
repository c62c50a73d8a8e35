//! Configuration processing.
//!
//! Runs once per boot, after interactive editing: expands home-directory
//! shorthand in path-typed options and settles the run-scoped defaults
//! (project name from the source directory, project version from the run
//! id). Malformed path values are user-facing configuration errors.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::options::{self, OptionKind, ScanOptions, DEFINITIONS};
use crate::config::source::PropertyOrigin;
use crate::error::{CairnError, Result};
use crate::run::RunId;

/// Process the option set for this run.
pub fn process(options: &mut ScanOptions, run_id: &RunId) -> Result<()> {
    let home = dirs::home_dir();

    let path_keys: Vec<&'static str> = DEFINITIONS
        .iter()
        .filter(|d| d.kind == OptionKind::Path)
        .map(|d| d.key)
        .collect();

    for key in path_keys {
        let value = options.value(key).to_string();
        let resolved = resolve_tilde(home.as_deref(), &value)?;
        if resolved != value {
            debug!("{}: '{}' resolved to '{}'", key, value, resolved);
            let origin = options.origin(key);
            options.set_value(key, &resolved, origin);
        }
    }

    if options.value(options::PROJECT_NAME).is_empty() {
        let source = PathBuf::from(options.value(options::SOURCE_PATH));
        let resolved = source.canonicalize().unwrap_or(source);
        if let Some(name) = resolved
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
        {
            options.set_value(options::PROJECT_NAME, &name, PropertyOrigin::Default);
        }
    }

    if options.value(options::PROJECT_VERSION).is_empty() {
        let version = run_id.to_string();
        options.set_value(options::PROJECT_VERSION, &version, PropertyOrigin::Default);
    }

    Ok(())
}

/// Expand a leading `~` against the home directory.
///
/// `~` and `~/...` expand; `~name/...` (named-user shorthand) is not
/// supported and reports a configuration error. Anything else passes
/// through unchanged.
fn resolve_tilde(home: Option<&Path>, value: &str) -> Result<String> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }

    let home = home.ok_or_else(|| CairnError::ConfigProcessing {
        message: format!(
            "cannot resolve '{}': the home directory could not be determined",
            value
        ),
    })?;

    if value == "~" {
        return Ok(home.display().to_string());
    }
    if let Some(rest) = value.strip_prefix("~/") {
        return Ok(home.join(rest).display().to_string());
    }

    Err(CairnError::ConfigProcessing {
        message: format!(
            "unsupported path '{}': '~user' shorthand is not resolved, use an absolute path",
            value
        ),
    })
}
