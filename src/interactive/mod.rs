//! Interactive configuration editing.
//!
//! With `--interactive`, boot pauses before configuration processing and
//! lets the user adjust the connection and project options. Answers are
//! written back into the option set with the `Interactive` origin.

pub mod mock;

use console::Term;
use dialoguer::{Confirm, Input};

use crate::config::options;
use crate::config::source::PropertyOrigin;
use crate::config::ScanOptions;
use crate::error::{CairnError, Result};

pub use mock::MockEditor;

/// Trait for the interactive configuration editor.
///
/// This trait allows mocking the editor in tests.
pub trait InteractiveEditor {
    /// Edit the option set in place.
    fn edit(&mut self, options: &mut ScanOptions) -> Result<()>;
}

/// Terminal-backed editor using dialoguer prompts.
pub struct TerminalEditor {
    term: Term,
}

impl TerminalEditor {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn ask_string(&self, question: &str, current: &str) -> Result<String> {
        let input = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .default(current.to_string());
        input.interact_text_on(&self.term).map_err(map_dialoguer_err)
    }

    fn ask_bool(&self, question: &str, current: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(current)
            .interact_on(&self.term)
            .map_err(map_dialoguer_err)
    }
}

impl Default for TerminalEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveEditor for TerminalEditor {
    fn edit(&mut self, options: &mut ScanOptions) -> Result<()> {
        let url = self.ask_string("Cairn server URL", options.value(options::SERVER_URL))?;
        apply(options, options::SERVER_URL, &url);

        let token =
            self.ask_string("Server API token", options.value(options::SERVER_API_TOKEN))?;
        apply(options, options::SERVER_API_TOKEN, &token);

        let name = self.ask_string("Project name", options.value(options::PROJECT_NAME))?;
        apply(options, options::PROJECT_NAME, &name);

        let offline = self.ask_bool(
            "Run in offline mode?",
            options.bool_value(options::OFFLINE_MODE),
        )?;
        apply(options, options::OFFLINE_MODE, &offline.to_string());

        Ok(())
    }
}

/// Write an answer back, keeping the old origin when nothing changed.
fn apply(options: &mut ScanOptions, key: &str, answer: &str) {
    if options.value(key) != answer {
        options.set_value(key, answer, PropertyOrigin::Interactive);
    }
}

/// Convert dialoguer errors to CairnError.
fn map_dialoguer_err(e: dialoguer::Error) -> CairnError {
    match e {
        dialoguer::Error::IO(io) => CairnError::Io(io),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertySource;

    #[test]
    fn apply_only_touches_changed_values() {
        let mut options = ScanOptions::load(&PropertySource::new());

        apply(&mut options, options::PROJECT_NAME, "");
        assert_eq!(
            options.origin(options::PROJECT_NAME),
            PropertyOrigin::Default
        );

        apply(&mut options, options::PROJECT_NAME, "api");
        assert_eq!(options.value(options::PROJECT_NAME), "api");
        assert_eq!(
            options.origin(options::PROJECT_NAME),
            PropertyOrigin::Interactive
        );
    }
}
