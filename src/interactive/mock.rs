//! Mock interactive editor for tests.

use std::collections::HashMap;

use crate::config::source::PropertyOrigin;
use crate::config::ScanOptions;
use crate::error::Result;

use super::InteractiveEditor;

/// Records invocations and applies preset answers.
#[derive(Debug, Default)]
pub struct MockEditor {
    answers: HashMap<String, String>,
    edit_count: usize,
}

impl MockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset an answer to apply on the next edit.
    pub fn set_answer(&mut self, key: &str, value: &str) {
        self.answers.insert(key.to_string(), value.to_string());
    }

    /// How many times the editor ran.
    pub fn edit_count(&self) -> usize {
        self.edit_count
    }
}

impl InteractiveEditor for MockEditor {
    fn edit(&mut self, options: &mut ScanOptions) -> Result<()> {
        self.edit_count += 1;
        for (key, value) in &self.answers {
            options.set_value(key, value, PropertyOrigin::Interactive);
        }
        Ok(())
    }
}
