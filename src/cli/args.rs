//! Boot argument classification.
//!
//! The boot flags are classified by a dedicated scanner rather than a full
//! argument grammar: unrecognized tokens (including `--cairn.key=value`
//! property overrides, which belong to the configuration layer) are simply
//! ignored, and classification never fails.

/// Immutable boot flags derived from the raw argument list.
///
/// Each flag is an independent boolean; token order does not matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgumentState {
    /// Print the standard help listing and exit.
    pub help: bool,
    /// Print the full help listing, including uncommon options.
    pub verbose_help: bool,
    /// Print the deprecated-options listing.
    pub deprecated_help: bool,
    /// Write the HTML help document and exit.
    pub help_document: bool,
    /// Enter interactive configuration editing before the scan.
    pub interactive: bool,
    /// Enable diagnostics collection for this run.
    pub diagnostic: bool,
    /// Enable diagnostics collection including protected files.
    pub diagnostic_protected: bool,
}

impl ArgumentState {
    /// Classify the raw argument list.
    ///
    /// Pure classification: no side effects, no failure path.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut state = ArgumentState::default();
        for arg in args {
            match arg.as_ref() {
                "-h" | "--help" => state.help = true,
                "-hv" | "--help-verbose" => state.verbose_help = true,
                "-hd" | "--help-deprecated" => state.deprecated_help = true,
                "--help-document" => state.help_document = true,
                "-i" | "--interactive" => state.interactive = true,
                "-d" | "--diagnostic" => state.diagnostic = true,
                "-dp" | "--diagnostic-protected" => state.diagnostic_protected = true,
                _ => {}
            }
        }
        state
    }

    /// Whether any of the help-text flags is set.
    pub fn wants_help(&self) -> bool {
        self.help || self.verbose_help || self.deprecated_help
    }
}
