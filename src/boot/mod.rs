//! Boot sequencing: from raw arguments and configuration to either an
//! early exit or an assembled [`RunContext`].

pub mod booter;
pub mod context;

use std::fmt;

pub use booter::Booter;
pub use context::RunContext;

/// The result of a boot sequence: exactly one of the two variants.
///
/// A [`RunContext`] exists if and only if the outcome is `Continue`.
pub enum BootOutcome {
    /// A terminal gate fired; the process should exit successfully.
    Exit,
    /// Boot completed; the scan owns the assembled context.
    Continue(Box<RunContext>),
}

impl BootOutcome {
    /// Whether this outcome carries a run context.
    pub fn is_continue(&self) -> bool {
        matches!(self, BootOutcome::Continue(_))
    }
}

impl fmt::Debug for BootOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootOutcome::Exit => write!(f, "Exit"),
            BootOutcome::Continue(_) => write!(f, "Continue(RunContext)"),
        }
    }
}
