//! The assembled run context.

use crate::config::ScanOptions;
use crate::diagnostics::DiagnosticsManager;
use crate::run::{FileManager, RunId, ToolInfo};
use crate::server::ServerServices;
use crate::telemetry::TelemetryManager;

/// Everything the scan needs, assembled exactly once by a successful boot
/// and owned by the caller for the rest of the process lifetime.
pub struct RunContext {
    pub options: ScanOptions,
    pub run_id: RunId,
    pub tool: ToolInfo,
    pub files: FileManager,
    pub telemetry: TelemetryManager,
    pub diagnostics: DiagnosticsManager,
    pub server: Box<dyn ServerServices>,
}
