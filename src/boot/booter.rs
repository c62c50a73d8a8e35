//! The boot sequencer.
//!
//! Boot is a fixed, linear pipeline of gates. Each gate either ends the
//! process with a terminal [`BootOutcome`] (help output, connectivity test,
//! clean disable) or falls through to the next; there is no backtracking.
//! The first failure wins: option validation and configuration processing
//! raise user-facing errors, while establishing the server session raises
//! integration errors unwrapped.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::boot::{BootOutcome, RunContext};
use crate::cli::ArgumentState;
use crate::config::{options, printer, processor, PropertySource, ScanOptions};
use crate::diagnostics::DiagnosticsManager;
use crate::error::{CairnError, Result};
use crate::help::{self, HelpDocumentWriter, HelpPrinter};
use crate::interactive::InteractiveEditor;
use crate::run::{FileManager, RunId, ToolInfo};
use crate::server::ServerConnector;
use crate::telemetry::TelemetryManager;

/// Runs the boot sequence once per process.
///
/// Collaborators are injected so the sequence can run against mocks: the
/// editor owns interactive input, the connector builds the server handle,
/// and all printing goes to `out`.
pub struct Booter<'a> {
    out: &'a mut dyn Write,
    editor: &'a mut dyn InteractiveEditor,
    connector: &'a dyn ServerConnector,
}

impl<'a> Booter<'a> {
    pub fn new(
        out: &'a mut dyn Write,
        editor: &'a mut dyn InteractiveEditor,
        connector: &'a dyn ServerConnector,
    ) -> Self {
        Self {
            out,
            editor,
            connector,
        }
    }

    /// Run the boot sequence.
    ///
    /// Returns `Exit` for the terminal gates (help, help document,
    /// connectivity test, disable-without-server) and `Continue` with the
    /// assembled [`RunContext`] otherwise.
    pub fn boot(self, args: &[String], source: &PropertySource) -> Result<BootOutcome> {
        let run_id = RunId::new();
        let tool = ToolInfo::current();
        let mut scan_options = ScanOptions::load(source);

        let state = ArgumentState::parse(args);

        if state.wants_help() {
            HelpPrinter.print_appropriate(self.out, &scan_options, &state)?;
            return Ok(BootOutcome::Exit);
        }

        if state.help_document {
            HelpDocumentWriter::new(&tool).write(Path::new("."), &scan_options)?;
            return Ok(BootOutcome::Exit);
        }

        help::print_tool_info(self.out, &tool)?;

        if state.interactive {
            self.editor.edit(&mut scan_options)?;
        }

        processor::process(&mut scan_options, &run_id)?;

        scan_options.post_init();
        info!("Configuration processed completely.");

        let diagnostics = DiagnosticsManager::new(
            &scan_options,
            &run_id,
            state.diagnostic,
            state.diagnostic_protected,
        );

        if !scan_options.bool_value(options::SUPPRESS_CONFIGURATION_OUTPUT) {
            printer::print(self.out, &scan_options)?;
        }
        printer::print_warnings(self.out, &scan_options)?;

        if let Some(failure) = scan_options.first_invalid() {
            return Err(CairnError::InvalidConfiguration {
                message: failure.message.clone(),
            });
        }

        let mut server = self.connector.connect(&scan_options)?;

        if scan_options.bool_value(options::TEST_CONNECTION) {
            // The probe reports its own result; this gate always exits.
            server.test_connection();
            return Ok(BootOutcome::Exit);
        }

        if scan_options.bool_value(options::DISABLE_WITHOUT_SERVER) && !server.test_connection() {
            info!(
                "{} is set to 'true' and the server is unreachable, so Cairn will not run.",
                options::DISABLE_WITHOUT_SERVER
            );
            return Ok(BootOutcome::Exit);
        }

        let mut telemetry = TelemetryManager::new(tool.clone(), &scan_options);
        if scan_options.bool_value(options::OFFLINE_MODE) {
            telemetry.init_offline();
        } else {
            server.init()?;
            telemetry.init(
                server.registration_id().map(str::to_string),
                server.base_url(),
            );
        }

        let files = FileManager::new(&scan_options, &run_id)?;

        Ok(BootOutcome::Continue(Box::new(RunContext {
            options: scan_options,
            run_id,
            tool,
            files,
            telemetry,
            diagnostics,
            server,
        })))
    }
}
