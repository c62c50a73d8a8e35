//! Scan entry point.
//!
//! This is the boundary to the main scan: it runs the applicability pass,
//! enforces the required-detector gate, records telemetry, and writes the
//! run summary. Detector internals stay behind
//! [`crate::capability::detection`].

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::boot::RunContext;
use crate::capability::{self, detection};
use crate::config::options;
use crate::error::{CairnError, Result};

/// Run the scan against an assembled boot context.
pub fn run(ctx: &mut RunContext, out: &mut dyn Write) -> Result<()> {
    let source_path = PathBuf::from(ctx.options.value(options::SOURCE_PATH));
    let applicable = detection::applicable_capabilities(&source_path);

    let names: Vec<&str> = applicable.iter().map(|c| c.name()).collect();
    writeln!(out, "Applicable detectors: {}", names.join(", "))?;

    let required = capability::check_required(
        ctx.options.value(options::REQUIRED_DETECTORS),
        &applicable,
    );
    if required.any_missing() {
        return Err(CairnError::RequiredDetectorsMissing {
            missing: required.missing_names(),
        });
    }

    ctx.telemetry.record_scan_started(
        applicable.iter().copied(),
        ctx.options.value(options::SCAN_MODE),
    );

    let summary = serde_json::json!({
        "runId": ctx.run_id.to_string(),
        "tool": { "name": ctx.tool.name, "version": ctx.tool.version },
        "project": {
            "name": ctx.options.value(options::PROJECT_NAME),
            "version": ctx.options.value(options::PROJECT_VERSION),
        },
        "detectors": names,
    });
    let summary =
        serde_json::to_string_pretty(&summary).context("failed to serialize scan summary")?;
    let summary_path = ctx.files.write_file("scan-summary.json", &summary)?;
    ctx.diagnostics.register_artifact(&summary_path, false);

    info!("Scan {} finished", ctx.run_id);
    ctx.files.apply_cleanup()?;
    Ok(())
}
