//! Cairn CLI entry point.

use std::process::ExitCode;

use cairn::boot::{BootOutcome, Booter};
use cairn::config::PropertySource;
use cairn::interactive::TerminalEditor;
use cairn::server::HttpConnector;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by the `CAIRN_LOG` environment variable (falling
/// back to `RUST_LOG`); the default is INFO.
fn init_tracing() {
    let filter = std::env::var("CAIRN_LOG")
        .ok()
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("cairn=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let working_dir = std::env::current_dir().unwrap_or_default();

    let source = match PropertySource::from_process(&working_dir, &args) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let mut out = std::io::stdout();
    let mut editor = TerminalEditor::new();
    let connector = HttpConnector;

    let outcome = Booter::new(&mut out, &mut editor, &connector).boot(&args, &source);
    match outcome {
        Ok(BootOutcome::Exit) => ExitCode::SUCCESS,
        Ok(BootOutcome::Continue(mut ctx)) => match cairn::scan::run(&mut ctx, &mut out) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(e.exit_code())
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
