//! Text help rendering.

use std::io::Write;

use console::style;

use crate::cli::ArgumentState;
use crate::config::options::ScanOptions;
use crate::error::Result;

/// Boot flags shown in the usage section.
const FLAG_HELP: &[(&str, &str)] = &[
    ("-h, --help", "Print this help listing"),
    ("-hv, --help-verbose", "Print the full help listing, including advanced options"),
    ("-hd, --help-deprecated", "Print deprecated options only"),
    ("--help-document", "Write the HTML help document and exit"),
    ("-i, --interactive", "Edit the configuration interactively before scanning"),
    ("-d, --diagnostic", "Collect diagnostics for this run"),
    ("-dp, --diagnostic-protected", "Collect diagnostics including protected files"),
];

/// Renders the appropriate help listing for the boot flags that were set.
pub struct HelpPrinter;

impl HelpPrinter {
    /// Print the help listing selected by the argument state.
    ///
    /// `--help-deprecated` lists deprecated options only; `--help-verbose`
    /// lists everything; plain `--help` lists the common options.
    pub fn print_appropriate(
        &self,
        out: &mut dyn Write,
        options: &ScanOptions,
        state: &ArgumentState,
    ) -> Result<()> {
        if state.deprecated_help {
            self.print_deprecated(out, options)
        } else {
            self.print_listing(out, options, state.verbose_help)
        }
    }

    fn print_usage(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", style("Usage: cairn [flags] [--cairn.<key>=<value>...]").bold())?;
        writeln!(out)?;
        for (flag, description) in FLAG_HELP {
            writeln!(out, "  {:<30} {}", flag, description)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn print_listing(
        &self,
        out: &mut dyn Write,
        options: &ScanOptions,
        verbose: bool,
    ) -> Result<()> {
        self.print_usage(out)?;
        writeln!(out, "{}", style("Options:").bold())?;
        for option in options.iter() {
            let definition = option.definition;
            if definition.deprecated.is_some() {
                continue;
            }
            if definition.advanced && !verbose {
                continue;
            }
            self.print_option(out, definition.key, definition.default, definition.description)?;
        }
        if !verbose {
            writeln!(out)?;
            writeln!(out, "Run with -hv to include advanced options.")?;
        }
        Ok(())
    }

    fn print_deprecated(&self, out: &mut dyn Write, options: &ScanOptions) -> Result<()> {
        writeln!(out, "{}", style("Deprecated options:").bold())?;
        let mut any = false;
        for option in options.iter() {
            if let Some(note) = option.definition.deprecated {
                any = true;
                self.print_option(
                    out,
                    option.definition.key,
                    option.definition.default,
                    note,
                )?;
            }
        }
        if !any {
            writeln!(out, "  (none)")?;
        }
        Ok(())
    }

    fn print_option(
        &self,
        out: &mut dyn Write,
        key: &str,
        default: &str,
        description: &str,
    ) -> Result<()> {
        if default.is_empty() {
            writeln!(out, "  {:<40} {}", key, description)?;
        } else {
            writeln!(out, "  {:<40} {} (default: {})", key, description, default)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertySource;

    fn default_options() -> ScanOptions {
        ScanOptions::load(&PropertySource::new())
    }

    fn rendered(state: ArgumentState) -> String {
        let mut buf = Vec::new();
        HelpPrinter
            .print_appropriate(&mut buf, &default_options(), &state)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_help_hides_advanced_options() {
        let output = rendered(ArgumentState::parse(&["--help"]));
        assert!(output.contains("cairn.server.url"));
        assert!(!output.contains("cairn.test.connection"));
        assert!(output.contains("-hv"));
    }

    #[test]
    fn verbose_help_includes_advanced_options() {
        let output = rendered(ArgumentState::parse(&["--help-verbose"]));
        assert!(output.contains("cairn.server.url"));
        assert!(output.contains("cairn.test.connection"));
        assert!(output.contains("cairn.cleanup"));
    }

    #[test]
    fn deprecated_help_lists_only_deprecated_options() {
        let output = rendered(ArgumentState::parse(&["--help-deprecated"]));
        assert!(output.contains("cairn.server.host"));
        assert!(!output.contains("cairn.source.path"));
        assert!(!output.contains("cairn.offline.mode"));
    }

    #[test]
    fn deprecated_options_never_appear_in_listings() {
        let output = rendered(ArgumentState::parse(&["--help-verbose"]));
        assert!(!output.contains("cairn.server.host"));
    }

    #[test]
    fn usage_lists_every_boot_flag() {
        let output = rendered(ArgumentState::parse(&["--help"]));
        for (flag, _) in FLAG_HELP {
            assert!(output.contains(flag), "missing flag {}", flag);
        }
    }
}
