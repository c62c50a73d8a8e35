//! Configuration printing.
//!
//! The resolved option table prints once per boot (unless suppressed);
//! accumulated warnings always print.

use std::io::Write;

use console::style;

use crate::config::options::ScanOptions;
use crate::config::source::PropertyOrigin;
use crate::error::Result;

/// Print the resolved configuration, sorted by key.
///
/// Values that came from somewhere other than the defaults are tagged with
/// their origin; secret-bearing values are masked.
pub fn print(out: &mut dyn Write, options: &ScanOptions) -> Result<()> {
    writeln!(out, "{}", style("Current configuration:").bold())?;
    for option in options.iter() {
        let value = display_value(option.definition.key, &option.value);
        match option.origin {
            PropertyOrigin::Default => writeln!(out, "  {} = {}", option.definition.key, value)?,
            origin => writeln!(
                out,
                "  {} = {} [{}]",
                option.definition.key,
                value,
                origin.label()
            )?,
        }
    }
    Ok(())
}

/// Print accumulated option warnings (deprecations, unknown properties).
pub fn print_warnings(out: &mut dyn Write, options: &ScanOptions) -> Result<()> {
    for warning in options.warnings() {
        writeln!(out, "{} {}", style("WARNING:").yellow().bold(), warning)?;
    }
    Ok(())
}

fn display_value(key: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if key.contains("token") || key.contains("password") {
        "********".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options;
    use crate::config::source::PropertySource;
    use std::collections::HashMap;

    fn options_from(pairs: &[(&str, &str)]) -> ScanOptions {
        let mut source = PropertySource::new();
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        source.push_layer(PropertyOrigin::Environment, values);
        ScanOptions::load(&source)
    }

    fn rendered(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn print_lists_every_option() {
        let options = options_from(&[]);
        let output = rendered(|buf| print(buf, &options).unwrap());
        for definition in options::DEFINITIONS {
            assert!(output.contains(definition.key), "missing {}", definition.key);
        }
    }

    #[test]
    fn print_tags_non_default_origins() {
        let options = options_from(&[("cairn.offline.mode", "true")]);
        let output = rendered(|buf| print(buf, &options).unwrap());
        assert!(output.contains("cairn.offline.mode = true [env]"));
        assert!(output.contains("cairn.cleanup = true\n"));
    }

    #[test]
    fn print_masks_token_values() {
        let options = options_from(&[("cairn.server.api.token", "s3cret-value")]);
        let output = rendered(|buf| print(buf, &options).unwrap());
        assert!(!output.contains("s3cret-value"));
        assert!(output.contains("cairn.server.api.token = ********"));
    }

    #[test]
    fn empty_values_are_not_masked() {
        let options = options_from(&[]);
        let output = rendered(|buf| print(buf, &options).unwrap());
        assert!(output.contains("cairn.server.api.token = \n"));
    }

    #[test]
    fn warnings_print_each_on_its_own_line() {
        let options = options_from(&[
            ("cairn.server.host", "https://legacy.example.com"),
            ("cairn.mystery", "x"),
        ]);
        let output = rendered(|buf| print_warnings(buf, &options).unwrap());
        assert!(output.contains("deprecated"));
        assert!(output.contains("cairn.mystery"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn no_warnings_prints_nothing() {
        let options = options_from(&[]);
        let output = rendered(|buf| print_warnings(buf, &options).unwrap());
        assert!(output.is_empty());
    }
}
