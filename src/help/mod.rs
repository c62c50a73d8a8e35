//! Help output: text listings, the HTML help document, and tool info.

pub mod document;
pub mod printer;

use std::io::Write;

use console::style;

use crate::error::Result;
use crate::run::ToolInfo;

pub use document::HelpDocumentWriter;
pub use printer::HelpPrinter;

/// Print the tool identity banner.
pub fn print_tool_info(out: &mut dyn Write, tool: &ToolInfo) -> Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        style(tool.name).bold(),
        tool.version,
        tool.os
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_info_banner_has_name_and_version() {
        let mut buf = Vec::new();
        print_tool_info(&mut buf, &ToolInfo::current()).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("cairn"));
        assert!(output.contains(env!("CARGO_PKG_VERSION")));
    }
}
