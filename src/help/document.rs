//! HTML help document generation.
//!
//! `--help-document` writes a standalone HTML page listing every option,
//! named `cairn-<version>-help.html`.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::options::ScanOptions;
use crate::error::Result;
use crate::run::ToolInfo;

const DOCUMENT_HEADER: &str = "\
<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Cairn options</title>
<style>
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }
th { background: #f0f0f0; }
.deprecated { color: #a00; }
</style>
</head>
<body>
";

/// Writes the HTML help document.
pub struct HelpDocumentWriter<'a> {
    tool: &'a ToolInfo,
}

impl<'a> HelpDocumentWriter<'a> {
    pub fn new(tool: &'a ToolInfo) -> Self {
        Self { tool }
    }

    /// The document filename for this tool version.
    pub fn filename(&self) -> String {
        format!("{}-{}-help.html", self.tool.name, self.tool.version)
    }

    /// Write the document into the given directory, returning its path.
    pub fn write(&self, directory: &Path, options: &ScanOptions) -> Result<PathBuf> {
        let path = directory.join(self.filename());
        let mut file = std::fs::File::create(&path)?;
        self.render(&mut file, options)?;
        info!("Wrote help document to {}", path.display());
        Ok(path)
    }

    fn render(&self, out: &mut dyn Write, options: &ScanOptions) -> Result<()> {
        out.write_all(DOCUMENT_HEADER.as_bytes())?;
        writeln!(
            out,
            "<h1>{} {} options</h1>",
            self.tool.name, self.tool.version
        )?;
        writeln!(out, "<table>")?;
        writeln!(
            out,
            "<tr><th>Option</th><th>Default</th><th>Description</th></tr>"
        )?;
        for option in options.iter() {
            let definition = option.definition;
            let (class, description) = match definition.deprecated {
                Some(note) => (" class=\"deprecated\"", format!("Deprecated: {}", note)),
                None => ("", definition.description.to_string()),
            };
            writeln!(
                out,
                "<tr{}><td>{}</td><td>{}</td><td>{}</td></tr>",
                class,
                definition.key,
                escape(definition.default),
                escape(&description)
            )?;
        }
        writeln!(out, "</table>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertySource;
    use tempfile::TempDir;

    fn default_options() -> ScanOptions {
        ScanOptions::load(&PropertySource::new())
    }

    #[test]
    fn filename_embeds_tool_version() {
        let tool = ToolInfo::current();
        let writer = HelpDocumentWriter::new(&tool);
        assert_eq!(
            writer.filename(),
            format!("cairn-{}-help.html", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn document_lists_every_option() {
        let temp = TempDir::new().unwrap();
        let tool = ToolInfo::current();
        let path = HelpDocumentWriter::new(&tool)
            .write(temp.path(), &default_options())
            .unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        for definition in crate::config::options::DEFINITIONS {
            assert!(html.contains(definition.key), "missing {}", definition.key);
        }
    }

    #[test]
    fn deprecated_options_are_marked() {
        let temp = TempDir::new().unwrap();
        let tool = ToolInfo::current();
        let path = HelpDocumentWriter::new(&tool)
            .write(temp.path(), &default_options())
            .unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("class=\"deprecated\""));
        assert!(html.contains("Deprecated: superseded by cairn.server.url"));
    }
}
