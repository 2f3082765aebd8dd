use std::fs;
use std::path::PathBuf;

use crate::error::ExportResult;

const STYLE: &str = r#"
body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 0; color: #1a1a2e; }
section.page { padding: 48px; page-break-after: always; }
h1 { font-size: 24px; border-bottom: 2px solid #1a1a2e; padding-bottom: 8px; }
h2 { font-size: 18px; margin-top: 24px; }
li.favorite::marker { content: '\2605  '; }
p.subtitle { font-size: 18px; color: #555; }
p.date { color: #888; }
"#;

/// Converts report markup into a shareable document file.
///
/// Stands in for the platform print/share service; implementations decide
/// the concrete output format.
pub trait DocumentRenderer: Send + Sync {
    /// Render the markup and return the path of the produced file.
    fn render(&self, markup: &str, file_stem: &str) -> ExportResult<PathBuf>;
}

/// Renderer that wraps the markup in a standalone HTML document on disk.
pub struct HtmlFileRenderer {
    output_dir: PathBuf,
}

impl HtmlFileRenderer {
    /// Create a renderer writing into the given directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl DocumentRenderer for HtmlFileRenderer {
    fn render(&self, markup: &str, file_stem: &str) -> ExportResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.html", file_stem));
        let document = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            STYLE, markup
        );
        fs::write(&path, document)?;
        Ok(path)
    }
}
