//! Document export: projects a fully loaded project aggregate into one of
//! four fixed report layouts, then hands the markup to a renderer to produce
//! a shareable document.
//!
//! Markup generation is pure string templating over in-memory data; one
//! `<section class="page">` per logical page. Sections are emitted only when
//! their data is non-empty. The exporter does no project lookup.

mod costs;
mod executive;
mod process;
mod render;
mod timeline;

pub use render::{DocumentRenderer, HtmlFileRenderer};

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::error::{ExportError, ExportResult};
use crate::model::{LoopItem, Project};

/// Report layout selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Cover, overview, key artifacts, merged decisions, loop summary.
    #[default]
    Executive,
    /// Full process report: framing plus one page per loop.
    Process,
    /// Chronological event timeline.
    Timeline,
    /// Cost and hour breakdown.
    Costs,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Executive => write!(f, "executive"),
            ReportFormat::Process => write!(f, "process"),
            ReportFormat::Timeline => write!(f, "timeline"),
            ReportFormat::Costs => write!(f, "costs"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "executive" => Ok(ReportFormat::Executive),
            "process" => Ok(ReportFormat::Process),
            "timeline" => Ok(ReportFormat::Timeline),
            "costs" => Ok(ReportFormat::Costs),
            _ => Err(ExportError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Build the markup document for a project in the given format.
pub fn build_markup(project: &Project, format: ReportFormat) -> String {
    match format {
        ReportFormat::Executive => executive::markup(project),
        ReportFormat::Process => process::markup(project),
        ReportFormat::Timeline => timeline::markup(project),
        ReportFormat::Costs => costs::markup(project),
    }
}

/// Turns report markup into shareable document files via an injected
/// renderer.
pub struct Exporter {
    renderer: Box<dyn DocumentRenderer>,
}

impl Exporter {
    /// Create an exporter over the given renderer.
    pub fn new(renderer: Box<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }

    /// Export a fully loaded project in the given format, returning the path
    /// of the generated document. A renderer failure is logged and
    /// propagated unchanged; no partial output is kept.
    pub fn export(&self, project: &Project, format: ReportFormat) -> ExportResult<PathBuf> {
        let markup = build_markup(project, format);
        let file_stem = format!("{}-{}", slug(&project.title), format);
        match self.renderer.render(&markup, &file_stem) {
            Ok(path) => {
                info!(project_id = %project.id, format = %format, path = %path.display(), "Report exported");
                Ok(path)
            }
            Err(e) => {
                error!(project_id = %project.id, format = %format, error = %e, "Report export failed");
                Err(e)
            }
        }
    }
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "project".to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Shared markup helpers
// ---------------------------------------------------------------------------

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn page(title: &str, body: &str) -> String {
    format!(
        "<section class=\"page\">\n<h1>{}</h1>\n{}\n</section>",
        escape(title),
        body
    )
}

pub(crate) fn cover(project: &Project, subtitle: &str) -> String {
    let body = format!(
        "<p class=\"subtitle\">{}</p>\n<p class=\"date\">{}</p>",
        escape(subtitle),
        date(&Utc::now())
    );
    page(&project.title, &body)
}

// Currency symbol is fixed; the stored currency preference is deliberately
// not consulted here.
pub(crate) fn money(value: f64) -> String {
    format!("${:.2}", value)
}

pub(crate) fn hours(value: f64) -> String {
    format!("{:.1}h", value)
}

pub(crate) fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub(crate) fn item_list(items: &[LoopItem]) -> String {
    let entries: Vec<String> = items
        .iter()
        .map(|i| {
            if i.favorite {
                format!("<li class=\"favorite\">{}</li>", escape(&i.text))
            } else {
                format!("<li>{}</li>", escape(&i.text))
            }
        })
        .collect();
    format!("<ul>\n{}\n</ul>", entries.join("\n"))
}
