//! Executive overview layout: the short read for stakeholders.

use super::{cover, date, escape, hours, item_list, money, page};
use crate::model::Project;

pub(crate) fn markup(project: &Project) -> String {
    let mut pages = vec![cover(project, "Executive Overview")];

    pages.push(page("Overview", &overview_body(project)));

    let favorites: Vec<_> = project.favorite_artifacts().collect();
    if !favorites.is_empty() {
        let entries: Vec<String> = favorites
            .iter()
            .map(|a| {
                let mut entry = format!("<li>{} <em>({})</em>", escape(&a.name), a.kind);
                if let Some(caption) = &a.caption {
                    entry.push_str(&format!(" &mdash; {}", escape(caption)));
                }
                entry.push_str("</li>");
                entry
            })
            .collect();
        pages.push(page(
            "Key Artifacts",
            &format!("<ul>\n{}\n</ul>", entries.join("\n")),
        ));
    }

    let decisions = project.chronological_decisions();
    if !decisions.is_empty() {
        let entries: Vec<String> = decisions
            .iter()
            .map(|d| {
                let mut entry = format!(
                    "<li><strong>{}</strong> {}",
                    date(&d.decided_at),
                    escape(&d.summary)
                );
                if let Some(rationale) = &d.rationale {
                    entry.push_str(&format!("<br><em>{}</em>", escape(rationale)));
                }
                entry.push_str("</li>");
                entry
            })
            .collect();
        pages.push(page(
            "Decisions",
            &format!("<ul>\n{}\n</ul>", entries.join("\n")),
        ));
    }

    if !project.loops.is_empty() {
        let mut body = String::new();
        for l in &project.loops {
            body.push_str(&format!(
                "<h2>{}</h2>\n<p>Status: {} &middot; {} explore, {} build, {} check, {} adapt</p>\n",
                escape(&l.question),
                l.status,
                l.explore.len(),
                l.build.len(),
                l.check.len(),
                l.adapt.len(),
            ));
            let highlights: Vec<_> = l
                .adapt
                .iter()
                .filter(|i| i.favorite)
                .cloned()
                .collect();
            if !highlights.is_empty() {
                body.push_str(&item_list(&highlights));
                body.push('\n');
            }
        }
        pages.push(page("Exploration Loops", &body));
    }

    pages.join("\n")
}

fn overview_body(project: &Project) -> String {
    let mut body = format!(
        "<p><strong>Phase:</strong> {}</p>\n<p><strong>Started:</strong> {}</p>",
        project.phase.label(),
        date(&project.started_at)
    );
    if let Some(description) = &project.description {
        body.push_str(&format!("\n<p>{}</p>", escape(description)));
    }
    if let Some(purpose) = &project.purpose {
        body.push_str(&format!(
            "\n<p><strong>Purpose:</strong> {}</p>",
            escape(purpose)
        ));
    }
    if project.has_spend() {
        body.push_str(&format!(
            "\n<p><strong>Recorded:</strong> {} over {}</p>",
            money(project.recorded_cost()),
            hours(project.recorded_hours())
        ));
    }
    body
}
