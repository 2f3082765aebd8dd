//! Costs report layout: overview plus one breakdown page per loop with
//! recorded spend. A project with no recorded spend gets the cover and an
//! overview page saying so, and no breakdown pages.

use super::{cover, escape, hours, money, page};
use crate::model::{ExplorationLoop, Project, RefSection};

pub(crate) fn markup(project: &Project) -> String {
    let mut pages = vec![cover(project, "Costs Report")];

    if !project.has_spend() {
        pages.push(page(
            "Costs Overview",
            "<p>No costs or hours have been recorded for this project.</p>",
        ));
        return pages.join("\n");
    }

    pages.push(page("Costs Overview", &overview_body(project)));

    for l in project.loops.iter().filter(|l| l.has_spend()) {
        pages.push(page(&format!("Loop: {}", l.question), &loop_body(project, l)));
    }

    pages.join("\n")
}

fn overview_body(project: &Project) -> String {
    let mut body = String::from("<ul>\n");
    if project.total_cost > 0.0 || project.total_hours > 0.0 {
        body.push_str(&format!(
            "<li>Project level: {} over {}</li>\n",
            money(project.total_cost),
            hours(project.total_hours)
        ));
    }
    for l in project.loops.iter().filter(|l| l.has_spend()) {
        body.push_str(&format!(
            "<li>{}: {} over {}</li>\n",
            escape(&l.question),
            money(l.cost),
            hours(l.hours_spent)
        ));
    }
    body.push_str("</ul>\n");
    body.push_str(&format!(
        "<p><strong>Total: {} over {}</strong></p>",
        money(project.recorded_cost()),
        hours(project.recorded_hours())
    ));
    body
}

fn loop_body(project: &Project, l: &ExplorationLoop) -> String {
    let mut body = format!(
        "<p>Cost: {} &middot; Hours: {}</p>\n",
        money(l.cost),
        hours(l.hours_spent)
    );

    let invoices: Vec<String> = l
        .artifact_refs(RefSection::Invoices)
        .iter()
        .filter_map(|id| project.artifact(id))
        .map(|a| format!("<li>{}</li>", escape(&a.name)))
        .collect();
    if !invoices.is_empty() {
        body.push_str(&format!(
            "<h2>Invoices</h2>\n<ul>\n{}\n</ul>",
            invoices.join("\n")
        ));
    }

    body.trim_end().to_string()
}
