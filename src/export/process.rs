//! Process report layout: framing plus one page per exploration loop.

use super::{cover, date, escape, item_list, page};
use crate::model::{ExplorationLoop, Framing, FramingItem, Project, RefSection};

pub(crate) fn markup(project: &Project) -> String {
    let mut pages = vec![cover(project, "Process Report")];

    if let Some(framing) = &project.framing {
        let body = framing_body(framing);
        if !body.is_empty() {
            pages.push(page("Framing", &body));
        }
    }

    for l in &project.loops {
        pages.push(page(&format!("Loop: {}", l.question), &loop_body(project, l)));
    }

    pages.join("\n")
}

fn framing_body(framing: &Framing) -> String {
    let mut body = String::new();
    if let Some(origin) = &framing.origin {
        body.push_str(&format!("<p><strong>Origin:</strong> {}</p>\n", escape(origin)));
    }
    if let Some(purpose) = &framing.purpose {
        body.push_str(&format!("<p><strong>Purpose:</strong> {}</p>\n", escape(purpose)));
    }
    push_framing_items(&mut body, "Certainties", &framing.certainties);
    push_framing_items(&mut body, "Design Space", &framing.design_space);
    push_framing_items(&mut body, "First Questions", &framing.exploration_questions);
    if !framing.decisions.is_empty() {
        body.push_str("<h2>Framing Decisions</h2>\n<ul>\n");
        for d in &framing.decisions {
            body.push_str(&format!(
                "<li><strong>{}</strong> {}</li>\n",
                date(&d.decided_at),
                escape(&d.summary)
            ));
        }
        body.push_str("</ul>\n");
    }
    body.trim_end().to_string()
}

fn push_framing_items(body: &mut String, title: &str, items: &[FramingItem]) {
    if items.is_empty() {
        return;
    }
    body.push_str(&format!("<h2>{}</h2>\n<ul>\n", title));
    for item in items {
        match &item.category {
            Some(category) => body.push_str(&format!(
                "<li>{} <em>({})</em></li>\n",
                escape(&item.text),
                escape(category)
            )),
            None => body.push_str(&format!("<li>{}</li>\n", escape(&item.text))),
        }
    }
    body.push_str("</ul>\n");
}

fn loop_body(project: &Project, l: &ExplorationLoop) -> String {
    let mut body = format!(
        "<p>Status: {} &middot; started {}</p>\n",
        l.status,
        date(&l.started_at)
    );

    for (title, items) in [
        ("Explore", &l.explore),
        ("Build", &l.build),
        ("Check", &l.check),
        ("Adapt", &l.adapt),
    ] {
        if !items.is_empty() {
            body.push_str(&format!("<h2>{}</h2>\n{}\n", title, item_list(items)));
        }
    }

    for (title, section) in [
        ("Explore Artifacts", RefSection::Explore),
        ("Build Artifacts", RefSection::Build),
    ] {
        let names: Vec<String> = l
            .artifact_refs(section)
            .iter()
            .filter_map(|id| project.artifact(id))
            .map(|a| format!("<li>{} <em>({})</em></li>", escape(&a.name), a.kind))
            .collect();
        if !names.is_empty() {
            body.push_str(&format!(
                "<h2>{}</h2>\n<ul>\n{}\n</ul>\n",
                title,
                names.join("\n")
            ));
        }
    }

    if !l.decisions.is_empty() {
        body.push_str("<h2>Decisions</h2>\n<ul>\n");
        for d in &l.decisions {
            body.push_str(&format!(
                "<li><strong>{}</strong> {}</li>\n",
                date(&d.decided_at),
                escape(&d.summary)
            ));
        }
        body.push_str("</ul>\n");
    }

    if !l.next_questions.is_empty() {
        body.push_str(&format!(
            "<h2>Next Questions</h2>\n{}\n",
            item_list(&l.next_questions)
        ));
    }

    body.trim_end().to_string()
}
