//! Timeline layout: every dated event in the project, oldest first.

use chrono::{DateTime, Utc};

use super::{cover, date, escape, page};
use crate::model::Project;

pub(crate) struct TimelineEvent {
    pub at: DateTime<Utc>,
    pub label: String,
    pub detail: Option<String>,
}

/// Collect events from the five sources (creation, phase changes, framing,
/// loop starts, decisions) and sort ascending by timestamp.
pub(crate) fn events(project: &Project) -> Vec<TimelineEvent> {
    let mut events = vec![TimelineEvent {
        at: project.started_at,
        label: "Project created".to_string(),
        detail: None,
    }];

    // The first history entry is the creation phase, already covered above.
    for change in project.phase_history.iter().skip(1) {
        events.push(TimelineEvent {
            at: change.changed_at,
            label: format!("Entered {} phase", change.phase.label()),
            detail: None,
        });
    }

    if let Some(captured_at) = project.framing.as_ref().and_then(|f| f.captured_at) {
        events.push(TimelineEvent {
            at: captured_at,
            label: "Framing captured".to_string(),
            detail: None,
        });
    }

    for l in &project.loops {
        events.push(TimelineEvent {
            at: l.started_at,
            label: "Loop started".to_string(),
            detail: Some(l.question.clone()),
        });
    }

    for decision in project.chronological_decisions() {
        events.push(TimelineEvent {
            at: decision.decided_at,
            label: "Decision".to_string(),
            detail: Some(decision.summary.clone()),
        });
    }

    events.sort_by_key(|e| e.at);
    events
}

pub(crate) fn markup(project: &Project) -> String {
    let mut pages = vec![cover(project, "Timeline")];

    let entries: Vec<String> = events(project)
        .iter()
        .map(|e| {
            let mut entry = format!(
                "<li><strong>{}</strong> {}",
                date(&e.at),
                escape(&e.label)
            );
            if let Some(detail) = &e.detail {
                entry.push_str(&format!(" &mdash; {}", escape(detail)));
            }
            entry.push_str("</li>");
            entry
        })
        .collect();

    pages.push(page(
        "Timeline",
        &format!("<ul>\n{}\n</ul>", entries.join("\n")),
    ));

    pages.join("\n")
}
