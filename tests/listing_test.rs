//! Tests for the listing filter/sort projection.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use loopbook::listing::{filter_and_sort, PhaseFilter, SortDirection, SortKey};
use loopbook::model::{Phase, Project};

/// Build a project with distinct, deterministic timestamps.
fn project(title: &str, phase: Phase, days_ago: i64) -> Project {
    let mut p = Project::new(title).with_phase(phase);
    p.started_at = Utc::now() - Duration::days(days_ago);
    p.updated_at = Utc::now() - Duration::hours(days_ago);
    p
}

fn sample() -> Vec<Project> {
    vec![
        project("alpha", Phase::Framing, 3),
        project("beta", Phase::Exploration, 1),
        project("gamma", Phase::Pilot, 4),
        project("delta", Phase::Framing, 2),
    ]
}

#[test]
fn test_empty_filter_keeps_full_membership() {
    let projects = sample();
    let listed = filter_and_sort(
        &projects,
        &PhaseFilter::any(),
        SortKey::StartDate,
        SortDirection::Ascending,
    );

    assert_eq!(listed.len(), projects.len());
    let mut input_ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    let mut output_ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
    input_ids.sort();
    output_ids.sort();
    assert_eq!(output_ids, input_ids);
}

#[test]
fn test_phase_filter_keeps_only_selected() {
    let projects = sample();
    let listed = filter_and_sort(
        &projects,
        &PhaseFilter::only([Phase::Framing]),
        SortKey::StartDate,
        SortDirection::Ascending,
    );

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.phase == Phase::Framing));
}

#[test]
fn test_start_date_descending_reverses_ascending() {
    let projects = sample();
    let ascending = filter_and_sort(
        &projects,
        &PhaseFilter::any(),
        SortKey::StartDate,
        SortDirection::Ascending,
    );
    let descending = filter_and_sort(
        &projects,
        &PhaseFilter::any(),
        SortKey::StartDate,
        SortDirection::Descending,
    );

    let forward: Vec<&str> = ascending.iter().map(|p| p.title.as_str()).collect();
    let mut backward: Vec<&str> = descending.iter().map(|p| p.title.as_str()).collect();
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward, vec!["gamma", "alpha", "delta", "beta"]);
}

#[test]
fn test_updated_date_sort() {
    let projects = sample();
    let listed = filter_and_sort(
        &projects,
        &PhaseFilter::any(),
        SortKey::UpdatedDate,
        SortDirection::Descending,
    );

    let titles: Vec<&str> = listed.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["beta", "delta", "alpha", "gamma"]);
}

#[test]
fn test_projection_is_idempotent() {
    let projects = sample();
    let filter = PhaseFilter::only([Phase::Framing, Phase::Pilot]);

    let first = filter_and_sort(&projects, &filter, SortKey::PhaseName, SortDirection::Descending);
    let second = filter_and_sort(&projects, &filter, SortKey::PhaseName, SortDirection::Descending);

    assert_eq!(first, second);

    // Re-applying the projection to its own output changes nothing.
    let again = filter_and_sort(&first, &filter, SortKey::PhaseName, SortDirection::Descending);
    assert_eq!(again, first);
}
