//! Listing projection: pure filtering and sorting of the project collection.
//!
//! These functions are deterministic and idempotent over in-memory data;
//! they never touch the store and have no error paths.

use std::collections::HashSet;

use crate::model::{Phase, Project};

/// Set of phases selected by a listing screen. An empty set selects
/// everything.
#[derive(Debug, Clone, Default)]
pub struct PhaseFilter {
    selected: HashSet<Phase>,
}

impl PhaseFilter {
    /// Filter matching every project.
    pub fn any() -> Self {
        Self::default()
    }

    /// Filter matching only the given phases.
    pub fn only(phases: impl IntoIterator<Item = Phase>) -> Self {
        Self {
            selected: phases.into_iter().collect(),
        }
    }

    /// Whether a project in the given phase passes the filter.
    pub fn matches(&self, phase: Phase) -> bool {
        self.selected.is_empty() || self.selected.contains(&phase)
    }

    /// Whether the filter selects everything.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl FromIterator<Phase> for PhaseFilter {
    fn from_iter<T: IntoIterator<Item = Phase>>(iter: T) -> Self {
        Self::only(iter)
    }
}

/// Key a project listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Creation timestamp.
    StartDate,
    /// Last-updated timestamp.
    #[default]
    UpdatedDate,
    /// Lexicographic phase name.
    PhaseName,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::StartDate => write!(f, "start-date"),
            SortKey::UpdatedDate => write!(f, "updated-date"),
            SortKey::PhaseName => write!(f, "phase-name"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start-date" => Ok(SortKey::StartDate),
            "updated-date" => Ok(SortKey::UpdatedDate),
            "phase-name" => Ok(SortKey::PhaseName),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Direction a listing is sorted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Filter the collection by phase, then sort by the given key and direction.
///
/// Date keys compare timestamps; the phase key compares the phase's
/// lexicographic string form. Descending negates the comparison. The sort is
/// stable, so ties keep their input order.
pub fn filter_and_sort(
    projects: &[Project],
    filter: &PhaseFilter,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Project> {
    let mut selected: Vec<Project> = projects
        .iter()
        .filter(|p| filter.matches(p.phase))
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        let ordering = match key {
            SortKey::StartDate => a.started_at.cmp(&b.started_at),
            SortKey::UpdatedDate => a.updated_at.cmp(&b.updated_at),
            SortKey::PhaseName => a.phase.as_str().cmp(b.phase.as_str()),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    selected
}
