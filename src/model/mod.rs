//! Domain model for design-process projects.
//!
//! A [`Project`] is the root aggregate: it owns its artifacts, exploration
//! loops, framing fields, decisions, and phase history as embedded data.
//! Every mutation goes through the aggregate and refreshes `updated_at`, so
//! the store can persist the whole record in one write.


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process phase a project is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Capturing the problem frame before exploration begins.
    #[default]
    Framing,
    /// Running exploration loops.
    Exploration,
    /// Piloting a chosen direction.
    Pilot,
    /// Delivering the result.
    Delivery,
    /// Project wrapped up.
    Finish,
}

impl Phase {
    /// Stable lowercase name, also the wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Framing => "framing",
            Phase::Exploration => "exploration",
            Phase::Pilot => "pilot",
            Phase::Delivery => "delivery",
            Phase::Finish => "finish",
        }
    }

    /// Capitalized name for report output.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Framing => "Framing",
            Phase::Exploration => "Exploration",
            Phase::Pilot => "Pilot",
            Phase::Delivery => "Delivery",
            Phase::Finish => "Finish",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "framing" => Ok(Phase::Framing),
            "exploration" => Ok(Phase::Exploration),
            "pilot" => Ok(Phase::Pilot),
            "delivery" => Ok(Phase::Delivery),
            "finish" => Ok(Phase::Finish),
            _ => Err(format!("Unknown phase: {}", s)),
        }
    }
}

/// Status of an exploration loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopStatus {
    /// Loop is actively being worked.
    #[default]
    Active,
    /// Loop is parked for later.
    Paused,
    /// Loop has been closed out.
    Completed,
}

impl std::fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopStatus::Active => write!(f, "active"),
            LoopStatus::Paused => write!(f, "paused"),
            LoopStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for LoopStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(LoopStatus::Active),
            "paused" => Ok(LoopStatus::Paused),
            "completed" => Ok(LoopStatus::Completed),
            _ => Err(format!("Unknown loop status: {}", s)),
        }
    }
}

/// Kind of attached artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A photo or image file.
    #[default]
    Image,
    /// A document file.
    Document,
    /// A web link.
    Url,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Image => write!(f, "image"),
            ArtifactKind::Document => write!(f, "document"),
            ArtifactKind::Url => write!(f, "url"),
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(ArtifactKind::Image),
            "document" => Ok(ArtifactKind::Document),
            "url" => Ok(ArtifactKind::Url),
            _ => Err(format!("Unknown artifact kind: {}", s)),
        }
    }
}

/// Where a decision was recorded.
///
/// The three historical decision shapes (framing, loop, project-level) all
/// carry {id, summary, timestamp}; they are unified into one type tagged by
/// origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOrigin {
    /// Recorded during framing.
    Framing,
    /// Recorded inside an exploration loop.
    Loop,
    /// Recorded at the project level.
    #[default]
    Project,
}

impl std::fmt::Display for DecisionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionOrigin::Framing => write!(f, "framing"),
            DecisionOrigin::Loop => write!(f, "loop"),
            DecisionOrigin::Project => write!(f, "project"),
        }
    }
}

/// One of the four item lists inside an exploration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopSection {
    /// Questions and angles to explore.
    Explore,
    /// Things built or prototyped.
    Build,
    /// Checks and observations.
    Check,
    /// Adaptations decided from the checks.
    Adapt,
}

impl std::fmt::Display for LoopSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopSection::Explore => write!(f, "explore"),
            LoopSection::Build => write!(f, "build"),
            LoopSection::Check => write!(f, "check"),
            LoopSection::Adapt => write!(f, "adapt"),
        }
    }
}

/// Artifact reference list inside an exploration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefSection {
    /// References gathered while exploring.
    Explore,
    /// References produced while building.
    Build,
    /// Invoices and receipts.
    Invoices,
}

impl std::fmt::Display for RefSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefSection::Explore => write!(f, "explore"),
            RefSection::Build => write!(f, "build"),
            RefSection::Invoices => write!(f, "invoices"),
        }
    }
}

/// An attached photo, document, or URL reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique artifact identifier.
    pub id: String,
    /// What kind of attachment this is.
    pub kind: ArtifactKind,
    /// Local URI or web address.
    pub uri: String,
    /// Display name.
    pub name: String,
    /// Whether the artifact is marked as a key artifact.
    #[serde(default)]
    pub favorite: bool,
    /// Optional caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Artifact {
    /// Create a new artifact.
    pub fn new(kind: ArtifactKind, uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            uri: uri.into(),
            name: name.into(),
            favorite: false,
            caption: None,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Mark as a key artifact.
    pub fn as_favorite(mut self) -> Self {
        self.favorite = true;
        self
    }
}

/// A single text item inside a loop section or next-question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopItem {
    /// Identifier, unique within its own list.
    pub id: String,
    /// Item text.
    pub text: String,
    /// Whether the item is highlighted.
    #[serde(default)]
    pub favorite: bool,
}

impl LoopItem {
    /// Create a new loop item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            favorite: false,
        }
    }
}

/// A framing-level item: certainty, design-space entry, or exploration question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramingItem {
    /// Identifier, unique within its own list.
    pub id: String,
    /// Item text.
    pub text: String,
    /// Optional category tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the item is highlighted.
    #[serde(default)]
    pub favorite: bool,
}

impl FramingItem {
    /// Create a new framing item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            category: None,
            favorite: false,
        }
    }

    /// Set the category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A timestamped record of a choice made. Append-only: decisions are added
/// and deleted, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Unique decision identifier.
    pub id: String,
    /// Summary of the decision.
    pub summary: String,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
    /// Where the decision was recorded.
    #[serde(default)]
    pub origin: DecisionOrigin,
    /// Optional rationale text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Optional phase tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    /// Referenced artifact identifiers.
    #[serde(default)]
    pub artifact_ids: Vec<String>,
}

impl Decision {
    /// Create a new decision.
    pub fn new(summary: impl Into<String>, origin: DecisionOrigin) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            summary: summary.into(),
            decided_at: Utc::now(),
            origin,
            rationale: None,
            phase: None,
            artifact_ids: Vec::new(),
        }
    }

    /// Set the rationale.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Set the phase tag.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Reference an artifact.
    pub fn with_artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_ids.push(artifact_id.into());
        self
    }

    /// Set the decision timestamp.
    pub fn at(mut self, decided_at: DateTime<Utc>) -> Self {
        self.decided_at = decided_at;
        self
    }
}

/// One Explore/Build/Check/Adapt cycle of inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationLoop {
    /// Unique loop identifier.
    pub id: String,
    /// The exploration question driving the loop.
    pub question: String,
    /// Current loop status.
    #[serde(default)]
    pub status: LoopStatus,
    /// When the loop was started.
    pub started_at: DateTime<Utc>,
    /// Explore items.
    #[serde(default)]
    pub explore: Vec<LoopItem>,
    /// Build items.
    #[serde(default)]
    pub build: Vec<LoopItem>,
    /// Check items.
    #[serde(default)]
    pub check: Vec<LoopItem>,
    /// Adapt items.
    #[serde(default)]
    pub adapt: Vec<LoopItem>,
    /// Artifact references gathered while exploring.
    #[serde(default)]
    pub explore_artifact_ids: Vec<String>,
    /// Artifact references produced while building.
    #[serde(default)]
    pub build_artifact_ids: Vec<String>,
    /// Invoice and receipt artifact references.
    #[serde(default)]
    pub invoice_artifact_ids: Vec<String>,
    /// Decisions recorded inside the loop.
    #[serde(default)]
    pub decisions: Vec<Decision>,
    /// Follow-up questions surfaced by the loop.
    #[serde(default)]
    pub next_questions: Vec<LoopItem>,
    /// Hours spent on the loop.
    #[serde(default)]
    pub hours_spent: f64,
    /// Cost recorded against the loop.
    #[serde(default)]
    pub cost: f64,
}

impl ExplorationLoop {
    /// Start a new loop for the given question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.into(),
            status: LoopStatus::Active,
            started_at: Utc::now(),
            explore: Vec::new(),
            build: Vec::new(),
            check: Vec::new(),
            adapt: Vec::new(),
            explore_artifact_ids: Vec::new(),
            build_artifact_ids: Vec::new(),
            invoice_artifact_ids: Vec::new(),
            decisions: Vec::new(),
            next_questions: Vec::new(),
            hours_spent: 0.0,
            cost: 0.0,
        }
    }

    /// Items in the given section.
    pub fn items(&self, section: LoopSection) -> &[LoopItem] {
        match section {
            LoopSection::Explore => &self.explore,
            LoopSection::Build => &self.build,
            LoopSection::Check => &self.check,
            LoopSection::Adapt => &self.adapt,
        }
    }

    fn items_mut(&mut self, section: LoopSection) -> &mut Vec<LoopItem> {
        match section {
            LoopSection::Explore => &mut self.explore,
            LoopSection::Build => &mut self.build,
            LoopSection::Check => &mut self.check,
            LoopSection::Adapt => &mut self.adapt,
        }
    }

    /// Append an item to a section, returning its identifier.
    pub fn add_item(&mut self, section: LoopSection, text: impl Into<String>) -> String {
        let item = LoopItem::new(text);
        let id = item.id.clone();
        self.items_mut(section).push(item);
        id
    }

    /// Remove an item from a section. Returns false if the id was not found.
    pub fn remove_item(&mut self, section: LoopSection, item_id: &str) -> bool {
        let items = self.items_mut(section);
        let before = items.len();
        items.retain(|i| i.id != item_id);
        items.len() < before
    }

    /// Flip an item's favorite flag. Returns false if the id was not found.
    pub fn toggle_favorite(&mut self, section: LoopSection, item_id: &str) -> bool {
        match self.items_mut(section).iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.favorite = !item.favorite;
                true
            }
            None => false,
        }
    }

    /// Artifact references for the given section.
    pub fn artifact_refs(&self, section: RefSection) -> &[String] {
        match section {
            RefSection::Explore => &self.explore_artifact_ids,
            RefSection::Build => &self.build_artifact_ids,
            RefSection::Invoices => &self.invoice_artifact_ids,
        }
    }

    fn artifact_refs_mut(&mut self, section: RefSection) -> &mut Vec<String> {
        match section {
            RefSection::Explore => &mut self.explore_artifact_ids,
            RefSection::Build => &mut self.build_artifact_ids,
            RefSection::Invoices => &mut self.invoice_artifact_ids,
        }
    }

    /// Reference an artifact from a section. Duplicate references are ignored.
    pub fn attach_artifact(&mut self, section: RefSection, artifact_id: impl Into<String>) {
        let artifact_id = artifact_id.into();
        let refs = self.artifact_refs_mut(section);
        if !refs.contains(&artifact_id) {
            refs.push(artifact_id);
        }
    }

    /// Drop an artifact reference from a section.
    pub fn detach_artifact(&mut self, section: RefSection, artifact_id: &str) {
        self.artifact_refs_mut(section).retain(|id| id != artifact_id);
    }

    /// Record a decision inside the loop, returning its identifier. The
    /// origin tag is forced to `Loop`.
    pub fn add_decision(&mut self, mut decision: Decision) -> String {
        decision.origin = DecisionOrigin::Loop;
        let id = decision.id.clone();
        self.decisions.push(decision);
        id
    }

    /// Remove a loop decision. Returns false if the id was not found.
    pub fn remove_decision(&mut self, decision_id: &str) -> bool {
        let before = self.decisions.len();
        self.decisions.retain(|d| d.id != decision_id);
        self.decisions.len() < before
    }

    /// Record a follow-up question, returning its identifier.
    pub fn add_next_question(&mut self, text: impl Into<String>) -> String {
        let item = LoopItem::new(text);
        let id = item.id.clone();
        self.next_questions.push(item);
        id
    }

    /// Whether any time or cost has been recorded against this loop.
    pub fn has_spend(&self) -> bool {
        self.hours_spent > 0.0 || self.cost > 0.0
    }

    fn prune_artifact(&mut self, artifact_id: &str) {
        self.explore_artifact_ids.retain(|id| id != artifact_id);
        self.build_artifact_ids.retain(|id| id != artifact_id);
        self.invoice_artifact_ids.retain(|id| id != artifact_id);
        for decision in &mut self.decisions {
            decision.artifact_ids.retain(|id| id != artifact_id);
        }
    }
}

/// Framing fields captured before exploration begins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Framing {
    /// Where the project came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// What the project is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// What is already known for certain.
    #[serde(default)]
    pub certainties: Vec<FramingItem>,
    /// The space of design options considered open.
    #[serde(default)]
    pub design_space: Vec<FramingItem>,
    /// First exploration questions.
    #[serde(default)]
    pub exploration_questions: Vec<FramingItem>,
    /// Decisions recorded during framing.
    #[serde(default)]
    pub decisions: Vec<Decision>,
    /// When framing was captured, if it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

/// One entry in a project's phase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    /// The phase entered.
    pub phase: Phase,
    /// When the phase was entered.
    pub changed_at: DateTime<Utc>,
}

/// Personal-info record shown on exported documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact details (email or phone).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Business or organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
}

/// The root aggregate: a design project and everything recorded under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Project title.
    pub title: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Current phase.
    #[serde(default)]
    pub phase: Phase,
    /// Optimistic-concurrency version, bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
    /// When the project was created.
    pub started_at: DateTime<Utc>,
    /// When the project was last mutated. Monotonically non-decreasing.
    pub updated_at: DateTime<Utc>,
    /// Attached artifacts, in attachment order.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    /// Exploration loops, in creation order.
    #[serde(default)]
    pub loops: Vec<ExplorationLoop>,
    /// Framing fields, once captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing: Option<Framing>,
    /// Project-level decisions.
    #[serde(default)]
    pub decisions: Vec<Decision>,
    /// Phase history, seeded with the creation phase.
    #[serde(default)]
    pub phase_history: Vec<PhaseChange>,
    /// Cost recorded at the project level, outside any loop.
    #[serde(default)]
    pub total_cost: f64,
    /// Hours recorded at the project level, outside any loop.
    #[serde(default)]
    pub total_hours: f64,
}

impl Project {
    /// Create a new project in the Framing phase.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            purpose: None,
            phase: Phase::Framing,
            version: 0,
            started_at: now,
            updated_at: now,
            artifacts: Vec::new(),
            loops: Vec::new(),
            framing: None,
            decisions: Vec::new(),
            phase_history: vec![PhaseChange {
                phase: Phase::Framing,
                changed_at: now,
            }],
            total_cost: 0.0,
            total_hours: 0.0,
        }
    }

    /// Choose a starting phase other than Framing.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        if let Some(first) = self.phase_history.first_mut() {
            first.phase = phase;
        }
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the purpose.
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Refresh `updated_at`. Never moves the timestamp backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Move the project to a phase. A change is appended to the phase
    /// history; setting the current phase again only refreshes `updated_at`.
    pub fn set_phase(&mut self, phase: Phase) {
        if phase != self.phase {
            self.phase = phase;
            self.phase_history.push(PhaseChange {
                phase,
                changed_at: Utc::now(),
            });
        }
        self.touch();
    }

    /// Attach an artifact.
    pub fn add_artifact(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
        self.touch();
    }

    /// Remove an artifact and prune every reference to it held by loops and
    /// decisions. Returns false if the id was not found.
    pub fn remove_artifact(&mut self, artifact_id: &str) -> bool {
        let before = self.artifacts.len();
        self.artifacts.retain(|a| a.id != artifact_id);
        if self.artifacts.len() == before {
            return false;
        }
        for l in &mut self.loops {
            l.prune_artifact(artifact_id);
        }
        for decision in &mut self.decisions {
            decision.artifact_ids.retain(|id| id != artifact_id);
        }
        if let Some(framing) = &mut self.framing {
            for decision in &mut framing.decisions {
                decision.artifact_ids.retain(|id| id != artifact_id);
            }
        }
        self.touch();
        true
    }

    /// Look up an artifact by id.
    pub fn artifact(&self, artifact_id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == artifact_id)
    }

    /// Flip an artifact's favorite flag. Returns false if the id was not found.
    pub fn toggle_artifact_favorite(&mut self, artifact_id: &str) -> bool {
        match self.artifacts.iter_mut().find(|a| a.id == artifact_id) {
            Some(artifact) => {
                artifact.favorite = !artifact.favorite;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Artifacts marked as key artifacts.
    pub fn favorite_artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.favorite)
    }

    /// Start a new exploration loop, returning its identifier.
    pub fn add_loop(&mut self, l: ExplorationLoop) -> String {
        let id = l.id.clone();
        self.loops.push(l);
        self.touch();
        id
    }

    /// Delete a loop. Returns false if the id was not found.
    pub fn remove_loop(&mut self, loop_id: &str) -> bool {
        let before = self.loops.len();
        self.loops.retain(|l| l.id != loop_id);
        if self.loops.len() < before {
            self.touch();
            true
        } else {
            false
        }
    }

    /// Look up a loop by id.
    pub fn loop_by_id(&self, loop_id: &str) -> Option<&ExplorationLoop> {
        self.loops.iter().find(|l| l.id == loop_id)
    }

    /// Mutable loop lookup. Callers mutating through this must `touch()` the
    /// project afterwards; the store also refreshes `updated_at` on write.
    pub fn loop_by_id_mut(&mut self, loop_id: &str) -> Option<&mut ExplorationLoop> {
        self.loops.iter_mut().find(|l| l.id == loop_id)
    }

    /// Record a project-level decision. The origin tag is forced to `Project`.
    pub fn add_decision(&mut self, mut decision: Decision) {
        decision.origin = DecisionOrigin::Project;
        self.decisions.push(decision);
        self.touch();
    }

    /// Remove a project-level decision. Returns false if the id was not found.
    pub fn remove_decision(&mut self, decision_id: &str) -> bool {
        let before = self.decisions.len();
        self.decisions.retain(|d| d.id != decision_id);
        if self.decisions.len() < before {
            self.touch();
            true
        } else {
            false
        }
    }

    /// Replace the framing fields, stamping `captured_at` if unset.
    pub fn set_framing(&mut self, mut framing: Framing) {
        if framing.captured_at.is_none() {
            framing.captured_at = Some(Utc::now());
        }
        self.framing = Some(framing);
        self.touch();
    }

    /// Record a framing decision. The origin tag is forced to `Framing`.
    pub fn add_framing_decision(&mut self, mut decision: Decision) {
        decision.origin = DecisionOrigin::Framing;
        self.framing.get_or_insert_with(Framing::default).decisions.push(decision);
        self.touch();
    }

    /// Set the project-level cost and hour totals.
    pub fn set_totals(&mut self, total_cost: f64, total_hours: f64) {
        self.total_cost = total_cost;
        self.total_hours = total_hours;
        self.touch();
    }

    /// All decisions across framing, loops, and the project level, sorted
    /// ascending by timestamp. Ties keep framing-loops-project order.
    pub fn chronological_decisions(&self) -> Vec<&Decision> {
        let mut decisions: Vec<&Decision> = Vec::new();
        if let Some(framing) = &self.framing {
            decisions.extend(framing.decisions.iter());
        }
        for l in &self.loops {
            decisions.extend(l.decisions.iter());
        }
        decisions.extend(self.decisions.iter());
        decisions.sort_by_key(|d| d.decided_at);
        decisions
    }

    /// Total recorded cost: project-level plus every loop.
    pub fn recorded_cost(&self) -> f64 {
        self.total_cost + self.loops.iter().map(|l| l.cost).sum::<f64>()
    }

    /// Total recorded hours: project-level plus every loop.
    pub fn recorded_hours(&self) -> f64 {
        self.total_hours + self.loops.iter().map(|l| l.hours_spent).sum::<f64>()
    }

    /// Whether any cost or time has been recorded anywhere in the project.
    pub fn has_spend(&self) -> bool {
        self.total_cost > 0.0
            || self.total_hours > 0.0
            || self.loops.iter().any(ExplorationLoop::has_spend)
    }
}
