//! Serializable views of a session for presentation.

use bw_core::{ChoiceId, Evidence, ItemId, LocationId, Track};
use serde::Serialize;

use crate::session::Phase;

/// A choice the player may take now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Choice id, unique within the location.
    pub id: ChoiceId,
    /// Text shown to the player.
    pub label: String,
}

/// A choice that is present but not yet available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedChoice {
    /// Choice id.
    pub id: ChoiceId,
    /// Text shown to the player.
    pub label: String,
    /// Unmet requirements, in display form.
    pub missing: Vec<String>,
}

/// One relationship score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipView {
    /// Character id.
    pub character: String,
    /// Current score.
    pub score: i32,
}

/// The investigator's status panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    /// Hours left.
    pub time_remaining: i32,
    /// Current stress.
    pub stress_level: i32,
    /// Stress at which the investigator breaks.
    pub max_stress: i32,
    /// Current investigation focus.
    pub current_track: Track,
    /// Items held.
    pub inventory: Vec<ItemId>,
    /// Evidence collected, in order.
    pub evidence: Vec<Evidence>,
    /// Relationship scores, in the content's character order.
    pub relationships: Vec<RelationshipView>,
}

/// Everything needed to render one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnSnapshot {
    /// Current location id.
    pub location: LocationId,
    /// Phase of the session.
    pub phase: Phase,
    /// Location text for the time remaining.
    pub description: String,
    /// Choices available now, in content order.
    pub choices: Vec<ChoiceView>,
    /// Choices present but locked. Empty unless requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locked: Vec<LockedChoice>,
    /// Status panel.
    pub status: StatusView,
}
