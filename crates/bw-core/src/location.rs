use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;

/// Key of a location (or of an outcome, which shares the same namespace).
pub type LocationId = String;

/// How the turn loop treats a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// A place the player explores turn by turn.
    #[default]
    Exploration,
    /// A conversation: one choice is taken, then the player returns to the hub.
    Dialogue,
}

/// A node in the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique key.
    pub id: LocationId,
    /// Exploration or dialogue.
    #[serde(default)]
    pub kind: LocationKind,
    /// Text shown when no time threshold applies.
    pub description: String,
    /// Alternate text keyed by hours-remaining threshold.
    #[serde(default)]
    pub time_descriptions: BTreeMap<i32, String>,
    /// Choices in presentation order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Location {
    /// Create an exploration location with no choices.
    pub fn new(id: impl Into<LocationId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LocationKind::Exploration,
            description: description.into(),
            time_descriptions: BTreeMap::new(),
            choices: Vec::new(),
        }
    }

    /// Set the location kind.
    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a description used once `time_remaining <= threshold`.
    pub fn with_time_description(mut self, threshold: i32, text: impl Into<String>) -> Self {
        self.time_descriptions.insert(threshold, text.into());
        self
    }

    /// Append a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Find a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// Whether this is a dialogue location.
    pub fn is_dialogue(&self) -> bool {
        self.kind == LocationKind::Dialogue
    }
}
