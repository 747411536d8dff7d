use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceId;
use crate::location::LocationId;
use crate::track::Track;

/// Key of a choice, unique within its source location.
pub type ChoiceId = String;
/// Key of an inventory item.
pub type ItemId = String;
/// Key of a boolean story flag.
pub type FlagId = String;
/// Key of a character whose relationship score is tracked.
pub type CharacterId = String;

/// How much a choice moves a relationship score.
///
/// A conditional delta is resolved against the score the character has when
/// the choice is taken, never against the score at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipDelta {
    /// Always add this amount.
    Fixed(i32),
    /// Add `then` if the current score is strictly above `above`, otherwise
    /// add `otherwise`.
    Conditional {
        /// Score the current value is compared against.
        above: i32,
        /// Delta when the current score is greater than `above`.
        then: i32,
        /// Delta in every other case.
        otherwise: i32,
    },
}

impl RelationshipDelta {
    /// The amount to add given the character's current score.
    pub fn resolve(&self, current: i32) -> i32 {
        match *self {
            RelationshipDelta::Fixed(delta) => delta,
            RelationshipDelta::Conditional {
                above,
                then,
                otherwise,
            } => {
                if current > above {
                    then
                } else {
                    otherwise
                }
            }
        }
    }
}

impl From<i32> for RelationshipDelta {
    fn from(delta: i32) -> Self {
        RelationshipDelta::Fixed(delta)
    }
}

fn default_time_cost() -> i32 {
    1
}

/// A player-selectable edge from one location to another.
///
/// Requirements gate whether the choice is offered; the remaining fields are
/// the effects applied when it is taken. Every collection defaults to empty
/// so content files only list what a choice actually uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Key within the source location.
    pub id: ChoiceId,
    /// Text shown in the choice list.
    pub label: String,
    /// Location or outcome reached by taking the choice.
    pub destination: LocationId,

    /// Items that must all be in the inventory.
    #[serde(default)]
    pub required_items: Vec<ItemId>,
    /// Flags that must hold the given values.
    #[serde(default)]
    pub required_flags: BTreeMap<FlagId, bool>,
    /// Evidence names that must all have been collected.
    #[serde(default)]
    pub required_evidence: Vec<String>,

    /// Hours spent taking the choice.
    #[serde(default = "default_time_cost")]
    pub time_cost: i32,
    /// Change to the stress level before clamping.
    #[serde(default)]
    pub stress_change: i32,
    /// Items added to the inventory if not already held.
    #[serde(default)]
    pub inventory_add: Vec<ItemId>,
    /// Items removed from the inventory if held.
    #[serde(default)]
    pub inventory_remove: Vec<ItemId>,
    /// Flags written when the choice is taken.
    #[serde(default)]
    pub flags_change: BTreeMap<FlagId, bool>,
    /// Catalog ids of evidence granted by the choice.
    #[serde(default)]
    pub evidence_add: Vec<EvidenceId>,
    /// Relationship score adjustments.
    #[serde(default)]
    pub relationship_changes: BTreeMap<CharacterId, RelationshipDelta>,
    /// New investigation track, if the choice changes it.
    #[serde(default)]
    pub track_change: Option<Track>,
}

impl Choice {
    /// Create a choice costing one hour with no requirements or other effects.
    pub fn new(
        id: impl Into<ChoiceId>,
        label: impl Into<String>,
        destination: impl Into<LocationId>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            destination: destination.into(),
            required_items: Vec::new(),
            required_flags: BTreeMap::new(),
            required_evidence: Vec::new(),
            time_cost: default_time_cost(),
            stress_change: 0,
            inventory_add: Vec::new(),
            inventory_remove: Vec::new(),
            flags_change: BTreeMap::new(),
            evidence_add: Vec::new(),
            relationship_changes: BTreeMap::new(),
            track_change: None,
        }
    }

    /// Require an inventory item.
    pub fn requires_item(mut self, item: impl Into<ItemId>) -> Self {
        self.required_items.push(item.into());
        self
    }

    /// Require a flag value.
    pub fn requires_flag(mut self, flag: impl Into<FlagId>, value: bool) -> Self {
        self.required_flags.insert(flag.into(), value);
        self
    }

    /// Require a collected evidence name.
    pub fn requires_evidence(mut self, name: impl Into<String>) -> Self {
        self.required_evidence.push(name.into());
        self
    }

    /// Set the time cost.
    pub fn with_time_cost(mut self, hours: i32) -> Self {
        self.time_cost = hours;
        self
    }

    /// Set the stress change.
    pub fn with_stress(mut self, change: i32) -> Self {
        self.stress_change = change;
        self
    }

    /// Grant an inventory item.
    pub fn gives_item(mut self, item: impl Into<ItemId>) -> Self {
        self.inventory_add.push(item.into());
        self
    }

    /// Take away an inventory item.
    pub fn takes_item(mut self, item: impl Into<ItemId>) -> Self {
        self.inventory_remove.push(item.into());
        self
    }

    /// Write a flag.
    pub fn sets_flag(mut self, flag: impl Into<FlagId>, value: bool) -> Self {
        self.flags_change.insert(flag.into(), value);
        self
    }

    /// Grant evidence by catalog id.
    pub fn gives_evidence(mut self, id: impl Into<EvidenceId>) -> Self {
        self.evidence_add.push(id.into());
        self
    }

    /// Adjust a relationship score.
    pub fn with_relationship(
        mut self,
        character: impl Into<CharacterId>,
        delta: impl Into<RelationshipDelta>,
    ) -> Self {
        self.relationship_changes
            .insert(character.into(), delta.into());
        self
    }

    /// Switch the investigation track.
    pub fn with_track(mut self, track: Track) -> Self {
        self.track_change = Some(track);
        self
    }

    /// Whether the choice has any precondition at all.
    pub fn has_requirements(&self) -> bool {
        !self.required_items.is_empty()
            || !self.required_flags.is_empty()
            || !self.required_evidence.is_empty()
    }
}
