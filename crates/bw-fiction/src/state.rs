//! The mutable record of one playthrough.

use std::collections::BTreeMap;

use bw_core::{CharacterId, Evidence, FlagId, ItemId, LocationId, Track};
use serde::Serialize;

/// Lowest possible stress level.
pub const MIN_STRESS: i32 = 0;
/// Highest possible stress level.
pub const MAX_STRESS: i32 = 10;

/// Everything that changes while the player investigates.
///
/// A session owns exactly one `GameState`. Read-only evaluators (choice
/// availability, endings) borrow it; only effect application mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    /// Items held, in the order they were picked up. Never contains duplicates.
    pub inventory: Vec<ItemId>,
    /// Collected evidence, in collection order. Unique by name.
    pub evidence: Vec<Evidence>,
    /// Story flags. A missing key means the flag was never written.
    pub flags: BTreeMap<FlagId, bool>,
    /// Where the player is.
    pub current_location: LocationId,
    /// Relationship scores. Keys are fixed when the state is created.
    pub relationships: BTreeMap<CharacterId, i32>,
    /// Hours left before the storm cuts the manor off.
    pub time_remaining: i32,
    /// Stress, always within `MIN_STRESS..=MAX_STRESS`.
    pub stress_level: i32,
    /// Current investigation focus.
    pub current_track: Track,
}

impl GameState {
    /// Create a fresh state at `start` with every character at score zero.
    pub fn new<I, S>(start: impl Into<LocationId>, characters: I, initial_time: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CharacterId>,
    {
        Self {
            inventory: Vec::new(),
            evidence: Vec::new(),
            flags: BTreeMap::new(),
            current_location: start.into(),
            relationships: characters.into_iter().map(|c| (c.into(), 0)).collect(),
            time_remaining: initial_time,
            stress_level: MIN_STRESS,
            current_track: Track::None,
        }
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item unless it is already held. Returns true if it was added.
    pub fn add_item(&mut self, item: impl Into<ItemId>) -> bool {
        let item = item.into();
        if self.has_item(&item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Remove an item. Returns false if it was not held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// The raw value of a flag; `None` if it was never written.
    pub fn flag(&self, flag: &str) -> Option<bool> {
        self.flags.get(flag).copied()
    }

    /// Whether a flag is set to true.
    pub fn flag_is_set(&self, flag: &str) -> bool {
        self.flag(flag).unwrap_or(false)
    }

    /// Write a flag.
    pub fn set_flag(&mut self, flag: impl Into<FlagId>, value: bool) {
        self.flags.insert(flag.into(), value);
    }

    /// Whether evidence with this exact name has been collected.
    pub fn has_evidence(&self, name: &str) -> bool {
        self.evidence.iter().any(|e| e.name == name)
    }

    /// Collect evidence unless an entry with the same name is already held.
    /// Returns true if it was added.
    pub fn add_evidence(&mut self, evidence: Evidence) -> bool {
        if self.has_evidence(&evidence.name) {
            return false;
        }
        self.evidence.push(evidence);
        true
    }

    /// A character's score. Untracked characters read as zero.
    pub fn relationship(&self, character: &str) -> i32 {
        self.relationships.get(character).copied().unwrap_or(0)
    }

    /// Add to a tracked character's score and return the new value.
    /// Returns `None` (and changes nothing) for untracked characters.
    pub fn adjust_relationship(&mut self, character: &str, delta: i32) -> Option<i32> {
        let score = self.relationships.get_mut(character)?;
        *score = score.saturating_add(delta);
        Some(*score)
    }

    /// Move stress by `delta`, clamped to the allowed range.
    /// Returns the change actually applied.
    pub fn adjust_stress(&mut self, delta: i32) -> i32 {
        let before = self.stress_level;
        self.stress_level = before.saturating_add(delta).clamp(MIN_STRESS, MAX_STRESS);
        self.stress_level - before
    }
}
