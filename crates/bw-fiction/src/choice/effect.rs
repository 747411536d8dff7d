//! Effects applied to the game state when a choice is taken.

use std::collections::BTreeMap;

use bw_core::{CharacterId, Choice, Evidence, EvidenceCatalog, FlagId, ItemId, Track};
use serde::Serialize;
use tracing::warn;

use crate::state::GameState;

/// What applying a choice actually changed.
///
/// Items, evidence, and stress report the real change, so adding an item
/// already held or pushing stress past its limit shows up as no change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppliedEffects {
    /// Hours spent.
    pub time_spent: i32,
    /// Change in stress after clamping.
    pub stress_delta: i32,
    /// Items newly added to the inventory.
    pub items_gained: Vec<ItemId>,
    /// Items removed from the inventory.
    pub items_lost: Vec<ItemId>,
    /// Flags written, with their new values.
    pub flags_set: BTreeMap<FlagId, bool>,
    /// Evidence newly collected.
    pub evidence_gained: Vec<Evidence>,
    /// Relationship deltas applied, resolved against the scores at the time.
    pub relationship_deltas: BTreeMap<CharacterId, i32>,
    /// New track, if it changed.
    pub new_track: Option<Track>,
}

/// Apply a choice's effects to the state.
///
/// Never fails. The steps run in a fixed order: time, stress, inventory
/// additions, inventory removals, flags, evidence, relationships, track.
/// Evidence ids missing from the catalog and characters missing from the
/// state are skipped with a warning; the content validator reports both.
pub fn apply_effects(
    choice: &Choice,
    catalog: &EvidenceCatalog,
    state: &mut GameState,
) -> AppliedEffects {
    let mut applied = AppliedEffects {
        time_spent: choice.time_cost,
        ..AppliedEffects::default()
    };

    state.time_remaining = state.time_remaining.saturating_sub(choice.time_cost);
    applied.stress_delta = state.adjust_stress(choice.stress_change);

    for item in &choice.inventory_add {
        if state.add_item(item.clone()) {
            applied.items_gained.push(item.clone());
        }
    }

    for item in &choice.inventory_remove {
        if state.remove_item(item) {
            applied.items_lost.push(item.clone());
        }
    }

    for (flag, value) in &choice.flags_change {
        state.set_flag(flag.clone(), *value);
        applied.flags_set.insert(flag.clone(), *value);
    }

    for id in &choice.evidence_add {
        let Some(evidence) = catalog.get(id) else {
            warn!(choice = %choice.id, evidence = %id, "choice grants evidence missing from the catalog");
            continue;
        };
        if state.add_evidence(evidence.clone()) {
            applied.evidence_gained.push(evidence.clone());
        }
    }

    for (character, delta) in &choice.relationship_changes {
        let amount = delta.resolve(state.relationship(character));
        if state.adjust_relationship(character, amount).is_some() {
            applied.relationship_deltas.insert(character.clone(), amount);
        } else {
            warn!(choice = %choice.id, character = %character, "choice adjusts an untracked character");
        }
    }

    if let Some(track) = choice.track_change {
        state.current_track = track;
        applied.new_track = Some(track);
    }

    applied
}
