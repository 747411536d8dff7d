//! Precondition evaluation for choices.

use std::fmt;

use bw_core::{Choice, Location};

use crate::config::FlagPolicy;
use crate::state::GameState;

/// A single precondition of a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Check if the player holds an item.
    HasItem {
        /// Item id.
        item: String,
    },
    /// Check if a flag holds a value.
    FlagEquals {
        /// Flag key.
        flag: String,
        /// Expected value.
        value: bool,
    },
    /// Check if evidence with this name has been collected.
    HasEvidence {
        /// Evidence display name.
        name: String,
    },
}

impl Requirement {
    /// All requirements of a choice: items, then flags, then evidence.
    pub fn of(choice: &Choice) -> impl Iterator<Item = Requirement> + '_ {
        let items = choice
            .required_items
            .iter()
            .map(|item| Requirement::HasItem { item: item.clone() });
        let flags = choice
            .required_flags
            .iter()
            .map(|(flag, value)| Requirement::FlagEquals {
                flag: flag.clone(),
                value: *value,
            });
        let evidence = choice
            .required_evidence
            .iter()
            .map(|name| Requirement::HasEvidence { name: name.clone() });
        items.chain(flags).chain(evidence)
    }

    /// Evaluate the requirement against the current state.
    pub fn evaluate(&self, state: &GameState, policy: FlagPolicy) -> bool {
        match self {
            Requirement::HasItem { item } => state.has_item(item),
            Requirement::FlagEquals { flag, value } => match (state.flag(flag), policy) {
                (Some(actual), _) => actual == *value,
                (None, FlagPolicy::AbsentIsFalse) => !*value,
                (None, FlagPolicy::Strict) => false,
            },
            Requirement::HasEvidence { name } => state.has_evidence(name),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::HasItem { item } => write!(f, "requires {item}"),
            Requirement::FlagEquals { flag, value } => write!(f, "requires {flag} = {value}"),
            Requirement::HasEvidence { name } => write!(f, "requires evidence \"{name}\""),
        }
    }
}

/// Whether a choice can be taken right now.
///
/// Must be evaluated fresh every time a location is shown: the state may
/// have changed since the last visit.
pub fn is_available(choice: &Choice, state: &GameState, policy: FlagPolicy) -> bool {
    Requirement::of(choice).all(|r| r.evaluate(state, policy))
}

/// The requirements of a choice that the current state does not meet.
pub fn unmet_requirements(
    choice: &Choice,
    state: &GameState,
    policy: FlagPolicy,
) -> Vec<Requirement> {
    Requirement::of(choice)
        .filter(|r| !r.evaluate(state, policy))
        .collect()
}

/// The available choices of a location, in presentation order.
pub fn available_choices<'a>(
    location: &'a Location,
    state: &GameState,
    policy: FlagPolicy,
) -> Vec<&'a Choice> {
    location
        .choices
        .iter()
        .filter(|c| is_available(c, state, policy))
        .collect()
}
