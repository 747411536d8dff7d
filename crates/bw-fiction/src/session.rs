//! Interactive fiction session management.
//!
//! [`GameSession`] is the transition controller: it owns the game state,
//! validates each choice against the current location, applies effects,
//! routes the player through dialogues and outcomes, and checks for an
//! ending after every transition.

use std::sync::Arc;

use bw_core::{ChoiceId, ContentGraph, Destination, Location, LocationId};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::choice::{
    AppliedEffects, apply_effects, available_choices, is_available, unmet_requirements,
};
use crate::config::EngineConfig;
use crate::description::select_description;
use crate::ending::{Ending, check_ending};
use crate::error::{FictionError, FictionResult};
use crate::snapshot::{ChoiceView, LockedChoice, RelationshipView, StatusView, TurnSnapshot};
use crate::state::{GameState, MAX_STRESS};

/// Text reported when an exploration location offers nothing to do.
pub const DEADLOCK_TEXT: &str = "No valid choices available - Investigation deadlocked";

/// Where the session is in its turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Moving between locations.
    Exploring,
    /// Inside a conversation; one choice, then back to the hub.
    InDialogue,
    /// Over: an ending or a deadlock was reached.
    Ended,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConclusionKind {
    /// A narrative ending.
    Ending,
    /// No available choices at an exploration location.
    Deadlock,
    /// The clock ran out.
    Timeout,
}

/// The terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conclusion {
    /// What kind of end this is.
    pub kind: ConclusionKind,
    /// The ending reached, if any. `None` for a deadlock.
    pub ending: Option<Ending>,
    /// Location the player was at.
    pub location: LocationId,
    /// Narrative text to show.
    pub text: String,
}

/// A choice taken, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Location the choice belonged to.
    pub location: LocationId,
    /// Choice id.
    pub choice: ChoiceId,
}

/// The result of one accepted choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    /// Choice taken.
    pub choice: ChoiceId,
    /// What the choice changed.
    pub effects: AppliedEffects,
    /// Narrative text if the choice led to an outcome.
    pub outcome_text: Option<String>,
    /// Whether the player was sent back to the hub.
    pub returned_to_hub: bool,
    /// A dialogue entered with nothing left to say, skipped back to the hub.
    pub exhausted_dialogue: Option<LocationId>,
    /// Set if this turn ended the session.
    pub conclusion: Option<Conclusion>,
}

/// A single playthrough of a story.
pub struct GameSession {
    content: Arc<ContentGraph>,
    config: EngineConfig,
    state: GameState,
    phase: Phase,
    conclusion: Option<Conclusion>,
    history: Vec<HistoryEntry>,
}

impl GameSession {
    /// Start a session at the content's start location.
    ///
    /// Fails if the start location does not exist. A start location that
    /// already offers no choices ends the session in a deadlock at once.
    pub fn new(content: Arc<ContentGraph>, config: EngineConfig) -> FictionResult<Self> {
        let start = content
            .location(&content.start)
            .ok_or_else(|| FictionError::UnknownLocation(content.start.clone()))?;
        let phase = if start.is_dialogue() {
            Phase::InDialogue
        } else {
            Phase::Exploring
        };
        let state = GameState::new(
            start.id.clone(),
            content.characters.iter().cloned(),
            config.initial_time,
        );

        let mut session = Self {
            content,
            config,
            state,
            phase,
            conclusion: None,
            history: Vec::new(),
        };
        debug!(location = %session.state.current_location, "session started");

        if !session.check_for_ending() {
            session.settle()?;
        }
        Ok(session)
    }

    /// Start a session on the built-in Blackwood Manor story.
    pub fn builtin(config: EngineConfig) -> FictionResult<Self> {
        Self::new(Arc::new(ContentGraph::builtin()?), config)
    }

    /// The story being played.
    pub fn content(&self) -> &ContentGraph {
        &self.content
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How the session ended, once it has.
    pub fn conclusion(&self) -> Option<&Conclusion> {
        self.conclusion.as_ref()
    }

    /// Choices taken so far.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Number of choices taken so far.
    pub fn turn(&self) -> usize {
        self.history.len()
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// The location the player is at.
    pub fn current_location(&self) -> FictionResult<&Location> {
        self.content
            .location(&self.state.current_location)
            .ok_or_else(|| FictionError::UnknownLocation(self.state.current_location.clone()))
    }

    /// Choices the player may take right now. Empty once the session ended.
    pub fn available_choices(&self) -> FictionResult<Vec<ChoiceView>> {
        if self.is_over() {
            return Ok(Vec::new());
        }
        let location = self.current_location()?;
        Ok(available_choices(location, &self.state, self.config.flag_policy)
            .into_iter()
            .map(|c| ChoiceView {
                id: c.id.clone(),
                label: c.label.clone(),
            })
            .collect())
    }

    /// Everything needed to render the current turn.
    ///
    /// With `show_locked`, choices whose requirements are not met are listed
    /// along with what they are missing.
    pub fn snapshot(&self, show_locked: bool) -> FictionResult<TurnSnapshot> {
        let location = self.current_location()?;
        let policy = self.config.flag_policy;

        let locked = if show_locked && !self.is_over() {
            location
                .choices
                .iter()
                .filter(|c| !is_available(c, &self.state, policy))
                .map(|c| LockedChoice {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    missing: unmet_requirements(c, &self.state, policy)
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(TurnSnapshot {
            location: location.id.clone(),
            phase: self.phase,
            description: select_description(location, self.state.time_remaining).to_string(),
            choices: self.available_choices()?,
            locked,
            status: self.status(),
        })
    }

    fn status(&self) -> StatusView {
        StatusView {
            time_remaining: self.state.time_remaining,
            stress_level: self.state.stress_level,
            max_stress: MAX_STRESS,
            current_track: self.state.current_track,
            inventory: self.state.inventory.clone(),
            evidence: self.state.evidence.clone(),
            relationships: self
                .content
                .characters
                .iter()
                .map(|character| RelationshipView {
                    character: character.clone(),
                    score: self.state.relationship(character),
                })
                .collect(),
        }
    }

    /// Take a choice at the current location.
    ///
    /// A choice that does not exist here or is not available fails with
    /// [`FictionError::InvalidChoice`] and leaves the state untouched. A
    /// choice whose destination is missing from the content fails with
    /// [`FictionError::UnknownLocation`], also before anything changes.
    pub fn choose(&mut self, choice_id: &str) -> FictionResult<TurnOutcome> {
        if self.is_over() {
            return Err(FictionError::SessionEnded);
        }

        let content = Arc::clone(&self.content);
        let location = content
            .location(&self.state.current_location)
            .ok_or_else(|| FictionError::UnknownLocation(self.state.current_location.clone()))?;
        let choice = location
            .choice(choice_id)
            .filter(|c| is_available(c, &self.state, self.config.flag_policy))
            .ok_or_else(|| FictionError::InvalidChoice(choice_id.to_string()))?;
        let destination = content.resolve(&choice.destination);
        if matches!(destination, Destination::Unknown) {
            return Err(FictionError::UnknownLocation(choice.destination.clone()));
        }

        let effects = apply_effects(choice, &content.evidence, &mut self.state);
        self.history.push(HistoryEntry {
            location: location.id.clone(),
            choice: choice.id.clone(),
        });
        debug!(
            turn = self.history.len(),
            location = %location.id,
            choice = %choice.id,
            time_remaining = self.state.time_remaining,
            stress = self.state.stress_level,
            "choice applied"
        );

        let mut outcome = TurnOutcome {
            choice: choice.id.clone(),
            effects,
            outcome_text: None,
            returned_to_hub: false,
            exhausted_dialogue: None,
            conclusion: None,
        };

        match destination {
            Destination::Outcome(text) => {
                outcome.outcome_text = Some(text.to_string());
                self.return_to_hub();
                outcome.returned_to_hub = true;
            }
            Destination::Location(_) if self.phase == Phase::InDialogue => {
                self.return_to_hub();
                outcome.returned_to_hub = true;
            }
            Destination::Location(next) => {
                self.state.current_location = next.id.clone();
                self.phase = if next.is_dialogue() {
                    Phase::InDialogue
                } else {
                    Phase::Exploring
                };
                debug!(location = %next.id, phase = ?self.phase, "moved");
            }
            Destination::Unknown => {}
        }

        if !self.check_for_ending() {
            outcome.exhausted_dialogue = self.settle()?;
            outcome.returned_to_hub |= outcome.exhausted_dialogue.is_some();
        }
        outcome.conclusion = self.conclusion.clone();
        Ok(outcome)
    }

    fn return_to_hub(&mut self) {
        self.state.current_location = self.content.hub.clone();
        self.phase = Phase::Exploring;
        debug!(location = %self.content.hub, "returned to hub");
    }

    /// End the session if an ending condition holds. Returns true if it did.
    fn check_for_ending(&mut self) -> bool {
        let Some(ending) = check_ending(&self.state) else {
            return false;
        };

        let kind = if ending == Ending::Timeout {
            ConclusionKind::Timeout
        } else {
            ConclusionKind::Ending
        };
        let text = self
            .content
            .ending_text(ending.id())
            .unwrap_or_else(|| ending.default_text())
            .to_string();
        info!(ending = %ending, turn = self.history.len(), "ending reached");

        self.conclude(Conclusion {
            kind,
            ending: Some(ending),
            location: self.state.current_location.clone(),
            text,
        });
        true
    }

    /// Resolve locations that cannot be played as-is.
    ///
    /// A dialogue with nothing available sends the player back to the hub;
    /// its id is returned. An exploration location with nothing available
    /// ends the session in a deadlock.
    fn settle(&mut self) -> FictionResult<Option<LocationId>> {
        let mut exhausted = None;
        let content = Arc::clone(&self.content);

        loop {
            let location = content
                .location(&self.state.current_location)
                .ok_or_else(|| FictionError::UnknownLocation(self.state.current_location.clone()))?;
            if !available_choices(location, &self.state, self.config.flag_policy).is_empty() {
                return Ok(exhausted);
            }

            match self.phase {
                Phase::InDialogue => {
                    debug!(location = %location.id, "dialogue exhausted");
                    exhausted = Some(location.id.clone());
                    self.return_to_hub();
                }
                Phase::Exploring => {
                    warn!(location = %location.id, "no available choices; investigation deadlocked");
                    self.conclude(Conclusion {
                        kind: ConclusionKind::Deadlock,
                        ending: None,
                        location: location.id.clone(),
                        text: DEADLOCK_TEXT.to_string(),
                    });
                    return Ok(exhausted);
                }
                Phase::Ended => return Ok(exhausted),
            }
        }
    }

    fn conclude(&mut self, conclusion: Conclusion) {
        self.phase = Phase::Ended;
        self.conclusion = Some(conclusion);
    }
}
