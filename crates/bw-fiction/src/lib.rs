//! Interactive fiction engine for Blackwood stories.
//!
//! Evaluates choice preconditions, applies their effects to the game state,
//! picks time-sensitive location text, and resolves endings. A
//! [`GameSession`] ties these together into a turn loop that a front end
//! drives one choice at a time.

/// Choice preconditions and effects.
pub mod choice;
/// Engine configuration.
pub mod config;
/// Time-sensitive location text.
pub mod description;
/// Terminal conditions.
pub mod ending;
/// Error types for the fiction engine.
pub mod error;
/// Player input resolution.
pub mod input;
/// Interactive fiction session management.
pub mod session;
/// Serializable presentation views.
pub mod snapshot;
/// The mutable game state.
pub mod state;

pub use choice::{AppliedEffects, Requirement, apply_effects, available_choices, is_available};
pub use config::{EngineConfig, FlagPolicy};
pub use description::select_description;
pub use ending::{Ending, check_ending};
pub use error::{FictionError, FictionResult};
pub use input::{resolve_choice, suggest_choices};
pub use session::{Conclusion, ConclusionKind, GameSession, HistoryEntry, Phase, TurnOutcome};
pub use snapshot::{ChoiceView, LockedChoice, RelationshipView, StatusView, TurnSnapshot};
pub use state::{GameState, MAX_STRESS, MIN_STRESS};
