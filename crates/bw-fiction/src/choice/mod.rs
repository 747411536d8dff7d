//! Choice evaluation: which choices are available and what taking one does.

mod condition;
mod effect;

pub use condition::{Requirement, available_choices, is_available, unmet_requirements};
pub use effect::{AppliedEffects, apply_effects};
