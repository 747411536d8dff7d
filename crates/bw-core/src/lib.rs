//! Content model for the Blackwood interactive fiction engine.
//!
//! A story is a [`ContentGraph`]: locations joined by choices, an evidence
//! catalog, the characters whose relationship scores the story tracks, and
//! the narrative text for outcomes and endings. This crate only describes
//! content. The rules that evaluate and apply it live in `bw-fiction`.
//!
//! Content is normally loaded from JSON, either a file on disk or the
//! Blackwood Manor asset embedded in this crate ([`ContentGraph::builtin`]).

/// Choices: the edges of the content graph.
pub mod choice;
/// The content graph and its loader.
pub mod content;
/// Error types used throughout the crate.
pub mod error;
/// Evidence items and the catalog that owns them.
pub mod evidence;
/// Locations: the nodes of the content graph.
pub mod location;
/// Narrative focus tracks.
pub mod track;
/// Authoring-time checks for content files.
pub mod validate;

pub use choice::{CharacterId, Choice, ChoiceId, FlagId, ItemId, RelationshipDelta};
pub use content::{ContentGraph, Destination};
pub use error::{CoreError, CoreResult};
pub use evidence::{Evidence, EvidenceCatalog, EvidenceId};
pub use location::{Location, LocationId, LocationKind};
pub use track::Track;
pub use validate::{ValidationIssue, validate_content};
