use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::choice::CharacterId;
use crate::error::{CoreError, CoreResult};
use crate::evidence::{Evidence, EvidenceCatalog};
use crate::location::{Location, LocationId};

/// The Blackwood Manor story shipped with the engine.
const BUILTIN_CONTENT: &str = include_str!("../content/blackwood_manor.json");

/// What a choice destination refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination<'a> {
    /// A location in the graph.
    Location(&'a Location),
    /// An outcome: narrative text shown before returning to the hub.
    Outcome(&'a str),
    /// Nothing with that id exists.
    Unknown,
}

/// On-disk shape of a content file.
#[derive(Debug, Deserialize)]
struct ContentFile {
    title: String,
    start: LocationId,
    hub: LocationId,
    #[serde(default)]
    characters: Vec<CharacterId>,
    #[serde(default)]
    evidence: Vec<Evidence>,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    outcomes: BTreeMap<LocationId, String>,
    #[serde(default)]
    endings: BTreeMap<String, String>,
}

/// A complete story: locations, evidence, characters, and narrative text.
///
/// The graph is immutable once loaded and is shared read-only by every
/// session playing it. Referential integrity (destinations, evidence ids) is
/// not enforced here; see [`crate::validate_content`].
#[derive(Debug, Clone)]
pub struct ContentGraph {
    /// Story title.
    pub title: String,
    /// Location a new session starts at.
    pub start: LocationId,
    /// Location the player returns to after dialogues and outcomes.
    pub hub: LocationId,
    /// Characters whose relationship scores are tracked, in display order.
    pub characters: Vec<CharacterId>,
    /// Every evidence item the story can grant.
    pub evidence: EvidenceCatalog,
    locations: BTreeMap<LocationId, Location>,
    outcomes: BTreeMap<LocationId, String>,
    endings: BTreeMap<String, String>,
}

impl ContentGraph {
    /// Create an empty graph.
    pub fn new(
        title: impl Into<String>,
        start: impl Into<LocationId>,
        hub: impl Into<LocationId>,
    ) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            hub: hub.into(),
            characters: Vec::new(),
            evidence: EvidenceCatalog::new(),
            locations: BTreeMap::new(),
            outcomes: BTreeMap::new(),
            endings: BTreeMap::new(),
        }
    }

    /// Parse a graph from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let file: ContentFile = serde_json::from_str(json)?;

        let mut graph = Self::new(file.title, file.start, file.hub);
        graph.characters = file.characters;
        graph.evidence = EvidenceCatalog::from_items(file.evidence)?;
        for location in file.locations {
            graph.add_location(location)?;
        }
        graph.outcomes = file.outcomes;
        for (ending, text) in file.endings {
            graph.set_ending_text(ending, text);
        }
        Ok(graph)
    }

    /// Read and parse a JSON content file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The Blackwood Manor story embedded in this crate.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(BUILTIN_CONTENT)
    }

    /// Add a location. Fails if the id is already taken.
    pub fn add_location(&mut self, location: Location) -> CoreResult<()> {
        if self.locations.contains_key(&location.id) {
            return Err(CoreError::DuplicateLocation(location.id));
        }
        self.locations.insert(location.id.clone(), location);
        Ok(())
    }

    /// Register an evidence item.
    pub fn add_evidence(&mut self, evidence: Evidence) -> CoreResult<()> {
        self.evidence.insert(evidence)
    }

    /// Register an outcome and its narrative text.
    pub fn add_outcome(&mut self, id: impl Into<LocationId>, text: impl Into<String>) {
        self.outcomes.insert(id.into(), text.into());
    }

    /// Override the narrative text for an ending id.
    pub fn set_ending_text(&mut self, ending: impl Into<String>, text: impl Into<String>) {
        self.endings.insert(ending.into(), text.into());
    }

    /// Set the tracked characters.
    pub fn with_characters<I, S>(mut self, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CharacterId>,
    {
        self.characters = characters.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a location.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Iterate over all locations in id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Narrative text of an outcome.
    pub fn outcome(&self, id: &str) -> Option<&str> {
        self.outcomes.get(id).map(String::as_str)
    }

    /// Iterate over `(id, text)` outcome pairs in id order.
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Content-supplied narrative text for an ending id, if any.
    pub fn ending_text(&self, ending: &str) -> Option<&str> {
        self.endings.get(ending).map(String::as_str)
    }

    /// Iterate over `(ending id, text)` pairs supplied by the content.
    pub fn ending_texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.endings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Resolve a choice destination. Locations take precedence over outcomes.
    pub fn resolve(&self, id: &str) -> Destination<'_> {
        if let Some(location) = self.locations.get(id) {
            Destination::Location(location)
        } else if let Some(text) = self.outcomes.get(id) {
            Destination::Outcome(text)
        } else {
            Destination::Unknown
        }
    }
}
