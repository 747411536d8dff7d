use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Catalog key for an evidence entry.
pub type EvidenceId = String;

/// A collectible clue.
///
/// Collected evidence is identified by its display `name`: the player never
/// holds two entries with the same name, and requirements and endings refer
/// to evidence by name. The catalog guarantees that names are unique, so the
/// `id` and `name` of an entry always identify the same item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Catalog key, referenced by choices that grant this evidence.
    pub id: EvidenceId,
    /// Human-readable name, unique across the catalog.
    pub name: String,
    /// One-line description shown in the status panel.
    #[serde(default)]
    pub description: String,
    /// Free-form categories (e.g. "technical", "medical").
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Evidence {
    /// Create an evidence entry with no tags.
    pub fn new(
        id: impl Into<EvidenceId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: BTreeSet::new(),
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// Immutable registry of every evidence item a story can grant.
#[derive(Debug, Clone, Default)]
pub struct EvidenceCatalog {
    items: BTreeMap<EvidenceId, Evidence>,
    by_name: HashMap<String, EvidenceId>,
}

impl EvidenceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of entries, rejecting duplicate ids or names.
    pub fn from_items(items: impl IntoIterator<Item = Evidence>) -> CoreResult<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Register an entry.
    pub fn insert(&mut self, evidence: Evidence) -> CoreResult<()> {
        if self.items.contains_key(&evidence.id) {
            return Err(CoreError::DuplicateEvidence(evidence.id));
        }
        if let Some(first) = self.by_name.get(&evidence.name) {
            return Err(CoreError::DuplicateEvidenceName {
                name: evidence.name,
                first: first.clone(),
                second: evidence.id,
            });
        }

        self.by_name
            .insert(evidence.name.clone(), evidence.id.clone());
        self.items.insert(evidence.id.clone(), evidence);
        Ok(())
    }

    /// Look up an entry by catalog id.
    pub fn get(&self, id: &str) -> Option<&Evidence> {
        self.items.get(id)
    }

    /// Look up an entry by display name (exact match).
    pub fn find_by_name(&self, name: &str) -> Option<&Evidence> {
        self.by_name.get(name).and_then(|id| self.items.get(id))
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Evidence> {
        self.items.values()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
