use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of what the investigation is currently focused on.
///
/// Set by choices that carry a `track_change`; purely informational for the
/// rules, but shown to the player in the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// No focus chosen yet.
    #[default]
    None,
    /// Systems, logs, and the house AI.
    Technical,
    /// Family members and their secrets.
    Personal,
    /// Medical history and records.
    Medical,
}

impl Track {
    /// The lowercase identifier used in content files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::None => "none",
            Track::Technical => "technical",
            Track::Personal => "personal",
            Track::Medical => "medical",
        }
    }

    /// The capitalized name shown in the status panel.
    pub fn title(&self) -> &'static str {
        match self {
            Track::None => "None",
            Track::Technical => "Technical",
            Track::Personal => "Personal",
            Track::Medical => "Medical",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
