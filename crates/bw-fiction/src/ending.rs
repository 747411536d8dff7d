//! Terminal conditions of an investigation.

use std::fmt;

use serde::Serialize;

use crate::state::{GameState, MAX_STRESS};

/// A narrative ending.
///
/// Variants are declared in resolution priority: when several conditions
/// hold at once, the first one in [`Ending::ALL`] wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// The clock ran out.
    Timeout,
    /// Marcus lives on inside Ada.
    AiConspiracy,
    /// Elena's embezzlement is exposed.
    PerfectCrime,
    /// Gregory's part in the breach comes to light.
    #[serde(rename = "system_breach_ending")]
    SystemBreach,
    /// Stress overwhelmed the investigator.
    PersonalTragedy,
    /// Marcus's illness and Ada's protocols are connected.
    MarcusAiConspiracy,
    /// Victoria joins the investigation.
    VictoriaAlliance,
}

impl Ending {
    /// Every ending, in resolution priority.
    pub const ALL: [Ending; 7] = [
        Ending::Timeout,
        Ending::AiConspiracy,
        Ending::PerfectCrime,
        Ending::SystemBreach,
        Ending::PersonalTragedy,
        Ending::MarcusAiConspiracy,
        Ending::VictoriaAlliance,
    ];

    /// Stable id, also the key for ending text in content files.
    pub fn id(&self) -> &'static str {
        match self {
            Ending::Timeout => "timeout",
            Ending::AiConspiracy => "ai_conspiracy",
            Ending::PerfectCrime => "perfect_crime",
            Ending::SystemBreach => "system_breach_ending",
            Ending::PersonalTragedy => "personal_tragedy",
            Ending::MarcusAiConspiracy => "marcus_ai_conspiracy",
            Ending::VictoriaAlliance => "victoria_alliance",
        }
    }

    /// Human-readable name.
    pub fn title(&self) -> &'static str {
        match self {
            Ending::Timeout => "Out of Time",
            Ending::AiConspiracy => "The AI Conspiracy",
            Ending::PerfectCrime => "The Perfect Crime",
            Ending::SystemBreach => "System Breach",
            Ending::PersonalTragedy => "Personal Tragedy",
            Ending::MarcusAiConspiracy => "Marcus and the Machine",
            Ending::VictoriaAlliance => "Victoria's Alliance",
        }
    }

    /// Narrative used when the content supplies none.
    pub fn default_text(&self) -> &'static str {
        match self {
            Ending::Timeout => {
                "The storm has made the mansion inaccessible. The investigation remains unsolved..."
            }
            Ending::AiConspiracy => {
                "You've discovered the truth: Marcus's consciousness lives on in Ada."
            }
            Ending::PerfectCrime => "Elena's perfect crime is unveiled.",
            Ending::SystemBreach => "The system breach exposes Gregory's involvement.",
            Ending::PersonalTragedy => {
                "The mounting stress overwhelmed you, and the mysteries of Blackwood Manor remain unsolved."
            }
            Ending::MarcusAiConspiracy => "Marcus's decline and Ada's protocols were one story.",
            Ending::VictoriaAlliance => "Victoria walks the hidden passages at your side.",
        }
    }

    /// Short description of the triggering condition.
    pub fn condition_summary(&self) -> &'static str {
        match self {
            Ending::Timeout => "time remaining <= 0",
            Ending::AiConspiracy => "Server Logs, found_secret_passage, ada > 3",
            Ending::PerfectCrime => "Financial Records, found_secret_passage, elena < -2",
            Ending::SystemBreach => "System Breach, gregory > 2",
            Ending::PersonalTragedy => "stress >= 10",
            Ending::MarcusAiConspiracy => "marcus_ai_connection, ada < 0",
            Ending::VictoriaAlliance => "victoria > 3, Secret Passage Map",
        }
    }

    /// Whether this ending's condition holds. Unset flags read as false.
    pub fn holds(&self, state: &GameState) -> bool {
        match self {
            Ending::Timeout => state.time_remaining <= 0,
            Ending::AiConspiracy => {
                state.has_evidence("Server Logs")
                    && state.flag_is_set("found_secret_passage")
                    && state.relationship("ada") > 3
            }
            Ending::PerfectCrime => {
                state.has_evidence("Financial Records")
                    && state.flag_is_set("found_secret_passage")
                    && state.relationship("elena") < -2
            }
            Ending::SystemBreach => {
                state.has_evidence("System Breach") && state.relationship("gregory") > 2
            }
            Ending::PersonalTragedy => state.stress_level >= MAX_STRESS,
            Ending::MarcusAiConspiracy => {
                state.flag_is_set("marcus_ai_connection") && state.relationship("ada") < 0
            }
            Ending::VictoriaAlliance => {
                state.relationship("victoria") > 3 && state.has_evidence("Secret Passage Map")
            }
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The first ending whose condition holds, in priority order.
pub fn check_ending(state: &GameState) -> Option<Ending> {
    Ending::ALL.into_iter().find(|ending| ending.holds(state))
}
