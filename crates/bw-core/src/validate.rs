//! Authoring-time checks for content files.
//!
//! The engine trusts its content at runtime: effects never fail and only an
//! unknown destination is reported, at the moment it is reached. These
//! checks find such defects before anyone plays the story.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use crate::content::{ContentGraph, Destination};
use crate::location::{Location, LocationKind};

/// A warning or error found while validating content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found (location id, `location/choice`, or a
    /// top-level field).
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a content graph.
///
/// Errors are defects that break play (a destination that does not exist, a
/// requirement that can never be met). Warnings point at content that is
/// legal but probably unintended, such as unreachable locations.
pub fn validate_content(graph: &ContentGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    validate_entry_points(graph, &mut issues);

    for (outcome, _) in graph.outcomes() {
        if graph.location(outcome).is_some() {
            issues.push(ValidationIssue::error(
                outcome,
                "outcome id is also a location id",
            ));
        }
    }

    for location in graph.locations() {
        validate_location(graph, location, &mut issues);
    }

    validate_reachability(graph, &mut issues);

    issues
}

fn validate_entry_points(graph: &ContentGraph, issues: &mut Vec<ValidationIssue>) {
    match graph.location(&graph.start) {
        None => issues.push(ValidationIssue::error(
            "start",
            format!("start location \"{}\" does not exist", graph.start),
        )),
        Some(loc) if loc.is_dialogue() => issues.push(ValidationIssue::error(
            "start",
            format!("start location \"{}\" is a dialogue", graph.start),
        )),
        Some(_) => {}
    }

    match graph.location(&graph.hub) {
        None => issues.push(ValidationIssue::error(
            "hub",
            format!("hub location \"{}\" does not exist", graph.hub),
        )),
        Some(loc) if loc.is_dialogue() => issues.push(ValidationIssue::error(
            "hub",
            format!("hub location \"{}\" is a dialogue", graph.hub),
        )),
        Some(_) => {}
    }

    let mut seen = HashSet::new();
    for character in &graph.characters {
        if !seen.insert(character) {
            issues.push(ValidationIssue::warning(
                "characters",
                format!("character \"{character}\" is listed twice"),
            ));
        }
    }
}

fn validate_location(graph: &ContentGraph, location: &Location, issues: &mut Vec<ValidationIssue>) {
    if location.choices.is_empty() {
        let message = match location.kind {
            LocationKind::Exploration => "no choices; reaching it deadlocks the investigation",
            LocationKind::Dialogue => "dialogue has no choices; it returns to the hub at once",
        };
        issues.push(ValidationIssue::warning(&location.id, message));
    }

    for threshold in location.time_descriptions.keys() {
        if *threshold <= 0 {
            issues.push(ValidationIssue::warning(
                &location.id,
                format!("time threshold {threshold} is never shown before the timeout ending"),
            ));
        }
    }

    let mut choice_ids = HashSet::new();
    for choice in &location.choices {
        let subject = format!("{}/{}", location.id, choice.id);

        if !choice_ids.insert(choice.id.as_str()) {
            issues.push(ValidationIssue::error(&subject, "duplicate choice id"));
        }

        match graph.resolve(&choice.destination) {
            Destination::Unknown => issues.push(ValidationIssue::error(
                &subject,
                format!("unknown destination \"{}\"", choice.destination),
            )),
            Destination::Location(dest)
                if location.is_dialogue() && dest.id != graph.hub =>
            {
                issues.push(ValidationIssue::warning(
                    &subject,
                    format!(
                        "dialogue choices return to the hub; destination \"{}\" is ignored",
                        dest.id
                    ),
                ));
            }
            _ => {}
        }

        if choice.time_cost < 0 {
            issues.push(ValidationIssue::error(
                &subject,
                format!("negative time cost {}", choice.time_cost),
            ));
        }

        for id in &choice.evidence_add {
            if !graph.evidence.contains(id) {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("grants unknown evidence \"{id}\""),
                ));
            }
        }

        for name in &choice.required_evidence {
            if graph.evidence.find_by_name(name).is_none() {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("requires evidence \"{name}\" which is not in the catalog"),
                ));
            }
        }

        for character in choice.relationship_changes.keys() {
            if !graph.characters.contains(character) {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("adjusts unknown character \"{character}\""),
                ));
            }
        }
    }
}

/// Warn about locations no sequence of choices can reach.
///
/// Dialogues and outcomes send the player back to the hub, so reaching
/// either one makes the hub reachable too. A dialogue choice naming another
/// location still lands on the hub.
fn validate_reachability(graph: &ContentGraph, issues: &mut Vec<ValidationIssue>) {
    if graph.location(&graph.start).is_none() {
        return;
    }

    let mut reached: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    reached.insert(graph.start.as_str());
    queue.push_back(graph.start.as_str());

    while let Some(id) = queue.pop_front() {
        let Some(location) = graph.location(id) else {
            continue;
        };

        let mut next: Vec<&str> = Vec::new();
        if location.is_dialogue() {
            next.push(graph.hub.as_str());
        }
        for choice in &location.choices {
            match graph.resolve(&choice.destination) {
                Destination::Location(dest) if !location.is_dialogue() => {
                    next.push(dest.id.as_str());
                }
                Destination::Location(_) | Destination::Outcome(_) => {
                    next.push(graph.hub.as_str());
                }
                Destination::Unknown => {}
            }
        }

        for id in next {
            if reached.insert(id) {
                queue.push_back(id);
            }
        }
    }

    for location in graph.locations() {
        if !reached.contains(location.id.as_str()) {
            issues.push(ValidationIssue::warning(
                &location.id,
                "unreachable from the start location",
            ));
        }
    }
}
