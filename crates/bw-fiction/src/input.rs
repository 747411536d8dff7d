//! Player input resolution with fuzzy matching.

use bw_core::ChoiceId;
use strsim::jaro_winkler;

use crate::snapshot::ChoiceView;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Resolve what the player typed to one of the offered choices.
///
/// Tried in order: a 1-based menu number, the exact choice id, the id or
/// label ignoring case, and finally the closest label or id by
/// Jaro-Winkler similarity.
pub fn resolve_choice(input: &str, choices: &[ChoiceView]) -> Option<ChoiceId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| choices.get(i))
            .map(|c| c.id.clone());
    }

    if let Some(choice) = choices.iter().find(|c| c.id == input) {
        return Some(choice.id.clone());
    }

    if let Some(choice) = choices
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(input) || c.label.eq_ignore_ascii_case(input))
    {
        return Some(choice.id.clone());
    }

    fuzzy_match(input, choices, FUZZY_THRESHOLD)
        .first()
        .map(|(id, _)| id.clone())
}

/// Choices whose label or id scores above the threshold, best first.
pub fn fuzzy_match(input: &str, choices: &[ChoiceView], threshold: f64) -> Vec<(ChoiceId, f64)> {
    let input_lower = input.to_lowercase();
    let mut matches: Vec<(ChoiceId, f64)> = choices
        .iter()
        .filter_map(|choice| {
            let score = jaro_winkler(&input_lower, &choice.label.to_lowercase())
                .max(jaro_winkler(&input_lower, &choice.id.to_lowercase()));
            (score >= threshold).then(|| (choice.id.clone(), score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// Suggest choice labels that start with, contain, or resemble the input.
pub fn suggest_choices(partial: &str, choices: &[ChoiceView], limit: usize) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();
    if partial_lower.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<(String, f64)> = choices
        .iter()
        .filter_map(|choice| {
            let label_lower = choice.label.to_lowercase();
            if label_lower.starts_with(&partial_lower) {
                Some((choice.label.clone(), 2.0))
            } else if label_lower.contains(&partial_lower) {
                Some((choice.label.clone(), 1.0))
            } else {
                let score = jaro_winkler(&partial_lower, &label_lower);
                (score >= 0.6).then(|| (choice.label.clone(), score))
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    suggestions
        .into_iter()
        .take(limit)
        .map(|(label, _)| label)
        .collect()
}
