//! Time-sensitive location text.

use bw_core::Location;

/// Pick the text to show for a location given the hours left.
///
/// Returns the text of the smallest threshold that `time_remaining` has
/// fallen to or below, so the most urgent matching message wins. Falls back
/// to the base description when no threshold applies.
pub fn select_description(location: &Location, time_remaining: i32) -> &str {
    location
        .time_descriptions
        .iter()
        .find(|(threshold, _)| time_remaining <= **threshold)
        .map_or(location.description.as_str(), |(_, text)| text.as_str())
}
