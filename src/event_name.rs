//! Event header parsing.
//!
//! Event header rows look like `Event 12  Girls 10 & Under 50 SC Meter Freestyle`.
//! [`extract_event_header`] cuts the title out of the raw cell and
//! [`parse_event_name`] pulls gender, age group, distance and stroke from it.

use crate::constants::DEFAULT_AGE_GROUP;
use crate::constants::markers::EVENT_TITLE_SEPARATOR;
use crate::models::{EventDetails, Gender, Stroke};
use regex::Regex;
use std::sync::LazyLock;

/// Gender, optional age group, distance and stroke of a short course meter event.
/// An age group is digits followed by `& Under`, `Year Olds` or `<digits> & Over`.
/// `Freestyle Relay` is tried before `Freestyle` so relay titles keep their stroke.
static EVENT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<gender>Girls|Boys|Mixed)\s*(?P<age_group>\d+\s*(?:&\s*Under|Year\s*Olds|\d+\s*&\s*Over))?\s*(?P<distance>\d+)\s*SC\s*Meter\s*(?P<stroke>Freestyle\s*Relay|Freestyle|Butterfly|Medley Relay|Backstroke|Breaststroke|IM)",
    )
    .expect("Invalid event name regex")
});

/// Cut the event title out of a header cell.
///
/// Drops the `Event <n>` prefix (everything up to the first double space)
/// and any closing parenthesis left at the end.
pub fn extract_event_header(cell: &str) -> String {
    let cell = cell.trim();
    let title = match cell.find(EVENT_TITLE_SEPARATOR) {
        Some(index) => &cell[index + EVENT_TITLE_SEPARATOR.len()..],
        None => cell,
    };

    title.trim().trim_end_matches(')').trim_end().to_string()
}

/// Parse an event title into its details.
///
/// Returns [`EventDetails::unknown`] when the title does not match; the
/// caller decides how to report that.
pub fn parse_event_name(title: &str) -> EventDetails {
    let Some(captures) = EVENT_NAME_REGEX.captures(title.trim()) else {
        return EventDetails::unknown();
    };

    let gender = captures
        .name("gender")
        .and_then(|m| Gender::from_token(m.as_str()));
    let distance = captures
        .name("distance")
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let stroke = captures
        .name("stroke")
        .and_then(|m| Stroke::from_token(m.as_str()));

    match (gender, distance, stroke) {
        (Some(gender), Some(distance), Some(stroke)) => EventDetails {
            gender: Some(gender),
            age_group: Some(
                captures
                    .name("age_group")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| DEFAULT_AGE_GROUP.to_string()),
            ),
            distance: Some(distance),
            stroke: Some(stroke),
        },
        _ => EventDetails::unknown(),
    }
}
