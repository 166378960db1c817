use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    calendar::{
        extract::{Match, extract_match},
        feed::{CalendarEvent, parse_feed},
    },
    foundation::error::PostResult,
    normalize::names::Normalizer,
};

/// Matches per calendar date, dates ascending, matches in feed order.
pub type DateMatches = BTreeMap<NaiveDate, Vec<Match>>;

/// Group the tracked team's fixtures by date.
///
/// Only events whose title contains `tracked` (case-sensitive) are kept.
pub fn group_by_date(
    events: &[CalendarEvent],
    tracked: &str,
    normalizer: &Normalizer<'_>,
) -> DateMatches {
    let mut out = DateMatches::new();
    for event in events.iter().filter(|e| e.title.contains(tracked)) {
        let Some(m) = extract_match(event, tracked, normalizer) else {
            tracing::warn!(title = %event.title, "cannot split fixture title, skipping event");
            continue;
        };
        out.entry(event.start.date()).or_default().push(m);
    }
    out
}

/// Parse a feed and group it; feed errors are fatal.
pub fn group_feed(
    text: &str,
    tracked: &str,
    normalizer: &Normalizer<'_>,
) -> PostResult<DateMatches> {
    let events = parse_feed(text)?;
    Ok(group_by_date(&events, tracked, normalizer))
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/group.rs"]
mod tests;
