use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use icalendar::{Calendar, CalendarComponent, Component};

use crate::foundation::error::{PostError, PostResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One fixture as read from the calendar feed.
pub struct CalendarEvent {
    /// Free-text title (`SUMMARY`), e.g. `H1-03 - Home - Away`.
    pub title: String,
    /// Wall-clock start as written in the feed.
    pub start: NaiveDateTime,
    /// Venue (`LOCATION`), empty when the feed has none.
    pub location: String,
}

/// Read and parse an iCalendar file.
pub fn read_feed(path: impl AsRef<Path>) -> PostResult<Vec<CalendarEvent>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        PostError::calendar(format!("read calendar '{}': {e}", path.display()))
    })?;
    parse_feed(&text)
}

/// Parse iCalendar text into events, in feed order.
///
/// Events without a title or without a usable `DTSTART` are dropped.
pub fn parse_feed(text: &str) -> PostResult<Vec<CalendarEvent>> {
    if !text.contains("BEGIN:VCALENDAR") {
        return Err(PostError::calendar("feed has no VCALENDAR block"));
    }
    let calendar: Calendar = text
        .parse()
        .map_err(|e| PostError::calendar(format!("parse feed: {e}")))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(event) = component else {
            continue;
        };

        let Some(title) = event.get_summary() else {
            tracing::debug!("skipping event without SUMMARY");
            continue;
        };
        let Some(start) = event
            .properties()
            .get("DTSTART")
            .and_then(|p| parse_start(p.value()))
        else {
            tracing::debug!(title, "skipping event without a usable DTSTART");
            continue;
        };
        let location = event
            .properties()
            .get("LOCATION")
            .map(|p| unescape_text(p.value()))
            .unwrap_or_default();

        events.push(CalendarEvent {
            title: unescape_text(title),
            start,
            location,
        });
    }

    tracing::debug!(count = events.len(), "parsed calendar feed");
    Ok(events)
}

/// `DTSTART` value as local wall-clock time. Date-only values start at midnight.
pub fn parse_start(val: &str) -> Option<NaiveDateTime> {
    let val = val.trim();
    if val.len() == 8 {
        return NaiveDate::parse_from_str(val, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    let val = val.strip_suffix('Z').unwrap_or(val);
    NaiveDateTime::parse_from_str(val, "%Y%m%dT%H%M%S").ok()
}

fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/feed.rs"]
mod tests;
