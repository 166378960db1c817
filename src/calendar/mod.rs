//! Calendar feed reading, fixture-title parsing and per-date grouping.

/// Fixture-title parsing into [`extract::Match`] records.
pub mod extract;
/// iCalendar feed reading.
pub mod feed;
/// Grouping of matches by calendar date.
pub mod group;
