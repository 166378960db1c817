use crate::{calendar::feed::CalendarEvent, normalize::names::Normalizer};

const SEPARATOR: &str = " - ";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A normalized fixture.
///
/// `team1`/`team2` are display names. `level` stays the raw feed code: only the planner
/// knows whether it needs a display label, and that lookup can fail.
pub struct Match {
    /// Kick-off as zero-padded `HH:MM`.
    pub time: String,
    /// Venue, verbatim from the feed.
    pub place: String,
    /// Raw competition code.
    pub level: String,
    /// Home side.
    pub team1: String,
    /// Away side.
    pub team2: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Raw pieces of a `<level> - <teamA> - <teamB>` title.
pub struct TitleParts<'t> {
    /// Everything before the first separator.
    pub level: &'t str,
    /// Home side, not yet normalized.
    pub team1: &'t str,
    /// Away side, not yet normalized.
    pub team2: &'t str,
}

/// Split a fixture title around the tracked team's name.
///
/// The first `" - "` always ends the level. Team names may contain the separator
/// themselves, so the tracked team's position decides the split: right after the level
/// means it is the home side, otherwise it is assumed to end the title.
/// Returns `None` when the title has no separator or does not name the tracked team.
pub fn split_title<'t>(title: &'t str, tracked: &str) -> Option<TitleParts<'t>> {
    let p1 = title.find(SEPARATOR)?;
    let p2 = title.find(tracked)?;
    let after_level = p1 + SEPARATOR.len();

    if p2 == after_level {
        let rest = p2 + tracked.len() + SEPARATOR.len();
        Some(TitleParts {
            level: &title[..p1],
            team1: &title[p2..p2 + tracked.len()],
            team2: title.get(rest..).unwrap_or(""),
        })
    } else {
        let end = title
            .len()
            .saturating_sub(tracked.len() + SEPARATOR.len());
        Some(TitleParts {
            level: &title[..p1],
            team1: title.get(after_level..end).unwrap_or(""),
            team2: &title[p2..p2 + tracked.len()],
        })
    }
}

/// Build a [`Match`] from one feed event.
pub fn extract_match(
    event: &CalendarEvent,
    tracked: &str,
    normalizer: &Normalizer<'_>,
) -> Option<Match> {
    let parts = split_title(&event.title, tracked)?;
    Some(Match {
        time: event.start.format("%H:%M").to_string(),
        place: event.location.clone(),
        level: parts.level.to_string(),
        team1: normalizer.normalize_team(parts.team1),
        team2: normalizer.normalize_team(parts.team2),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/extract.rs"]
mod tests;
