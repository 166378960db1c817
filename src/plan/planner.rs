use chrono::{Datelike, NaiveDate};

use crate::{
    calendar::extract::Match,
    foundation::{
        config::{Config, DedicatedLevel},
        error::{PostError, PostResult},
    },
    normalize::names::Normalizer,
    plan::replacements::{DATE_KEY, ReplacementSet, SlotField, slot_key},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One template to fill for one date.
pub struct RenderJob {
    /// Bare template name, without extension.
    pub template: String,
    /// Label -> text mapping for the template.
    pub replacements: ReplacementSet,
    /// Whether a raster companion is produced.
    pub rasterize: bool,
}

#[derive(Debug)]
/// Everything planned for one date.
pub struct DatePlan {
    /// The fixture date.
    pub date: NaiveDate,
    /// Jobs in render order: dedicated trios in feed order, then the generic pair.
    pub jobs: Vec<RenderJob>,
    /// Job-scoped planning failures (the generic pair when its count is unsupported).
    pub skipped: Vec<PostError>,
}

/// `"<WEEKDAY> <day> <MONTH>"` with the configured names, e.g. `SAMEDI 1 MARS`.
pub fn format_post_date(date: NaiveDate, config: &Config) -> String {
    let weekday = date.weekday().num_days_from_monday() as usize;
    let month = date.month0() as usize;
    let weekday = config.weekdays.get(weekday).map_or("", String::as_str);
    let month = config.months.get(month).map_or("", String::as_str);
    format!("{weekday} {} {month}", date.day())
}

/// Classifies a date's matches and builds the replacement sets of each template.
#[derive(Clone, Copy, Debug)]
pub struct Planner<'a> {
    config: &'a Config,
    normalizer: Normalizer<'a>,
}

impl<'a> Planner<'a> {
    /// Planner over the tables of `config`.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            normalizer: Normalizer::new(config),
        }
    }

    /// Dedicated level whose prefix starts `raw_level`, first configured wins.
    pub fn dedicated_level(&self, raw_level: &str) -> Option<&'a DedicatedLevel> {
        self.config
            .dedicated_levels
            .iter()
            .find(|d| raw_level.starts_with(d.prefix.as_str()))
    }

    /// Plan every job of one date.
    ///
    /// An unknown level among the generic matches fails the whole date. A generic count
    /// without configured templates only drops the generic pair; dedicated jobs survive.
    pub fn plan_date(&self, date: NaiveDate, matches: &[Match]) -> PostResult<DatePlan> {
        let date_text = format_post_date(date, self.config);
        let mut jobs = Vec::new();
        let mut others: Vec<&Match> = Vec::new();

        for m in matches {
            let Some(level) = self.dedicated_level(&m.level) else {
                others.push(m);
                continue;
            };

            let mut rs = ReplacementSet::new();
            rs.insert(DATE_KEY, date_text.as_str());
            rs.extend(dedicated_replacements(m));

            for (template, rasterize) in [
                (&level.story, true),
                (&level.match_day, true),
                (&level.results, false),
            ] {
                jobs.push(RenderJob {
                    template: template.clone(),
                    replacements: rs.clone(),
                    rasterize,
                });
            }
        }

        let mut skipped = Vec::new();
        if !others.is_empty() {
            // Zero-padded HH:MM sorts correctly as text; the sort is stable for ties.
            others.sort_by(|a, b| a.time.cmp(&b.time));

            let mut rs = ReplacementSet::new();
            rs.insert(DATE_KEY, date_text.as_str());
            for (i, m) in others.iter().enumerate() {
                rs.extend(self.generic_replacements(m, i + 1)?);
            }

            match self.config.generic_templates.get(&others.len()) {
                Some(pair) => {
                    jobs.push(RenderJob {
                        template: pair.match_day.clone(),
                        replacements: rs.clone(),
                        rasterize: true,
                    });
                    jobs.push(RenderJob {
                        template: pair.results.clone(),
                        replacements: rs,
                        rasterize: false,
                    });
                }
                None => skipped.push(PostError::UnsupportedMatchCount(others.len())),
            }
        }

        Ok(DatePlan {
            date,
            jobs,
            skipped,
        })
    }

    /// Slot texts of a generic match: the tracked side carries the level label and the
    /// time slot also names the venue.
    pub fn generic_replacements(&self, m: &Match, id: usize) -> PostResult<ReplacementSet> {
        let level = self.normalizer.normalize_level(&m.level)?;
        let (mut team1, mut team2) = (m.team1.clone(), m.team2.clone());
        if team1.starts_with(self.config.tracked_team.marker.as_str()) {
            team1 = format!("{team1}-{level}");
        } else {
            team2 = format!("{team2}-{level}");
        }

        let mut rs = ReplacementSet::new();
        rs.insert(slot_key(id, SlotField::Team1), team1);
        rs.insert(slot_key(id, SlotField::Team2), team2);
        rs.insert(
            slot_key(id, SlotField::Time),
            format!("{} - {}", m.time, m.place),
        );
        Ok(rs)
    }
}

/// Slot texts of a dedicated match, always in slot 1.
pub fn dedicated_replacements(m: &Match) -> ReplacementSet {
    let mut rs = ReplacementSet::new();
    rs.insert(slot_key(1, SlotField::Team1), m.team1.as_str());
    rs.insert(slot_key(1, SlotField::Team2), m.team2.as_str());
    rs.insert(slot_key(1, SlotField::Time), m.time.as_str());
    rs.insert(slot_key(1, SlotField::Place), m.place.as_str());
    rs
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
