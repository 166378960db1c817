use std::collections::BTreeMap;

use crate::foundation::{
    config::Config,
    error::{PostError, PostResult},
};

#[derive(Clone, Copy, Debug)]
/// Maps raw feed strings to display strings using the configured tables.
pub struct Normalizer<'a> {
    teams: &'a BTreeMap<String, String>,
    levels: &'a BTreeMap<String, String>,
}

impl<'a> Normalizer<'a> {
    /// Borrow the team and level tables of `config`.
    pub fn new(config: &'a Config) -> Self {
        Self {
            teams: &config.team_names,
            levels: &config.levels,
        }
    }

    /// Display name for a raw team name. Unknown teams pass through trimmed.
    pub fn normalize_team(&self, raw: &str) -> String {
        let key = raw.trim();
        self.teams
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Display label for a raw competition code.
    ///
    /// There is no passthrough: an unknown code must stop the match from being posted
    /// under a wrong label.
    pub fn normalize_level(&self, raw: &str) -> PostResult<&'a str> {
        self.levels
            .get(raw)
            .map(String::as_str)
            .ok_or_else(|| PostError::UnknownLevel(raw.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/names.rs"]
mod tests;
