use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::foundation::error::{PostError, PostResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Every static table the generator consults.
///
/// Loaded once before any job runs and passed by reference afterwards; nothing mutates it.
/// All fields default to the club's production tables, so a JSON file only needs to list
/// what it overrides.
pub struct Config {
    /// The team whose fixtures drive post generation.
    pub tracked_team: TrackedTeam,
    /// Raw feed team name -> display name. Unknown names pass through.
    pub team_names: BTreeMap<String, String>,
    /// Raw competition code -> display label. Unknown codes are an error.
    pub levels: BTreeMap<String, String>,
    /// Display team name -> logo file name inside the logo directory.
    pub logos: BTreeMap<String, String>,
    /// Competition prefixes that get their own trio of templates. First match wins.
    pub dedicated_levels: Vec<DedicatedLevel>,
    /// Number of "other" matches on a date -> generic template pair.
    pub generic_templates: BTreeMap<usize, GenericTemplates>,
    /// Uppercase weekday names, Monday first.
    pub weekdays: Vec<String>,
    /// Uppercase month names, January first.
    pub months: Vec<String>,
    /// Directory layout used by the CLI when no flag overrides it.
    pub paths: PathsConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Identity and colors of the tracked team.
pub struct TrackedTeam {
    /// Literal name as it appears in feed titles.
    pub feed_name: String,
    /// Substring that marks the tracked team in display names.
    pub marker: String,
    /// Fill color applied to team text containing [`TrackedTeam::marker`].
    pub color: String,
    /// Fill color applied to every other team text.
    pub opponent_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A competition with its own story / match-day / results templates.
pub struct DedicatedLevel {
    /// Raw level prefix, e.g. `H1`.
    pub prefix: String,
    /// Promotional story template (rasterized).
    pub story: String,
    /// Match-day template (rasterized).
    pub match_day: String,
    /// Results template (vector only).
    pub results: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Generic template pair for a fixed count of matches.
pub struct GenericTemplates {
    /// Match-day template (rasterized).
    pub match_day: String,
    /// Results template (vector only).
    pub results: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Default directories, relative to the working directory.
pub struct PathsConfig {
    /// Directory holding `<template>.svg` files.
    pub templates: PathBuf,
    /// Directory holding logo images.
    pub logos: PathBuf,
    /// Output root; `svg/` and `png/` are created below it.
    pub output: PathBuf,
    /// Rasterizer executable.
    pub rasterizer: PathBuf,
}

impl Default for TrackedTeam {
    fn default() -> Self {
        Self {
            feed_name: "Nyon HandBall La Côte".to_string(),
            marker: "NHB".to_string(),
            color: "#e0038c".to_string(),
            opponent_color: "#ffffff".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: PathBuf::from("templates"),
            logos: PathBuf::from("logos_clubs"),
            output: PathBuf::from("outputs"),
            rasterizer: PathBuf::from("inkscape"),
        }
    }
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        let team_names = table(&[
            ("Nyon HandBall La Côte", "NHB La Côte"),
            ("Lausanne-Ville/Cugy Handball", "LVC Handball"),
            ("Lancy Plan-les-Ouates Hb", "Lancy PLO"),
            ("SG Genève Paquis - Lancy PLO", "Genève Paquis - Lancy"),
            ("SG Genève /TCGG/ Nyon", "SG Genève/TCGG/Nyon"),
            ("SG Wacker Thun 2 / Steffisburg", "Wacker Thun/Steffisburg"),
        ]);
        let levels = table(&[
            ("M15G-P S1-06", "M15P"),
            ("M13G-P S1-06", "M13P"),
            ("H1-03", "1ière Ligue Hommes"),
            ("H4-09", "H4"),
            ("M14F-P-06", "M14P"),
            ("M16F-P-08", "M16P"),
            ("D3-08", "3ième Ligue Dames"),
            (
                "Cup Mobilière H - Tour de qualification",
                "Cup Mobilière H",
            ),
        ]);
        let logos = table(&[
            ("NHB La Côte", "NHB.png"),
            ("LVC Handball", "LVC.png"),
            ("KTV Visp Handball", "Visp.png"),
            ("Handball Oberaargau", "HVH.png"),
            ("SG TV Solothurn", "TV_Solothurn.png"),
            ("SG WEST Crissier", "crissier.png"),
            ("SG TV Birsfelden", "TVBirsfelden.png"),
            ("TV Pratteln NS 1", "NSPratteln.png"),
            ("Wacker Thun/Steffisburg", "Wacker_Thun.png"),
        ]);

        let dedicated_levels = vec![
            DedicatedLevel {
                prefix: "H1".to_string(),
                story: "story_match_day".to_string(),
                match_day: "match_day_h1".to_string(),
                results: "results_h1".to_string(),
            },
            DedicatedLevel {
                prefix: "D3".to_string(),
                story: "story_match_day_dames".to_string(),
                match_day: "match_day_d3".to_string(),
                results: "results_d3".to_string(),
            },
        ];

        let generic_templates = (1..=4)
            .map(|n| {
                (
                    n,
                    GenericTemplates {
                        match_day: format!("match_day_{n}"),
                        results: format!("results_{n}"),
                    },
                )
            })
            .collect();

        Self {
            tracked_team: TrackedTeam::default(),
            team_names,
            levels,
            logos,
            dedicated_levels,
            generic_templates,
            weekdays: names(&[
                "LUNDI", "MARDI", "MERCREDI", "JEUDI", "VENDREDI", "SAMEDI", "DIMANCHE",
            ]),
            months: names(&[
                "JANVIER",
                "FEVRIER",
                "MARS",
                "AVRIL",
                "MAI",
                "JUIN",
                "JUILLET",
                "AOUT",
                "SEPTEMBRE",
                "OCTOBRE",
                "NOVEMBRE",
                "DECEMBRE",
            ]),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> PostResult<Self> {
        let cfg: Config = serde_json::from_reader(r)
            .map_err(|e| PostError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PostResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PostError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject tables the generator cannot work with.
    pub fn validate(&self) -> PostResult<()> {
        let team = &self.tracked_team;
        if team.feed_name.trim().is_empty() {
            return Err(PostError::config("tracked_team.feed_name must be non-empty"));
        }
        if team.marker.is_empty() {
            return Err(PostError::config("tracked_team.marker must be non-empty"));
        }
        if team.color.trim().is_empty() || team.opponent_color.trim().is_empty() {
            return Err(PostError::config("tracked_team colors must be non-empty"));
        }
        if self.weekdays.len() != 7 {
            return Err(PostError::config(format!(
                "weekdays must list 7 names, got {}",
                self.weekdays.len()
            )));
        }
        if self.months.len() != 12 {
            return Err(PostError::config(format!(
                "months must list 12 names, got {}",
                self.months.len()
            )));
        }
        if self.generic_templates.contains_key(&0) {
            return Err(PostError::config(
                "generic_templates cannot be keyed by a count of 0",
            ));
        }
        for level in &self.dedicated_levels {
            if level.prefix.is_empty() {
                return Err(PostError::config("dedicated level prefix must be non-empty"));
            }
        }

        // normalize_team must stay idempotent: a display name may not be re-mapped.
        for (raw, display) in &self.team_names {
            if let Some(again) = self.team_names.get(display.trim())
                && again != display
            {
                return Err(PostError::config(format!(
                    "team_names maps '{raw}' to '{display}', which is itself mapped to '{again}'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
