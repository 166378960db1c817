use std::collections::BTreeMap;

/// Key of the date slot shared by every template.
pub const DATE_KEY: &str = "date";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Per-match slot suffixes of the `match<N>-<field>` naming convention.
pub enum SlotField {
    /// Home team text.
    Team1,
    /// Away team text.
    Team2,
    /// Kick-off text.
    Time,
    /// Venue text.
    Place,
    /// Home team logo image.
    LogoTeam1,
    /// Away team logo image.
    LogoTeam2,
}

impl SlotField {
    /// Suffix used in template labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Team1 => "team1",
            Self::Team2 => "team2",
            Self::Time => "time",
            Self::Place => "place",
            Self::LogoTeam1 => "logo-team1",
            Self::LogoTeam2 => "logo-team2",
        }
    }
}

/// Label of `field` for the 1-based match slot `id`, e.g. `match2-time`.
pub fn slot_key(id: usize, field: SlotField) -> String {
    format!("match{id}-{}", field.as_str())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Label -> text mapping for one template render.
///
/// The substitution pass consumes entries as it matches them, so a set lives for exactly
/// one pass; clone it first when the values are needed again.
pub struct ReplacementSet {
    entries: BTreeMap<String, String>,
}

impl ReplacementSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge every entry of `other`, overwriting shared keys.
    pub fn extend(&mut self, other: ReplacementSet) {
        self.entries.extend(other.entries);
    }

    /// Value for `key`, if still present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is still waiting to be consumed.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove and return the value for `key`.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Number of remaining entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` once every entry has been consumed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Remaining entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/replacements.rs"]
mod tests;
