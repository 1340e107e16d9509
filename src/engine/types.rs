// src/engine/types.rs
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Condition category read from a listing's label. `None` = no label ("new").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    #[default]
    None,
    Used,
    MinorDamage,
    UnknownMissing,
    MissingParts,
}

impl Condition {
    pub const LABELED: [Condition; 4] =
        [Condition::Used, Condition::MinorDamage, Condition::UnknownMissing, Condition::MissingParts];

    /// The exact label text the site renders for this category.
    pub fn phrase(self) -> &'static str {
        match self {
            Condition::None => "",
            Condition::Used => "Used",
            Condition::MinorDamage => "Minor Damage",
            Condition::UnknownMissing => "Unknown If Missing Parts",
            Condition::MissingParts => "Missing Parts",
        }
    }

    pub fn is_none(self) -> bool {
        self == Condition::None
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::None => "none",
            Condition::Used => "used",
            Condition::MinorDamage => "minorDamage",
            Condition::UnknownMissing => "unknownMissing",
            Condition::MissingParts => "missingParts",
        };
        f.write_str(name)
    }
}

/// What a single label says: a condition, a location, both, or neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Label {
    pub condition: Condition,
    pub location: Option<&'static str>,
}

impl Label {
    pub fn is_empty(&self) -> bool {
        self.condition.is_none() && self.location.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConditionRecord {
    pub condition: Condition,
    pub location: Option<String>,
}

/// Listing id → what its labels said. Rebuilt every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionMap {
    entries: HashMap<String, ConditionRecord>,
}

impl ConditionMap {
    /// Fold one label into the entry for `id`. A field is only overwritten by
    /// a label that actually carries it; a location-only label never erases a
    /// condition and vice versa.
    pub fn merge(&mut self, id: &str, label: Label) {
        if label.is_empty() {
            return;
        }
        let rec = self.entries.entry(s!(id)).or_default();
        if !label.condition.is_none() {
            rec.condition = label.condition;
        }
        if let Some(loc) = label.location {
            rec.location = Some(s!(loc));
        }
    }

    pub fn get(&self, id: &str) -> Option<&ConditionRecord> {
        self.entries.get(id)
    }

    /// Entry for `id`, or the "no labels seen" record.
    pub fn lookup(&self, id: &str) -> ConditionRecord {
        self.entries.get(id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by id, for stable output.
    pub fn sorted(&self) -> Vec<(&str, &ConditionRecord)> {
        let mut v: Vec<(&str, &ConditionRecord)> = self.entries.iter().map(|(k, r)| (k.as_str(), r)).collect();
        v.sort_by(|a, b| a.0.cmp(b.0));
        v
    }
}

/// One rendered listing found by discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing<N> {
    /// The card element; hidden-state goes here.
    pub container: N,
    /// The canonical title link; the processed marker goes here.
    pub link: N,
    pub id: String,
    /// Best-effort; may be empty.
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideReason {
    Condition(Condition),
    Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Show,
    Hide(HideReason),
}

impl Visibility {
    pub fn is_hidden(self) -> bool {
        matches!(self, Visibility::Hide(_))
    }
}

/// Diagnostics from one apply pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub listings: usize,
    pub shown: usize,
    pub hidden: usize,
    pub annotated: usize,
    pub map_entries: usize,
    pub hidden_ids: Vec<String>,
    pub shown_ids: Vec<String>,
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} cards - {} shown, {} hidden ({} linked, {} map entries)",
            self.listings, self.shown, self.hidden, self.annotated, self.map_entries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_labels_never_erase() {
        let mut map = ConditionMap::default();
        map.merge("1", Label { condition: Condition::Used, location: None });
        map.merge("1", Label { condition: Condition::None, location: Some("Henderson") });
        assert_eq!(
            map.lookup("1"),
            ConditionRecord { condition: Condition::Used, location: Some(s!("Henderson")) }
        );
    }

    #[test]
    fn same_type_last_wins_and_empty_is_ignored() {
        let mut map = ConditionMap::default();
        map.merge("7", Label { condition: Condition::Used, location: None });
        map.merge("7", Label { condition: Condition::MissingParts, location: None });
        map.merge("8", Label::default());
        assert_eq!(map.lookup("7").condition, Condition::MissingParts);
        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup("8"), ConditionRecord::default());
    }

    #[test]
    fn summary_serializes_ids_as_strings() {
        let sum = PassSummary { listings: 2, shown: 1, hidden: 1, hidden_ids: vec![s!("9")], shown_ids: vec![s!("10")], ..Default::default() };
        let json = serde_json::to_value(&sum).unwrap();
        assert_eq!(json["hidden_ids"][0], "9");
        assert_eq!(json["shown"], 1);
        assert_eq!(serde_json::to_value(Condition::UnknownMissing).unwrap(), "unknownMissing");
    }
}
