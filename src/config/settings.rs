// src/config/settings.rs
use serde::{Deserialize, Serialize};

use crate::engine::types::Condition;

/// User filter settings, as persisted by the settings store.
///
/// Missing fields deserialize to the built-in defaults, so a partial stored
/// object (or `{}`) merges over them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub hide_used: bool,
    pub hide_minor_damage: bool,
    pub hide_unknown_missing: bool,
    pub hide_missing_parts: bool,
    pub show_amazon_links: bool,
    /// Empty = no location constraint.
    pub location_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_used: false,
            hide_minor_damage: false,
            hide_unknown_missing: false,
            hide_missing_parts: false,
            show_amazon_links: true,
            location_filter: s!(),
        }
    }
}

impl Settings {
    /// Whether the toggle for `condition` is on. `Condition::None` is never hidden.
    pub fn hides(&self, condition: Condition) -> bool {
        match condition {
            Condition::None => false,
            Condition::Used => self.hide_used,
            Condition::MinorDamage => self.hide_minor_damage,
            Condition::UnknownMissing => self.hide_unknown_missing,
            Condition::MissingParts => self.hide_missing_parts,
        }
    }

    pub fn location_filter(&self) -> Option<&str> {
        let loc = self.location_filter.trim();
        if loc.is_empty() { None } else { Some(loc) }
    }

    /// Turn every condition toggle on or off at once.
    pub fn with_all_conditions(mut self, on: bool) -> Self {
        self.hide_used = on;
        self.hide_minor_damage = on;
        self.hide_unknown_missing = on;
        self.hide_missing_parts = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_object_merges_over_defaults() {
        let s: Settings = serde_json::from_str(r#"{"hideUsed": true}"#).unwrap();
        assert!(s.hide_used);
        assert!(s.show_amazon_links);
        assert_eq!(s.location_filter(), None);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["showAmazonLinks"], true);
        assert_eq!(json["hideUnknownMissing"], false);
        assert_eq!(json["locationFilter"], "");
    }

    #[test]
    fn none_condition_never_hidden() {
        let s = Settings::default().with_all_conditions(true);
        assert!(!s.hides(Condition::None));
        assert!(s.hides(Condition::MissingParts));
    }
}
