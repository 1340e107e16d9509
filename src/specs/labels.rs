// src/specs/labels.rs
// Label text → condition / location. Whole-string matches only.

use crate::config::consts::KNOWN_LOCATIONS;
use crate::engine::types::{Condition, Label};

/// Condition category for a trimmed label, ASCII case-insensitive.
/// Anything but an exact phrase ("Used car", "Like new") is `Condition::None`.
pub fn classify_condition(text: &str) -> Condition {
    Condition::LABELED
        .into_iter()
        .find(|c| text.eq_ignore_ascii_case(c.phrase()))
        .unwrap_or_default()
}

/// Known pickup location named by the label, exact and case-sensitive.
pub fn classify_location(text: &str) -> Option<&'static str> {
    KNOWN_LOCATIONS.into_iter().find(|loc| *loc == text)
}

/// Classify raw label text; surrounding whitespace is ignored.
pub fn classify(text: &str) -> Label {
    let text = text.trim();
    Label { condition: classify_condition(text), location: classify_location(text) }
}

/// Looser check used by the debug report: also counts "New", which the site
/// shows on some layouts but which never drives filtering.
pub fn looks_like_condition(text: &str) -> bool {
    let text = text.trim();
    text.eq_ignore_ascii_case("new") || !classify_condition(text).is_none()
}
