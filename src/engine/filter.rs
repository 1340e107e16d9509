// src/engine/filter.rs
// Visibility decision. Pure: no tree, no clock, only the inputs.

use crate::config::Settings;

use super::types::{Condition, HideReason, Visibility};

/// Decide whether a listing with this condition / location is shown.
///
/// Condition toggles are checked first; the location filter only applies when
/// one is configured *and* the listing's location is known.
pub fn decide(condition: Condition, location: Option<&str>, settings: &Settings) -> Visibility {
    if settings.hides(condition) {
        return Visibility::Hide(HideReason::Condition(condition));
    }
    match (settings.location_filter(), location.map(str::trim).filter(|l| !l.is_empty())) {
        (Some(wanted), Some(actual)) if actual != wanted => Visibility::Hide(HideReason::Location),
        _ => Visibility::Show,
    }
}
