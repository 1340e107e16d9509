// src/supervisor/redirect.rs
// Saved-location redirect and the `Location Name` query helper.

use url::Url;

use crate::config::consts::LOCATION_PARAM;
use crate::config::Settings;
use crate::error::Result;

/// Address to reload at when the saved location filter differs from the
/// page's location parameter. `None` when no filter is saved, the address
/// already matches, or the address is unparsable.
pub fn location_redirect(settings: &Settings, current: &str) -> Option<String> {
    let want = settings.location_filter()?;
    let url = match Url::parse(current) {
        Ok(u) => u,
        Err(e) => {
            logd!("redirect check skipped, bad address {current:?}: {e}");
            return None;
        }
    };
    if location_of(&url).as_deref() == Some(want) {
        return None;
    }
    logd!("Redirecting to saved location \"{want}\"");
    with_location(current, Some(want)).ok()
}

fn location_of(url: &Url) -> Option<String> {
    url.query_pairs().find(|(k, _)| k == LOCATION_PARAM).map(|(_, v)| v.into_owned())
}

/// Set (`Some`) or drop (`None`) the location parameter, keeping every other
/// parameter and its position. Duplicates of the parameter collapse into one.
pub fn with_location(address: &str, location: Option<&str>) -> Result<String> {
    let mut url = Url::parse(address)?;

    let mut placed = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (k, v) in url.query_pairs() {
        if k != LOCATION_PARAM {
            pairs.push((k.into_owned(), v.into_owned()));
            continue;
        }
        if let (Some(loc), false) = (location, placed) {
            pairs.push((s!(LOCATION_PARAM), s!(loc)));
            placed = true;
        }
    }
    if let (Some(loc), false) = (location, placed) {
        pairs.push((s!(LOCATION_PARAM), s!(loc)));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }
    Ok(url.into())
}
