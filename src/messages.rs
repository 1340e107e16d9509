// src/messages.rs
// Messages between the popup, the settings store and the listing page.

use serde::{Deserialize, Serialize};

use crate::config::consts::SITE_HOST;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Wire shape: `{"type": "APPLY_FILTERS", "settings": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Answered by the settings store, never by the page.
    GetSettings,
    /// Replace the page's settings and re-apply now.
    ApplyFilters { settings: Settings },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// A route to the listing page's side. Fails when nothing listens there.
pub trait MessageChannel {
    fn send(&mut self, msg: Message) -> Result<Ack>;
}

pub fn is_site_page(url: &str) -> bool {
    url.contains(SITE_HOST)
}

/// Popup side of "apply": check the active tab is on the site, then push
/// `settings` to it. Both failures are recoverable and carry a hint.
pub fn deliver_apply<C: MessageChannel + ?Sized>(tab_url: Option<&str>, channel: &mut C, settings: &Settings) -> Result<Ack> {
    let url = tab_url.unwrap_or_default();
    if !is_site_page(url) {
        return Err(Error::NotListingPage { url: s!(url) });
    }
    channel
        .send(Message::ApplyFilters { settings: settings.clone() })
        .map_err(|e| match e {
            Error::Messaging { .. } => e,
            other => Error::Messaging { reason: other.to_string() },
        })
}
