// src/error.rs
use thiserror::Error;

pub const HINT_OPEN_SITE: &str = "Open a Nellis Auction page";
pub const HINT_REFRESH: &str = "Refresh the Nellis page first";

#[derive(Debug, Error)]
pub enum Error {
    /// Settings store unreachable or unreadable. Callers fall back to defaults.
    #[error("could not load settings: {0}")]
    Settings(String),

    #[error("active tab is not a listing page: {url}")]
    NotListingPage { url: String },

    #[error("message not delivered: {reason}")]
    Messaging { reason: String },

    #[error("invalid address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// User-facing remediation for the recoverable messaging failures.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::NotListingPage { .. } => Some(HINT_OPEN_SITE),
            Error::Messaging { .. } => Some(HINT_REFRESH),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
