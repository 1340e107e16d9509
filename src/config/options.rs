// src/config/options.rs
use std::time::Duration;

use super::consts::*;

/// Delays and retry budget used by the change supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Quiet period after the last mutation before probing for new listings.
    pub debounce: Duration,
    /// Wait after a client-side navigation before the re-apply.
    pub nav_settle: Duration,
    /// Wait between a loading pass and the "did anything render?" check.
    pub retry_check: Duration,
    pub retry_attempts: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            nav_settle: Duration::from_millis(NAV_SETTLE_MS),
            retry_check: Duration::from_millis(RETRY_CHECK_MS),
            retry_attempts: RETRY_ATTEMPTS,
        }
    }
}
