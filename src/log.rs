// src/log.rs
//
// Logging goes through `tracing`. The short macros are kept so call sites
// stay one-liners: logf! (info), logd! (debug), logw! (warn), loge! (error).

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[doc(hidden)]
pub use tracing;

/// Env var holding an `EnvFilter` directive, e.g. `NELLIS_LOG=nellis_helper=debug`.
pub const LOG_ENV: &str = "NELLIS_LOG";
pub const LOG_FILE: &str = "debug.log";

/// Install the global subscriber.
///
/// With `dir = Some(..)` lines are appended to `<dir>/debug.log`; otherwise
/// they go to stderr. A second call is a no-op.
pub fn init(dir: Option<&Path>, verbose: bool) {
    let fallback = if verbose { "nellis_helper=debug,warn" } else { "nellis_helper=info,warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let file = dir.and_then(|d| {
        fs::create_dir_all(d).ok()?;
        OpenOptions::new().create(true).append(true).open(d.join(LOG_FILE)).ok()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let _ = match file {
        Some(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::tracing::error!($($arg)*)
    };
}
