// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod dom;
pub mod engine;
pub mod error;
pub mod host;
pub mod messages;
pub mod specs;
pub mod store;
pub mod supervisor;

pub use config::Settings;
pub use engine::apply_pass;
pub use error::{Error, Result};
