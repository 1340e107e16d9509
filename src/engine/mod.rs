// src/engine/mod.rs
//! The apply pass and the pieces it is made of. Everything here reads the page
//! through `dom::PageTree` and takes `Settings` as an explicit snapshot.

pub mod annotate;
pub mod condition_map;
pub mod engine;
pub mod filter;
pub mod markers;
pub mod report;
pub mod types;

pub use engine::apply_pass;
pub use report::debug_report;
pub use types::{Condition, ConditionMap, ConditionRecord, Listing, PassSummary, Visibility};
