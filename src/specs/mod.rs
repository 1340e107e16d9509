// src/specs/mod.rs
//! # Site-reading "specs"
//!
//! Everything that encodes *where the ground truth lives* on a Nellis results
//! page. The markup is not ours and changes without notice, so each piece is
//! a small heuristic with a clear fallback:
//!
//! - `labels`   – which short texts are condition / location labels.
//! - `ident`    – how a label finds the listing it belongs to (ancestor walk
//!                to the nearest product link, id from the link's path).
//! - `listings` – which elements are listing cards, their canonical link and
//!                a best-effort title.
//!
//! ## What does **not** live here
//! - Visibility decisions, markers, annotation links – see `engine`.
//! - Timing and re-application – see `supervisor`.
//!
//! ## Conventions
//! - Nothing here mutates the tree.
//! - Absence of a signal is never an error; functions return `None`/empty.
pub mod ident;
pub mod labels;
pub mod listings;
