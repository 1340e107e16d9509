// src/supervisor/mod.rs
//! # Change supervisor
//!
//! Decides *when* an apply pass runs. The page loads in stages, rewrites
//! itself as results stream in, and navigates client-side without reloads;
//! the supervisor turns those signals into passes:
//!
//! ```text
//! Uninitialized ──(redirect needed)──▶ Redirecting
//!       │
//!       ▼
//!   Loading(n) ──(listing marked)──▶ Settled
//!       │ none yet, n > 0
//!       └──▶ Loading(n-1) ... Loading(0) ──▶ Settled
//! ```
//!
//! Once loading starts it also *watches*: mutations are debounced into a
//! probe for new listings, and navigations clear the processed markers and
//! schedule one settle pass.
//!
//! Time and events come in through ports ([`Scheduler`], [`EventSource`]) so
//! tests and the `replay` subcommand run on virtual time.

pub mod events;
pub mod redirect;
pub mod replay;
pub mod scheduler;
pub mod supervisor;

pub use events::{Batch, Event, EventSource};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerId};
pub use supervisor::{Phase, Supervisor};
