#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Per-session conversation history.
//!
//! Each browser session owns one bounded log of turns. The log lives inside
//! the session record, so this crate holds no state of its own; every
//! operation is parameterized by the session it targets.

mod history;
mod manager;

pub use history::{DEFAULT_MAX_TURNS, HistoryConfig, HistoryLog};
pub use manager::{HistoryError, HistoryStore, Result};
