//! Enduro - a terminal driving game, plus a small USD→BRL rate lookup.
//!
//! This module exposes the game logic and the rate fetcher for testing and
//! external use.

pub mod build_info;
pub mod core;
pub mod enduro;
pub mod exchange;
pub mod input;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;

pub use crate::core::session::{run_session, SessionError, SessionSummary};
pub use crate::enduro::{EnduroConfig, EnduroGame, RunOutcome};
pub use crate::exchange::{fetch_rate, FetchError};
