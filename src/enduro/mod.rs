//! Enduro: dodge traffic on a scrolling road for as long as you can.

pub mod logic;
pub mod types;

pub use logic::{step_frame, Controls};
pub use types::{Car, CarColor, ConfigError, EnduroConfig, EnduroGame, Rect, RunOutcome};
