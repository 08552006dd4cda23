//! Real-time plumbing: frame pacing and the interactive session.

pub mod frame_clock;
pub mod session;

pub use frame_clock::FrameClock;
