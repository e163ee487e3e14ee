//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (real or virtual frame clock)
//! - Input events (key down/up into per-tick snapshots)

pub mod input;
pub mod time;

pub use input::{ControlScheme, InputTracker, Key};
pub use time::{Clock, ManualClock, SystemClock};
