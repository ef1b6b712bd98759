//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timestamps and the tick driver
//! - Input events
//! - Storage (LocalStorage on web)

pub mod clock;
pub mod input;
pub mod storage;

pub use clock::{FixedClock, FrameClock, run_headless};
pub use input::{InputAction, JumpSource, action_for_key};
pub use storage::default_store;
