//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (wall clock or fixed frame steps)
//! - Input events (keyboard and pointer translated into tick deltas)

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameClock, SystemClock};
pub use input::{Key, Modifiers, MouseButton, Pointer, apply_key};
