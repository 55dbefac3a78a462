//! Timing module
//!
//! Gesture durations are measured against a monotonic clock that can be
//! swapped for a manually advanced one in tests.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
