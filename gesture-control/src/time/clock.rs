//! Monotonic clocks
//!
//! The stabilizer reports how long the current stable gesture has been held.
//! It reads time through the [`Clock`] trait so that the production path uses
//! `std::time::Instant` while tests can step time explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of monotonic time in seconds.
///
/// The origin is arbitrary; only differences between two readings matter.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the clock's origin.
    fn now_secs(&self) -> f64;
}

/// Clock backed by `Instant`, anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced clock.
///
/// Clones share the same underlying counter, so a test can keep one handle
/// and hand another to the component under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        let delta = (secs.max(0.0) * 1_000_000.0).round() as u64;
        self.micros.fetch_add(delta, Ordering::SeqCst);
    }

    /// Jump to an absolute reading. Going backwards is ignored.
    pub fn set(&self, secs: f64) {
        let target = (secs.max(0.0) * 1_000_000.0).round() as u64;
        self.micros.fetch_max(target, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.micros.load(Ordering::SeqCst) as f64 / 1_000_000.0
    }
}
