//! Temporal Stabilizer
//!
//! Turns the jittery per-frame classifier output into debounced events.
//!
//! Each call to [`Stabilizer::process`] pushes one raw result into a bounded
//! window and holds a majority vote over it. A label only becomes the stable
//! gesture once it has at least `min_consecutive` entries in the window;
//! until then the cycle reports an unstable `unknown` and the current gesture
//! is left alone. Positions attached to stable events are exponentially
//! smoothed across cycles.

pub mod smoothing;
pub mod window;

pub use smoothing::ExponentialSmoother;
pub use window::{Vote, VoteWindow};

use crate::classifier::{Action, Gesture, GestureDetails, GestureResult};
use crate::time::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Stabilizer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Number of recent results kept for voting
    pub buffer_size: usize,
    /// Minimum votes for a label to be considered stable
    pub min_consecutive: usize,
    /// Weight of the newest position sample, in [0, 1]
    pub smoothing_factor: f64,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 5,
            min_consecutive: 3,
            smoothing_factor: 0.5,
        }
    }
}

impl StabilizerConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.buffer_size == 0 {
            return Err(crate::Error::Config("buffer_size must be at least 1".into()));
        }
        if self.min_consecutive == 0 {
            return Err(crate::Error::Config(
                "min_consecutive must be at least 1".into(),
            ));
        }
        if self.min_consecutive > self.buffer_size {
            return Err(crate::Error::Config(format!(
                "min_consecutive ({}) cannot exceed buffer_size ({})",
                self.min_consecutive, self.buffer_size
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(crate::Error::Config(format!(
                "smoothing_factor must be in [0, 1], got {}",
                self.smoothing_factor
            )));
        }
        Ok(())
    }
}

/// One stabilized cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilizedEvent {
    pub gesture: Gesture,
    pub action: Action,
    pub confidence: f64,
    /// Whether the vote reached the stability minimum
    pub stable: bool,
    /// Whether this cycle switched the current stable gesture
    pub gesture_changed: bool,
    /// Seconds since the current stable gesture began
    pub duration_seconds: f64,
    /// On a transition, how long the gesture it replaced was held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hold_seconds: Option<f64>,
    #[serde(default)]
    pub details: GestureDetails,
}

impl StabilizedEvent {
    /// The event reported while no label has enough votes
    pub fn unstable() -> Self {
        Self {
            gesture: Gesture::Unknown,
            action: Action::None,
            confidence: 0.0,
            stable: false,
            gesture_changed: false,
            duration_seconds: 0.0,
            previous_hold_seconds: None,
            details: GestureDetails::new(),
        }
    }

    /// Whether this event should reach the action dispatcher
    pub fn is_actionable(&self) -> bool {
        self.stable && !self.action.is_none()
    }
}

/// Snapshot of stabilizer counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilizerStats {
    /// Results pushed since creation
    pub total_processed: u64,
    /// Lifetime count of transitions into each stable gesture
    pub gesture_counts: BTreeMap<Gesture, u64>,
    pub current_gesture: Option<Gesture>,
    pub buffer_len: usize,
    /// Results pushed out of the full window since creation
    pub evicted: u64,
}

/// Per-session debouncing state machine
pub struct Stabilizer {
    config: StabilizerConfig,
    window: VoteWindow,
    smoother: ExponentialSmoother,
    clock: Arc<dyn Clock>,
    current: Option<(Gesture, Action)>,
    started_at: f64,
    gesture_counts: BTreeMap<Gesture, u64>,
    total_processed: u64,
}

impl Stabilizer {
    /// Create a stabilizer reading time from the system clock
    pub fn new(config: StabilizerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: StabilizerConfig, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now_secs();
        Self {
            window: VoteWindow::new(config.buffer_size),
            smoother: ExponentialSmoother::new(config.smoothing_factor),
            config,
            clock,
            current: None,
            started_at,
            gesture_counts: BTreeMap::new(),
            total_processed: 0,
        }
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    /// Current stable gesture, if any
    pub fn current_gesture(&self) -> Option<Gesture> {
        self.current.map(|(g, _)| g)
    }

    pub fn current_action(&self) -> Option<Action> {
        self.current.map(|(_, a)| a)
    }

    /// Last smoothed position
    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.smoother.last()
    }

    /// Feed one raw classifier result
    pub fn process(&mut self, result: GestureResult) -> StabilizedEvent {
        self.total_processed += 1;
        self.window.push(result);

        let min = self.config.min_consecutive.max(1);
        let (gesture, count, confidence, action, mut details) = match self.window.majority() {
            Some(vote) if vote.count >= min && self.window.len() >= min => (
                vote.gesture,
                vote.count,
                vote.mean_confidence,
                vote.latest.action,
                vote.latest.details.clone(),
            ),
            _ => return StabilizedEvent::unstable(),
        };

        let now = self.clock.now_secs();
        let gesture_changed = self.current_gesture() != Some(gesture);
        let mut previous_hold_seconds = None;
        if gesture_changed {
            if self.current.is_some() {
                previous_hold_seconds = Some((now - self.started_at).max(0.0));
            }
            debug!(
                from = ?self.current_gesture(),
                to = %gesture,
                votes = count,
                "Stable gesture changed"
            );
            self.current = Some((gesture, action));
            self.started_at = now;
            *self.gesture_counts.entry(gesture).or_insert(0) += 1;
        }

        self.smoother.smooth_details(&mut details);

        StabilizedEvent {
            gesture,
            action,
            confidence,
            stable: true,
            gesture_changed,
            duration_seconds: (now - self.started_at).max(0.0),
            previous_hold_seconds,
            details,
        }
    }

    /// Cold-start the state machine. Lifetime counters survive.
    pub fn reset(&mut self) {
        self.window.clear();
        self.smoother.reset();
        self.current = None;
        self.started_at = self.clock.now_secs();
    }

    pub fn statistics(&self) -> StabilizerStats {
        StabilizerStats {
            total_processed: self.total_processed,
            gesture_counts: self.gesture_counts.clone(),
            current_gesture: self.current_gesture(),
            buffer_len: self.window.len(),
            evicted: self.window.evicted(),
        }
    }
}

impl std::fmt::Debug for Stabilizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stabilizer")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("buffer_len", &self.window.len())
            .field("total_processed", &self.total_processed)
            .finish()
    }
}
