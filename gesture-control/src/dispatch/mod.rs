//! Action dispatch
//!
//! Stable gestures become [`ActionCommand`]s handed to an
//! [`ActionDispatcher`]. Failures here never fail a frame: they are folded
//! into a [`DispatchResult`] with `success: false`.

pub mod backend;
pub mod command;
pub mod controller;

pub use backend::{InputBackend, InputCall, RecordingBackend};
pub use command::{ActionCommand, ScrollDirection};
pub use controller::{ControllerConfig, ScreenController};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sink for control commands
pub trait ActionDispatcher: Send {
    /// Execute one command, returning a human-readable summary
    fn dispatch(&mut self, command: &ActionCommand) -> crate::Result<String>;

    /// Let go of any held input. Called once when the owning session closes.
    fn release(&mut self) {}
}

/// Outcome of one dispatch attempt, as reported back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
}

impl DispatchResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Fold a dispatcher outcome, logging failures
    pub fn from_outcome(outcome: crate::Result<String>) -> Self {
        match outcome {
            Ok(message) => Self::ok(message),
            Err(e) => {
                warn!("Action dispatch failed: {}", e);
                Self::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_outcome_downgrades_errors() {
        let result = DispatchResult::from_outcome(Err(crate::Error::Dispatch("no display".into())));
        assert!(!result.success);
        assert!(result.message.contains("no display"));

        let result = DispatchResult::from_outcome(Ok("left click".into()));
        assert_eq!(result, DispatchResult::ok("left click"));
    }
}
