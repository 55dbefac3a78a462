//! Per-frame responses

use crate::classifier::{Action, Gesture, GestureDetails};
use crate::dispatch::DispatchResult;
use crate::landmarks::Handedness;
use crate::stabilizer::StabilizedEvent;
use serde::{Deserialize, Serialize};

/// Label reported when no hand is in frame
pub const NO_HAND: &str = "none";

/// Stabilized result for a frame with at least one hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub gesture: Gesture,
    pub action: Action,
    pub confidence: f64,
    pub stable: bool,
    pub gesture_changed: bool,
    pub duration_seconds: f64,
    pub details: GestureDetails,
    pub hands_detected: usize,
    /// Handedness of the classified (primary) hand
    pub handedness: Handedness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchResult>,
}

impl DetectionReport {
    pub fn new(event: StabilizedEvent, hands_detected: usize, handedness: Handedness) -> Self {
        Self {
            gesture: event.gesture,
            action: event.action,
            confidence: event.confidence,
            stable: event.stable,
            gesture_changed: event.gesture_changed,
            duration_seconds: event.duration_seconds,
            details: event.details,
            hands_detected,
            handedness,
            dispatch: None,
        }
    }
}

/// Report for a frame with no hand in view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoHandReport {
    pub gesture: String,
    pub action: Action,
    pub confidence: f64,
    pub hands_detected: usize,
}

impl Default for NoHandReport {
    fn default() -> Self {
        Self {
            gesture: NO_HAND.to_string(),
            action: Action::None,
            confidence: 0.0,
            hands_detected: 0,
        }
    }
}

/// What a client receives for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameReport {
    Detected(DetectionReport),
    NoHand(NoHandReport),
    Error { error: String },
}

impl FrameReport {
    pub fn no_hand() -> Self {
        Self::NoHand(NoHandReport::default())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn detection(&self) -> Option<&DetectionReport> {
        match self {
            Self::Detected(report) => Some(report),
            _ => None,
        }
    }

    pub fn hands_detected(&self) -> usize {
        match self {
            Self::Detected(report) => report.hands_detected,
            _ => 0,
        }
    }
}
