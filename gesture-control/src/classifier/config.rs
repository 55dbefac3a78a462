//! Classifier configuration
//!
//! Per-gesture confidence thresholds and the gesture → action table. Both are
//! bound to a session when it opens and stay fixed for its lifetime.

use super::types::{Action, Gesture};
use serde::{Deserialize, Serialize};

/// Minimum detector confidence for each gesture to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub index_point: f64,
    pub fist: f64,
    pub thumbs_up: f64,
    pub open_hand: f64,
    pub pinch: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            index_point: 0.85,
            fist: 0.80,
            thumbs_up: 0.75,
            open_hand: 0.70,
            pinch: 0.65,
        }
    }
}

impl ThresholdConfig {
    /// Threshold for a gesture. `Unknown` never passes.
    pub fn threshold_for(&self, gesture: Gesture) -> f64 {
        match gesture {
            Gesture::IndexPoint => self.index_point,
            Gesture::Fist => self.fist,
            Gesture::ThumbsUp => self.thumbs_up,
            Gesture::OpenHand => self.open_hand,
            Gesture::Pinch => self.pinch,
            Gesture::Unknown => f64::INFINITY,
        }
    }

    /// Check every threshold lies in [0, 1]
    pub fn validate(&self) -> crate::Result<()> {
        for gesture in Gesture::PRIORITY {
            let value = self.threshold_for(gesture);
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::Error::Config(format!(
                    "{} threshold must be in [0, 1], got {}",
                    gesture, value
                )));
            }
        }
        Ok(())
    }
}

/// Which control action each gesture triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionMapping {
    pub index_point: Action,
    pub fist: Action,
    pub thumbs_up: Action,
    pub open_hand: Action,
    pub pinch: Action,
}

impl Default for ActionMapping {
    fn default() -> Self {
        Self {
            index_point: Action::MoveCursor,
            fist: Action::LeftClick,
            thumbs_up: Action::RightClick,
            open_hand: Action::Scroll,
            pinch: Action::DragDrop,
        }
    }
}

impl ActionMapping {
    pub fn action_for(&self, gesture: Gesture) -> Action {
        match gesture {
            Gesture::IndexPoint => self.index_point,
            Gesture::Fist => self.fist,
            Gesture::ThumbsUp => self.thumbs_up,
            Gesture::OpenHand => self.open_hand,
            Gesture::Pinch => self.pinch,
            Gesture::Unknown => Action::None,
        }
    }
}
