//! Gesture labels, actions and classifier output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named geometric details attached to a result (cursor_x, pinch_y, ...)
pub type GestureDetails = BTreeMap<String, f64>;

pub const CURSOR_X: &str = "cursor_x";
pub const CURSOR_Y: &str = "cursor_y";
pub const PINCH_X: &str = "pinch_x";
pub const PINCH_Y: &str = "pinch_y";
pub const PINCH_DISTANCE: &str = "distance";

/// Recognized static hand poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Index finger extended, others folded
    IndexPoint,
    /// All four fingers folded
    Fist,
    /// Thumb raised, fingers folded
    ThumbsUp,
    /// Fingers extended and spread
    OpenHand,
    /// Thumb and index tips touching
    Pinch,
    /// Nothing met its threshold
    Unknown,
}

impl Gesture {
    /// Gestures the classifier can emit, in evaluation priority order
    pub const PRIORITY: [Gesture; 5] = [
        Gesture::IndexPoint,
        Gesture::Fist,
        Gesture::ThumbsUp,
        Gesture::OpenHand,
        Gesture::Pinch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndexPoint => "index_point",
            Self::Fist => "fist",
            Self::ThumbsUp => "thumbs_up",
            Self::OpenHand => "open_hand",
            Self::Pinch => "pinch",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control action bound to a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveCursor,
    LeftClick,
    RightClick,
    Scroll,
    DragDrop,
    #[default]
    None,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveCursor => "move_cursor",
            Self::LeftClick => "left_click",
            Self::RightClick => "right_click",
            Self::Scroll => "scroll",
            Self::DragDrop => "drag_drop",
            Self::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureResult {
    pub gesture: Gesture,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
    pub action: Action,
    #[serde(default)]
    pub details: GestureDetails,
}

impl GestureResult {
    /// The neutral result: no gesture, zero confidence, no action
    pub fn unknown() -> Self {
        Self {
            gesture: Gesture::Unknown,
            confidence: 0.0,
            action: Action::None,
            details: GestureDetails::new(),
        }
    }

    pub fn new(gesture: Gesture, confidence: f64, action: Action) -> Self {
        Self {
            gesture,
            confidence,
            action,
            details: GestureDetails::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: f64) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}
