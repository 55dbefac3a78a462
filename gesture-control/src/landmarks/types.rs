//! Core types for hand landmarks
//!
//! A tracked hand is described by 21 keypoints in the MediaPipe hand
//! topology. x and y are normalized to the image frame, z is relative depth.

use serde::{Deserialize, Serialize};

/// Number of keypoints in a complete hand observation
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// A single normalized 3D keypoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge of the frame
    pub x: f64,
    /// Vertical position, 0 = top edge of the frame
    pub y: f64,
    /// Depth relative to the wrist
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in all three dimensions
    #[inline]
    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Point halfway between two landmarks
    #[inline]
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        Landmark {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
}

/// Which hand the landmark model believes it is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// One detected hand as reported by a landmark provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    /// Keypoints in MediaPipe order. Anything other than 21 entries is
    /// rejected by the classifier.
    pub landmarks: Vec<Landmark>,
    /// Left or right hand
    #[serde(default)]
    pub handedness: Handedness,
    /// Detection confidence in [0, 1]
    #[serde(default = "default_detection_confidence")]
    pub confidence: f64,
}

fn default_detection_confidence() -> f64 {
    1.0
}

impl HandObservation {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness, confidence: f64) -> Self {
        Self {
            landmarks,
            handedness,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Whether the observation carries exactly one point per keypoint
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT
    }

    /// Borrow the keypoints as a fixed-size array, if complete
    pub fn as_array(&self) -> Option<&[Landmark; LANDMARK_COUNT]> {
        self.landmarks.as_slice().try_into().ok()
    }

    pub fn wrist(&self) -> Option<&Landmark> {
        self.landmarks.get(WRIST)
    }
}
