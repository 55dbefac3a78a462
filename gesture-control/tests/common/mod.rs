//! Shared hand poses for integration tests
//!
//! All poses start from the same folded palm and only move fingertips, so
//! each one lands on exactly one gesture under the default thresholds.

#![allow(dead_code)]

use gesture_control::landmarks::{
    HandObservation, Handedness, Landmark, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP, THUMB_CMC, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Every finger folded, thumb tucked
pub fn fist() -> Vec<Landmark> {
    let mut hand = vec![Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
    hand[WRIST] = Landmark::new(0.5, 0.9, 0.0);
    hand[THUMB_CMC] = Landmark::new(0.44, 0.85, 0.0);
    hand[THUMB_MCP] = Landmark::new(0.38, 0.80, 0.0);
    hand[THUMB_TIP] = Landmark::new(0.48, 0.84, 0.0);
    hand[INDEX_MCP] = Landmark::new(0.42, 0.70, 0.0);
    hand[MIDDLE_MCP] = Landmark::new(0.48, 0.68, 0.0);
    hand[RING_MCP] = Landmark::new(0.54, 0.69, 0.0);
    hand[PINKY_MCP] = Landmark::new(0.60, 0.72, 0.0);
    hand[INDEX_TIP] = Landmark::new(0.44, 0.78, 0.0);
    hand[MIDDLE_TIP] = Landmark::new(0.49, 0.77, 0.0);
    hand[RING_TIP] = Landmark::new(0.53, 0.78, 0.0);
    hand[PINKY_TIP] = Landmark::new(0.57, 0.80, 0.0);
    hand
}

/// Index finger raised with its tip at `(x, y)`
pub fn pointing_at(x: f64, y: f64) -> Vec<Landmark> {
    let mut hand = fist();
    hand[INDEX_TIP] = Landmark::new(x, y, 0.0);
    hand
}

pub fn pointing() -> Vec<Landmark> {
    pointing_at(0.38, 0.45)
}

/// All fingers and thumb extended and spread
pub fn open_hand() -> Vec<Landmark> {
    let mut hand = fist();
    hand[THUMB_TIP] = Landmark::new(0.28, 0.70, 0.0);
    hand[INDEX_TIP] = Landmark::new(0.38, 0.45, 0.0);
    hand[MIDDLE_TIP] = Landmark::new(0.47, 0.42, 0.0);
    hand[RING_TIP] = Landmark::new(0.56, 0.44, 0.0);
    hand[PINKY_TIP] = Landmark::new(0.65, 0.50, 0.0);
    hand
}

/// Thumb and index tips touching, other fingers up
pub fn pinch() -> Vec<Landmark> {
    let mut hand = fist();
    hand[INDEX_TIP] = Landmark::new(0.40, 0.60, 0.0);
    hand[THUMB_TIP] = Landmark::new(0.42, 0.62, 0.0);
    hand[MIDDLE_TIP] = Landmark::new(0.50, 0.42, 0.0);
    hand[RING_TIP] = Landmark::new(0.52, 0.43, 0.0);
    hand[PINKY_TIP] = Landmark::new(0.54, 0.45, 0.0);
    hand
}

/// Thumb raised over three folded fingers
pub fn thumbs_up() -> Vec<Landmark> {
    let mut hand = fist();
    hand[THUMB_TIP] = Landmark::new(0.36, 0.60, 0.0);
    hand[PINKY_TIP] = Landmark::new(0.65, 0.50, 0.0);
    hand
}

/// Move a whole pose vertically
pub fn shifted(mut hand: Vec<Landmark>, dy: f64) -> Vec<Landmark> {
    for lm in hand.iter_mut() {
        lm.y += dy;
    }
    hand
}

pub fn observe(landmarks: Vec<Landmark>) -> HandObservation {
    HandObservation::new(landmarks, Handedness::Right, 0.95)
}

pub fn observe_left(landmarks: Vec<Landmark>) -> HandObservation {
    HandObservation::new(landmarks, Handedness::Left, 0.95)
}
