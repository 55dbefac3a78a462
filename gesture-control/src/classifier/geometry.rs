//! Hand geometry primitives
//!
//! Scale-invariant tests over a complete 21-point hand. Extension is judged
//! by comparing how far a fingertip is from the wrist against how far the
//! finger's base is, so the result does not depend on hand size or distance
//! from the camera.

use crate::landmarks::{
    Landmark, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP, PINKY_TIP,
    RING_MCP, RING_TIP, THUMB_CMC, THUMB_TIP, WRIST,
};

/// Tip must be this many times farther from the wrist than the base
pub const EXTENSION_RATIO: f64 = 1.10;

/// Complete hand keypoints
pub type Hand = [Landmark; LANDMARK_COUNT];

/// A finger identified by its tip and base landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// The four non-thumb fingers, index first
    pub const FOUR: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Tip landmark index
    pub fn tip(&self) -> usize {
        match self {
            Self::Thumb => THUMB_TIP,
            Self::Index => INDEX_TIP,
            Self::Middle => MIDDLE_TIP,
            Self::Ring => RING_TIP,
            Self::Pinky => PINKY_TIP,
        }
    }

    /// Base landmark index (CMC for the thumb, MCP otherwise)
    pub fn base(&self) -> usize {
        match self {
            Self::Thumb => THUMB_CMC,
            Self::Index => INDEX_MCP,
            Self::Middle => MIDDLE_MCP,
            Self::Ring => RING_MCP,
            Self::Pinky => PINKY_MCP,
        }
    }
}

/// Whether a finger is extended away from the wrist
pub fn is_extended(hand: &Hand, finger: Finger) -> bool {
    let wrist = &hand[WRIST];
    let tip_dist = hand[finger.tip()].distance(wrist);
    let base_dist = hand[finger.base()].distance(wrist);
    tip_dist > base_dist * EXTENSION_RATIO
}

/// Number of the four non-thumb fingers that are extended
pub fn extended_count(hand: &Hand) -> usize {
    Finger::FOUR.iter().filter(|f| is_extended(hand, **f)).count()
}

/// Number of the four non-thumb fingers that are folded
pub fn folded_count(hand: &Hand) -> usize {
    Finger::FOUR.len() - extended_count(hand)
}

/// Distance between two fingertips
pub fn tip_distance(hand: &Hand, a: Finger, b: Finger) -> f64 {
    hand[a.tip()].distance(&hand[b.tip()])
}

/// Whether every pair of adjacent fingertips (index-middle, middle-ring,
/// ring-pinky) is farther apart than `min_gap`
pub fn fingers_spread(hand: &Hand, min_gap: f64) -> bool {
    Finger::FOUR
        .windows(2)
        .all(|pair| tip_distance(hand, pair[0], pair[1]) > min_gap)
}
