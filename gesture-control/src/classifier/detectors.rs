//! Gesture detectors
//!
//! Each detector scores one pose independently and returns a confidence in
//! [0, 1], where 0 means "not this gesture". Confidences come in fixed tiers
//! rather than a continuous score; the classifier compares them against the
//! session's thresholds.

use super::geometry::{extended_count, fingers_spread, folded_count, is_extended, Finger, Hand};
use crate::landmarks::{INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_MCP, THUMB_TIP};

/// Adjacent fingertips closer than this are considered touching
pub const FINGER_SEPARATION: f64 = 0.03;

/// Thumb-index distance for a firm pinch
pub const PINCH_CLOSE: f64 = 0.05;

/// Thumb-index distance for a loose pinch
pub const PINCH_NEAR: f64 = 0.08;

/// Index finger extended and raised above the other fingertips.
pub fn index_point(hand: &Hand) -> f64 {
    let index_extended = is_extended(hand, Finger::Index);
    let middle_folded = !is_extended(hand, Finger::Middle);
    let ring_folded = !is_extended(hand, Finger::Ring);
    let pinky_folded = !is_extended(hand, Finger::Pinky);

    // Smaller y is higher in image coordinates
    let index_y = hand[INDEX_TIP].y;
    let index_highest = index_y < hand[MIDDLE_TIP].y
        && index_y < hand[RING_TIP].y
        && index_y < hand[PINKY_TIP].y;

    if !(index_extended && index_highest) {
        return 0.0;
    }
    if middle_folded && ring_folded && pinky_folded {
        0.95
    } else if middle_folded && ring_folded {
        0.85
    } else {
        0.75
    }
}

/// All four fingers curled into the palm.
pub fn fist(hand: &Hand) -> f64 {
    match folded_count(hand) {
        4 => 0.95,
        3 => 0.75,
        _ => 0.0,
    }
}

/// Thumb tip above the thumb MCP with at least three fingers folded.
pub fn thumbs_up(hand: &Hand) -> f64 {
    let thumb_up = hand[THUMB_TIP].y < hand[THUMB_MCP].y;
    if thumb_up && folded_count(hand) >= 3 {
        0.90
    } else {
        0.0
    }
}

/// Fingers extended and spread apart.
///
/// The top tier additionally requires the thumb to be extended.
pub fn open_hand(hand: &Hand) -> f64 {
    let extended = extended_count(hand);
    let thumb_extended = is_extended(hand, Finger::Thumb);
    let spread = fingers_spread(hand, FINGER_SEPARATION);

    if extended >= 4 && thumb_extended && spread {
        0.95
    } else if extended >= 3 && spread {
        0.80
    } else {
        0.0
    }
}

/// Thumb and index tips brought together.
///
/// The remaining three fingers being extended separates a pinch from a fist,
/// where the tips can also end up close.
pub fn pinch(hand: &Hand) -> f64 {
    let distance = pinch_distance(hand);
    let others_extended = [Finger::Middle, Finger::Ring, Finger::Pinky]
        .iter()
        .all(|f| is_extended(hand, *f));

    if distance < PINCH_CLOSE && others_extended {
        0.95
    } else if distance < PINCH_NEAR && others_extended {
        0.85
    } else if distance < PINCH_CLOSE {
        0.75
    } else {
        0.0
    }
}

/// Distance between thumb tip and index tip
pub fn pinch_distance(hand: &Hand) -> f64 {
    hand[THUMB_TIP].distance(&hand[INDEX_TIP])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{
        Landmark, INDEX_MCP, LANDMARK_COUNT, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_CMC, WRIST,
    };

    /// Palm with every finger folded and the thumb tucked
    fn folded_hand() -> Hand {
        let mut hand = [Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];
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

    #[test]
    fn test_fist_tiers() {
        let mut hand = folded_hand();
        assert_eq!(fist(&hand), 0.95);
        hand[PINKY_TIP] = Landmark::new(0.65, 0.50, 0.0);
        assert_eq!(fist(&hand), 0.75);
        hand[RING_TIP] = Landmark::new(0.56, 0.44, 0.0);
        assert_eq!(fist(&hand), 0.0);
    }

    #[test]
    fn test_index_point_tiers() {
        let mut hand = folded_hand();
        assert_eq!(index_point(&hand), 0.0);

        hand[INDEX_TIP] = Landmark::new(0.38, 0.45, 0.0);
        assert_eq!(index_point(&hand), 0.95);

        // Pinky extended but lower than the index tip
        hand[PINKY_TIP] = Landmark::new(0.66, 0.52, 0.0);
        assert_eq!(index_point(&hand), 0.85);

        // Middle extended too, still lower
        hand[MIDDLE_TIP] = Landmark::new(0.47, 0.47, 0.0);
        assert_eq!(index_point(&hand), 0.75);

        // Middle now higher than index: no longer pointing
        hand[MIDDLE_TIP] = Landmark::new(0.47, 0.40, 0.0);
        assert_eq!(index_point(&hand), 0.0);
    }

    #[test]
    fn test_thumbs_up() {
        let mut hand = folded_hand();
        assert_eq!(thumbs_up(&hand), 0.0);
        hand[THUMB_TIP] = Landmark::new(0.36, 0.60, 0.0);
        assert_eq!(thumbs_up(&hand), 0.90);
        hand[INDEX_TIP] = Landmark::new(0.38, 0.45, 0.0);
        hand[MIDDLE_TIP] = Landmark::new(0.47, 0.42, 0.0);
        assert_eq!(thumbs_up(&hand), 0.0);
    }

    #[test]
    fn test_open_hand_tiers() {
        let mut hand = folded_hand();
        hand[INDEX_TIP] = Landmark::new(0.38, 0.45, 0.0);
        hand[MIDDLE_TIP] = Landmark::new(0.47, 0.42, 0.0);
        hand[RING_TIP] = Landmark::new(0.56, 0.44, 0.0);
        hand[PINKY_TIP] = Landmark::new(0.65, 0.50, 0.0);
        // Thumb still tucked: second tier
        assert_eq!(open_hand(&hand), 0.80);

        hand[THUMB_TIP] = Landmark::new(0.28, 0.70, 0.0);
        assert_eq!(open_hand(&hand), 0.95);

        // Ring tip against the middle tip: not spread
        hand[RING_TIP] = Landmark::new(0.48, 0.43, 0.0);
        assert_eq!(open_hand(&hand), 0.0);
    }

    #[test]
    fn test_pinch_tiers() {
        let mut hand = folded_hand();
        hand[INDEX_TIP] = Landmark::new(0.40, 0.60, 0.0);
        hand[THUMB_TIP] = Landmark::new(0.42, 0.62, 0.0);
        // Others folded: only the bare distance tier
        assert_eq!(pinch(&hand), 0.75);

        hand[MIDDLE_TIP] = Landmark::new(0.50, 0.42, 0.0);
        hand[RING_TIP] = Landmark::new(0.52, 0.43, 0.0);
        hand[PINKY_TIP] = Landmark::new(0.54, 0.45, 0.0);
        assert_eq!(pinch(&hand), 0.95);

        hand[THUMB_TIP] = Landmark::new(0.46, 0.62, 0.0);
        assert_eq!(pinch(&hand), 0.85);

        hand[THUMB_TIP] = Landmark::new(0.50, 0.62, 0.0);
        assert_eq!(pinch(&hand), 0.0);
    }

    #[test]
    fn test_pinch_distance() {
        let mut hand = folded_hand();
        hand[INDEX_TIP] = Landmark::new(0.40, 0.60, 0.0);
        hand[THUMB_TIP] = Landmark::new(0.43, 0.64, 0.0);
        assert!((pinch_distance(&hand) - 0.05).abs() < 1e-9);
    }
}
