//! Landmark Classifier
//!
//! Stateless rule engine that maps one 21-point hand pose to a gesture.
//!
//! Detectors are evaluated in a fixed priority order:
//!
//! ```text
//! index_point → fist → thumbs_up → open_hand → pinch
//! ```
//!
//! The first detector whose confidence meets its threshold wins and the rest
//! are not evaluated. A hand with every keypoint collapsed onto one point
//! therefore reads as a fist: no finger is extended, so four are folded.

pub mod config;
pub mod detectors;
pub mod geometry;
pub mod types;

pub use config::{ActionMapping, ThresholdConfig};
pub use types::{
    Action, Gesture, GestureDetails, GestureResult, CURSOR_X, CURSOR_Y, PINCH_DISTANCE, PINCH_X,
    PINCH_Y,
};

use crate::landmarks::{HandObservation, Landmark, INDEX_TIP, THUMB_TIP};
use geometry::Hand;

/// Gesture classifier bound to one set of thresholds and action mapping
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: ThresholdConfig,
    mapping: ActionMapping,
}

impl GestureClassifier {
    /// Create a classifier with the default thresholds and mapping
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: ThresholdConfig) -> Self {
        Self {
            thresholds,
            mapping: ActionMapping::default(),
        }
    }

    pub fn with_config(thresholds: ThresholdConfig, mapping: ActionMapping) -> Self {
        Self {
            thresholds,
            mapping,
        }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn mapping(&self) -> &ActionMapping {
        &self.mapping
    }

    /// Classify one hand observation
    pub fn classify(&self, observation: &HandObservation) -> GestureResult {
        self.classify_landmarks(&observation.landmarks)
    }

    /// Classify a raw keypoint slice.
    ///
    /// Anything other than exactly 21 keypoints yields the neutral
    /// `unknown` result.
    pub fn classify_landmarks(&self, landmarks: &[Landmark]) -> GestureResult {
        let hand: &Hand = match landmarks.try_into() {
            Ok(hand) => hand,
            Err(_) => return GestureResult::unknown(),
        };

        for gesture in Gesture::PRIORITY {
            let confidence = score(gesture, hand);
            if confidence >= self.thresholds.threshold_for(gesture) {
                return GestureResult {
                    gesture,
                    confidence,
                    action: self.mapping.action_for(gesture),
                    details: gesture_details(gesture, hand),
                };
            }
        }

        GestureResult::unknown()
    }

    /// Confidence of every detector, in priority order, ignoring thresholds
    pub fn scores(&self, landmarks: &[Landmark]) -> Option<[(Gesture, f64); 5]> {
        let hand: &Hand = landmarks.try_into().ok()?;
        Some(Gesture::PRIORITY.map(|g| (g, score(g, hand))))
    }
}

fn score(gesture: Gesture, hand: &Hand) -> f64 {
    match gesture {
        Gesture::IndexPoint => detectors::index_point(hand),
        Gesture::Fist => detectors::fist(hand),
        Gesture::ThumbsUp => detectors::thumbs_up(hand),
        Gesture::OpenHand => detectors::open_hand(hand),
        Gesture::Pinch => detectors::pinch(hand),
        Gesture::Unknown => 0.0,
    }
}

/// Positional details for the gestures that drive a pointer
fn gesture_details(gesture: Gesture, hand: &Hand) -> GestureDetails {
    let mut details = GestureDetails::new();
    match gesture {
        Gesture::IndexPoint | Gesture::OpenHand => {
            let tip = &hand[INDEX_TIP];
            details.insert(CURSOR_X.to_string(), tip.x);
            details.insert(CURSOR_Y.to_string(), tip.y);
        }
        Gesture::Pinch => {
            let thumb = &hand[THUMB_TIP];
            let index = &hand[INDEX_TIP];
            let center = thumb.midpoint(index);
            details.insert(PINCH_X.to_string(), center.x);
            details.insert(PINCH_Y.to_string(), center.y);
            details.insert(PINCH_DISTANCE.to_string(), thumb.distance(index));
        }
        _ => {}
    }
    details
}
