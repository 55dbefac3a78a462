//! Exponential position smoothing

use crate::classifier::{GestureDetails, CURSOR_X, CURSOR_Y, PINCH_X, PINCH_Y};

/// Detail keys that carry a smoothable position, checked in order
const POSITION_KEYS: [(&str, &str); 2] = [(CURSOR_X, CURSOR_Y), (PINCH_X, PINCH_Y)];

/// Exponential moving average over a 2D position.
///
/// `alpha` weights the newest sample: 1.0 follows the input exactly, 0.0
/// freezes at the first sample.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl ExponentialSmoother {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            last: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Last emitted position
    pub fn last(&self) -> Option<(f64, f64)> {
        self.last
    }

    /// Blend a sample with the previous output and remember the result
    pub fn smooth(&mut self, x: f64, y: f64) -> (f64, f64) {
        let out = match self.last {
            Some((px, py)) => (
                self.alpha * x + (1.0 - self.alpha) * px,
                self.alpha * y + (1.0 - self.alpha) * py,
            ),
            None => (x, y),
        };
        self.last = Some(out);
        out
    }

    /// Smooth the first recognized position pair in `details` in place.
    ///
    /// Returns false when the details carry no complete pair.
    pub fn smooth_details(&mut self, details: &mut GestureDetails) -> bool {
        for (kx, ky) in POSITION_KEYS {
            let (Some(&x), Some(&y)) = (details.get(kx), details.get(ky)) else {
                continue;
            };
            let (sx, sy) = self.smooth(x, y);
            details.insert(kx.to_string(), sx);
            details.insert(ky.to_string(), sy);
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
