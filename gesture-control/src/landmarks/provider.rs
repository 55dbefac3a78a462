//! Landmark providers
//!
//! A provider turns one decoded frame into zero or more hand observations.
//! The real hand-landmark model lives outside this crate; anything that can
//! implement [`LandmarkProvider`] can be bound to a session.

use super::types::HandObservation;
use serde::Deserialize;
use tracing::debug;

/// Capability boundary to the hand-landmark model.
///
/// Each session owns exactly one provider instance. `close` is called once
/// when the session is torn down.
pub trait LandmarkProvider: Send {
    /// Extract hands from one frame. An empty vector means no hand.
    fn detect(&mut self, frame: &[u8]) -> crate::Result<Vec<HandObservation>>;

    /// Release model resources held by this instance
    fn close(&mut self);

    /// Short name for log lines
    fn name(&self) -> &str {
        "provider"
    }
}

/// `{"hands": [...]}`. Any other key means the frame is not landmark JSON.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedFrame {
    hands: Option<Vec<HandObservation>>,
}

/// JSON frame shape accepted by [`JsonLandmarkProvider`]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFrame {
    Wrapped(WrappedFrame),
    Bare(Vec<HandObservation>),
}

/// Provider for frames whose bytes are already landmark JSON.
///
/// This is the path used when landmarks are extracted client-side (for
/// example by an in-browser model) and only the keypoints are sent. Both
/// `{"hands": [...]}` and a bare array of hands are accepted; `null` or a
/// missing `hands` field means no hand in frame.
#[derive(Debug, Default)]
pub struct JsonLandmarkProvider {
    max_hands: Option<usize>,
    frames_seen: u64,
    closed: bool,
}

impl JsonLandmarkProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_hands` observations per frame
    pub fn with_max_hands(max_hands: usize) -> Self {
        Self {
            max_hands: Some(max_hands),
            ..Self::default()
        }
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl LandmarkProvider for JsonLandmarkProvider {
    fn detect(&mut self, frame: &[u8]) -> crate::Result<Vec<HandObservation>> {
        if self.closed {
            return Err(crate::Error::Provider("provider already closed".to_string()));
        }
        self.frames_seen += 1;

        let parsed: JsonFrame = serde_json::from_slice(frame)
            .map_err(|e| crate::Error::Decode(format!("frame is not landmark JSON: {}", e)))?;

        let mut hands = match parsed {
            JsonFrame::Wrapped(frame) => frame.hands.unwrap_or_default(),
            JsonFrame::Bare(hands) => hands,
        };
        if let Some(max) = self.max_hands {
            hands.truncate(max);
        }
        Ok(hands)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            debug!(frames = self.frames_seen, "JSON landmark provider closed");
        }
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(n: usize) -> String {
        let points: Vec<String> = (0..n)
            .map(|i| format!("{{\"x\":{},\"y\":0.5,\"z\":0.0}}", i as f64 / 100.0))
            .collect();
        format!(
            "{{\"landmarks\":[{}],\"handedness\":\"Left\",\"confidence\":0.8}}",
            points.join(",")
        )
    }

    #[test]
    fn test_wrapped_frame() {
        let mut provider = JsonLandmarkProvider::new();
        let frame = format!("{{\"hands\":[{}]}}", hand_json(21));
        let hands = provider.detect(frame.as_bytes()).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].landmarks.len(), 21);
        assert_eq!(provider.frames_seen(), 1);
    }

    #[test]
    fn test_bare_array_frame() {
        let mut provider = JsonLandmarkProvider::new();
        let frame = format!("[{},{}]", hand_json(21), hand_json(21));
        assert_eq!(provider.detect(frame.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_null_hands_means_no_hand() {
        let mut provider = JsonLandmarkProvider::new();
        assert!(provider.detect(b"{\"hands\":null}").unwrap().is_empty());
        assert!(provider.detect(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_foreign_object_is_rejected() {
        let mut provider = JsonLandmarkProvider::new();
        let err = provider.detect(b"{\"image\":\"/9j/4AAQ\"}").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));

        let err = provider.detect(b"{\"hands\":[],\"frame_id\":3}").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }

    #[test]
    fn test_max_hands_truncates() {
        let mut provider = JsonLandmarkProvider::with_max_hands(1);
        let frame = format!("[{},{}]", hand_json(21), hand_json(21));
        assert_eq!(provider.detect(frame.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let mut provider = JsonLandmarkProvider::new();
        let err = provider.detect(b"\xff\xd8\xff jpeg bytes").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }

    #[test]
    fn test_closed_provider_rejects_frames() {
        let mut provider = JsonLandmarkProvider::new();
        provider.close();
        provider.close();
        assert!(provider.is_closed());
        assert!(matches!(provider.detect(b"[]"), Err(crate::Error::Provider(_))));
    }
}
