//! Gesture log records

use crate::classifier::{Action, Gesture};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recognized gesture transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureLog {
    pub id: Uuid,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub gesture: Gesture,
    pub confidence: f64,
    pub action: Action,
    pub timestamp: DateTime<Utc>,
    /// How long the previous stable gesture was held, if known
    #[serde(default)]
    pub duration_ms: Option<f64>,
}

impl GestureLog {
    pub fn new(gesture: Gesture, confidence: f64, action: Action) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: None,
            profile_id: None,
            gesture,
            confidence,
            action,
            timestamp: Utc::now(),
            duration_ms: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_profile(mut self, profile_id: Option<String>) -> Self {
        self.profile_id = profile_id;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}
