//! User profiles
//!
//! A profile carries the per-user tuning a session binds at open time:
//! gesture thresholds, pointer sensitivities, the smoothing factor and the
//! gesture → action mapping.

pub mod store;

pub use store::{InMemoryProfileStore, ProfileStore};

use crate::classifier::{ActionMapping, ThresholdConfig};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the profile used when none is given
pub const DEFAULT_PROFILE_ID: &str = "default";

/// Per-gesture thresholds and sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub index_point_threshold: f64,
    pub fist_threshold: f64,
    pub thumbs_up_threshold: f64,
    pub open_hand_threshold: f64,
    pub pinch_threshold: f64,

    /// Cursor movement multiplier, 0.1 to 3.0
    pub cursor_sensitivity: f64,
    /// Scroll speed multiplier, 0.1 to 3.0
    pub scroll_sensitivity: f64,
    /// Position smoothing weight, 0 to 1
    pub smoothing_factor: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        let t = ThresholdConfig::default();
        Self {
            index_point_threshold: t.index_point,
            fist_threshold: t.fist,
            thumbs_up_threshold: t.thumbs_up,
            open_hand_threshold: t.open_hand,
            pinch_threshold: t.pinch,
            cursor_sensitivity: 1.0,
            scroll_sensitivity: 1.0,
            smoothing_factor: 0.5,
        }
    }
}

impl GestureSettings {
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            index_point: self.index_point_threshold,
            fist: self.fist_threshold,
            thumbs_up: self.thumbs_up_threshold,
            open_hand: self.open_hand_threshold,
            pinch: self.pinch_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds()
            .validate()
            .map_err(|e| Error::Profile(e.to_string()))?;
        check_range("cursor_sensitivity", self.cursor_sensitivity, 0.1, 3.0)?;
        check_range("scroll_sensitivity", self.scroll_sensitivity, 0.1, 3.0)?;
        check_range("smoothing_factor", self.smoothing_factor, 0.0, 1.0)?;
        Ok(())
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::Profile(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )))
    }
}

/// A named set of gesture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gesture_settings: GestureSettings,
    #[serde(default)]
    pub action_mapping: ActionMapping,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    /// Create an active profile with a fresh id and default settings
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            gesture_settings: GestureSettings::default(),
            action_mapping: ActionMapping::default(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_settings(mut self, settings: GestureSettings) -> Self {
        self.gesture_settings = settings;
        self
    }

    pub fn with_mapping(mut self, mapping: ActionMapping) -> Self {
        self.action_mapping = mapping;
        self
    }

    /// Bump `updated_at` after an edit
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Profile("profile name cannot be empty".into()));
        }
        self.gesture_settings.validate()
    }
}
