//! Session identity and per-session settings

use crate::classifier::{ActionMapping, ThresholdConfig};
use crate::profile::UserProfile;
use crate::stabilizer::StabilizerConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque handle to one open session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| crate::Error::InvalidInput(format!("invalid session id '{}': {}", s, e)))
    }
}

/// Everything a session binds at open time and keeps for its lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Profile the settings came from, recorded on telemetry
    pub profile_id: Option<String>,
    pub thresholds: ThresholdConfig,
    pub mapping: ActionMapping,
    pub stabilizer: StabilizerConfig,
    pub cursor_sensitivity: f64,
    pub scroll_sensitivity: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            profile_id: None,
            thresholds: ThresholdConfig::default(),
            mapping: ActionMapping::default(),
            stabilizer: StabilizerConfig::default(),
            cursor_sensitivity: 1.0,
            scroll_sensitivity: 1.0,
        }
    }
}

impl SessionOptions {
    /// Options from a profile, layered over `base` for the stabilizer
    /// window sizes that profiles do not carry
    pub fn from_profile(profile: &UserProfile, base: &SessionOptions) -> Self {
        let settings = &profile.gesture_settings;
        Self {
            profile_id: Some(profile.id.clone()),
            thresholds: settings.thresholds(),
            mapping: profile.action_mapping,
            stabilizer: StabilizerConfig {
                smoothing_factor: settings.smoothing_factor,
                ..base.stabilizer
            },
            cursor_sensitivity: settings.cursor_sensitivity,
            scroll_sensitivity: settings.scroll_sensitivity,
        }
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_stabilizer(mut self, stabilizer: StabilizerConfig) -> Self {
        self.stabilizer = stabilizer;
        self
    }

    pub fn with_profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.thresholds.validate()?;
        self.stabilizer.validate()?;
        for (name, value) in [
            ("cursor_sensitivity", self.cursor_sensitivity),
            ("scroll_sensitivity", self.scroll_sensitivity),
        ] {
            if !(0.1..=3.0).contains(&value) {
                return Err(crate::Error::InvalidInput(format!(
                    "{} must be in [0.1, 3.0], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Action, Gesture};
    use crate::profile::GestureSettings;

    #[test]
    fn test_session_id_round_trips_through_str() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_from_profile() {
        let mut mapping = ActionMapping::default();
        mapping.fist = Action::None;
        let profile = UserProfile::new("Tuned")
            .with_id("tuned")
            .with_settings(GestureSettings {
                pinch_threshold: 0.9,
                smoothing_factor: 0.2,
                cursor_sensitivity: 2.0,
                ..Default::default()
            })
            .with_mapping(mapping);

        let base = SessionOptions::default().with_stabilizer(StabilizerConfig {
            buffer_size: 7,
            min_consecutive: 4,
            smoothing_factor: 0.5,
        });
        let options = SessionOptions::from_profile(&profile, &base);

        assert_eq!(options.profile_id.as_deref(), Some("tuned"));
        assert_eq!(options.thresholds.pinch, 0.9);
        assert_eq!(options.mapping.action_for(Gesture::Fist), Action::None);
        assert_eq!(options.stabilizer.buffer_size, 7);
        assert_eq!(options.stabilizer.smoothing_factor, 0.2);
        assert_eq!(options.cursor_sensitivity, 2.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(SessionOptions::default().validate().is_ok());

        let bad = SessionOptions {
            cursor_sensitivity: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(crate::Error::InvalidInput(_))));

        let bad = SessionOptions::default().with_stabilizer(StabilizerConfig {
            buffer_size: 0,
            ..Default::default()
        });
        assert!(bad.validate().is_err());
    }
}
