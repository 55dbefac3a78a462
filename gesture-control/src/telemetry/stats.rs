//! Telemetry aggregation

use super::GestureLog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many of the latest records a summary carries
pub const RECENT_LOGS: usize = 20;

/// Summary over a set of gesture logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    pub total_gestures: usize,
    pub gesture_counts: BTreeMap<String, u64>,
    /// Up to [`RECENT_LOGS`] latest records, oldest first
    pub recent_logs: Vec<GestureLog>,
}

impl TelemetryStats {
    /// Aggregate `logs`, optionally restricted to one profile
    pub fn from_logs(logs: &[GestureLog], profile_id: Option<&str>) -> Self {
        let selected: Vec<&GestureLog> = logs
            .iter()
            .filter(|log| match profile_id {
                Some(id) => log.profile_id.as_deref() == Some(id),
                None => true,
            })
            .collect();

        let mut gesture_counts = BTreeMap::new();
        for log in &selected {
            *gesture_counts
                .entry(log.gesture.as_str().to_string())
                .or_insert(0) += 1;
        }

        let skip = selected.len().saturating_sub(RECENT_LOGS);
        Self {
            total_gestures: selected.len(),
            gesture_counts,
            recent_logs: selected.into_iter().skip(skip).cloned().collect(),
        }
    }

    /// Most frequent gesture, ties broken alphabetically
    pub fn top_gesture(&self) -> Option<(&str, u64)> {
        let mut top: Option<(&str, u64)> = None;
        for (name, count) in &self.gesture_counts {
            if top.map_or(true, |(_, c)| *count > c) {
                top = Some((name.as_str(), *count));
            }
        }
        top
    }
}
