//! Typed control commands

use crate::classifier::{Action, GestureDetails, CURSOR_X, CURSOR_Y, PINCH_X, PINCH_Y};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertical scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

impl ScrollDirection {
    /// Direction implied by the hand moving from `previous_y` to `current_y`.
    ///
    /// Image y grows downward, so a decreasing y means the hand moved up.
    pub fn from_motion(previous_y: f64, current_y: f64) -> Self {
        if current_y < previous_y {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control command ready for an [`ActionDispatcher`](super::ActionDispatcher).
///
/// Positions are normalized to [0, 1] of the camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionCommand {
    MoveCursor { x: f64, y: f64 },
    LeftClick,
    RightClick,
    Scroll { direction: ScrollDirection },
    DragDrop { x: f64, y: f64 },
}

impl ActionCommand {
    /// Build the command for a stable action.
    ///
    /// Returns `Ok(None)` for [`Action::None`]. Positional actions take the
    /// first complete position pair in `details` and fail without one.
    pub fn from_action(
        action: Action,
        details: &GestureDetails,
        direction: ScrollDirection,
    ) -> Result<Option<Self>> {
        let command = match action {
            Action::None => return Ok(None),
            Action::LeftClick => Self::LeftClick,
            Action::RightClick => Self::RightClick,
            Action::Scroll => Self::Scroll { direction },
            Action::MoveCursor => {
                let (x, y) = position(details)
                    .ok_or_else(|| Error::Dispatch("move_cursor without a position".into()))?;
                Self::MoveCursor { x, y }
            }
            Action::DragDrop => {
                let (x, y) = position(details)
                    .ok_or_else(|| Error::Dispatch("drag_drop without a position".into()))?;
                Self::DragDrop { x, y }
            }
        };
        Ok(Some(command))
    }

    pub fn action(&self) -> Action {
        match self {
            Self::MoveCursor { .. } => Action::MoveCursor,
            Self::LeftClick => Action::LeftClick,
            Self::RightClick => Action::RightClick,
            Self::Scroll { .. } => Action::Scroll,
            Self::DragDrop { .. } => Action::DragDrop,
        }
    }
}

/// First complete position pair: cursor, then pinch
fn position(details: &GestureDetails) -> Option<(f64, f64)> {
    [(CURSOR_X, CURSOR_Y), (PINCH_X, PINCH_Y)]
        .into_iter()
        .find_map(|(kx, ky)| Some((*details.get(kx)?, *details.get(ky)?)))
}
