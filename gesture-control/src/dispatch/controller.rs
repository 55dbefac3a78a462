//! Screen controller
//!
//! Maps normalized commands onto screen pixels and wheel clicks and drives an
//! [`InputBackend`]. Drag-and-drop is a toggle: the first `drag_drop` presses
//! the button, the next one releases it.

use super::backend::InputBackend;
use super::command::{ActionCommand, ScrollDirection};
use super::ActionDispatcher;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Pointer tuning, `[controller]` in the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Multiplier applied to normalized cursor positions
    pub cursor_sensitivity: f64,
    /// Wheel clicks per scroll command
    pub scroll_speed: u32,
    /// Screen size used by the recording backend
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            cursor_sensitivity: 1.0,
            scroll_speed: 10,
            screen_width: 1920,
            screen_height: 1080,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.1..=3.0).contains(&self.cursor_sensitivity) {
            return Err(Error::Config(format!(
                "cursor_sensitivity must be in [0.1, 3.0], got {}",
                self.cursor_sensitivity
            )));
        }
        if self.scroll_speed == 0 {
            return Err(Error::Config("scroll_speed must be at least 1".into()));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(Error::Config("screen size must be non-zero".into()));
        }
        Ok(())
    }
}

/// Dispatcher that drives the pointer through an input backend
pub struct ScreenController<B: InputBackend> {
    backend: B,
    cursor_sensitivity: f64,
    scroll_clicks: i32,
    dragging: bool,
    last_position: Option<(i32, i32)>,
}

impl<B: InputBackend> ScreenController<B> {
    pub fn new(backend: B, config: &ControllerConfig) -> Self {
        let (w, h) = backend.screen_size();
        info!(
            width = w,
            height = h,
            sensitivity = config.cursor_sensitivity,
            "Screen controller ready"
        );
        Self {
            backend,
            cursor_sensitivity: config.cursor_sensitivity,
            scroll_clicks: config.scroll_speed.max(1) as i32,
            dragging: false,
            last_position: None,
        }
    }

    /// Scale the scroll speed, e.g. by a profile's scroll sensitivity
    pub fn with_scroll_sensitivity(mut self, sensitivity: f64) -> Self {
        self.scroll_clicks = ((self.scroll_clicks as f64) * sensitivity).round().max(1.0) as i32;
        self
    }

    pub fn with_cursor_sensitivity(mut self, sensitivity: f64) -> Self {
        self.cursor_sensitivity = sensitivity;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last pixel position the pointer was moved to
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last_position
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Normalized frame position → clamped screen pixels
    pub fn to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        let (w, h) = self.backend.screen_size();
        let scale = |v: f64, extent: u32| -> i32 {
            let px = (v * extent as f64 * self.cursor_sensitivity) as i64;
            px.clamp(0, extent as i64) as i32
        };
        (scale(x, w), scale(y, h))
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<(i32, i32)> {
        let (px, py) = self.to_screen(x, y);
        self.backend.move_to(px, py)?;
        self.last_position = Some((px, py));
        Ok((px, py))
    }

    fn toggle_drag(&mut self, x: f64, y: f64) -> Result<String> {
        let (px, py) = self.move_to(x, y)?;
        if self.dragging {
            self.backend.mouse_up()?;
            self.dragging = false;
            debug!(x = px, y = py, "Drag finished");
            Ok(format!("drag finished at ({}, {})", px, py))
        } else {
            self.backend.mouse_down()?;
            self.dragging = true;
            debug!(x = px, y = py, "Drag started");
            Ok(format!("drag started at ({}, {})", px, py))
        }
    }
}

impl<B: InputBackend> ActionDispatcher for ScreenController<B> {
    fn dispatch(&mut self, command: &ActionCommand) -> Result<String> {
        match *command {
            ActionCommand::MoveCursor { x, y } => {
                let (px, py) = self.move_to(x, y)?;
                Ok(format!("cursor moved to ({}, {})", px, py))
            }
            ActionCommand::LeftClick => {
                self.backend.click()?;
                Ok("left click".to_string())
            }
            ActionCommand::RightClick => {
                self.backend.right_click()?;
                Ok("right click".to_string())
            }
            ActionCommand::Scroll { direction } => {
                let clicks = match direction {
                    ScrollDirection::Up => self.scroll_clicks,
                    ScrollDirection::Down => -self.scroll_clicks,
                };
                self.backend.scroll(clicks)?;
                Ok(format!("scroll {}", direction))
            }
            ActionCommand::DragDrop { x, y } => self.toggle_drag(x, y),
        }
    }

    fn release(&mut self) {
        if self.dragging {
            // Never leave the button held once the session is gone
            if let Err(e) = self.backend.mouse_up() {
                tracing::warn!("Failed to release drag: {}", e);
            }
            self.dragging = false;
        }
    }
}
