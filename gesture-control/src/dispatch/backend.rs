//! Input backends
//!
//! [`InputBackend`] is the seam to whatever actually moves the pointer. The
//! controller only ever speaks in screen pixels and wheel clicks through it.

use crate::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// OS pointer automation capability
pub trait InputBackend: Send {
    /// Move the pointer to an absolute screen position
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Left click at the current position
    fn click(&mut self) -> Result<()>;

    /// Right click at the current position
    fn right_click(&mut self) -> Result<()>;

    /// Scroll the wheel. Positive is up.
    fn scroll(&mut self, clicks: i32) -> Result<()>;

    /// Press the left button
    fn mouse_down(&mut self) -> Result<()>;

    /// Release the left button
    fn mouse_up(&mut self) -> Result<()>;

    /// Screen size in pixels
    fn screen_size(&self) -> (u32, u32);
}

/// One call made against a [`RecordingBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum InputCall {
    MoveTo { x: i32, y: i32 },
    Click,
    RightClick,
    Scroll { clicks: i32 },
    MouseDown,
    MouseUp,
}

/// Backend that records calls instead of touching the OS.
///
/// Clones share the same call log, so a caller can keep a handle after
/// moving the backend into a controller. Used for dry runs and tests.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<InputCall>>>,
    screen: (u32, u32),
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            screen: (width, height),
        }
    }

    /// Snapshot of calls so far
    pub fn calls(&self) -> Vec<InputCall> {
        self.calls.lock().clone()
    }

    /// Drain the call log
    pub fn take_calls(&self) -> Vec<InputCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    fn record(&self, call: InputCall) -> Result<()> {
        self.calls.lock().push(call);
        Ok(())
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl InputBackend for RecordingBackend {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.record(InputCall::MoveTo { x, y })
    }

    fn click(&mut self) -> Result<()> {
        self.record(InputCall::Click)
    }

    fn right_click(&mut self) -> Result<()> {
        self.record(InputCall::RightClick)
    }

    fn scroll(&mut self, clicks: i32) -> Result<()> {
        self.record(InputCall::Scroll { clicks })
    }

    fn mouse_down(&mut self) -> Result<()> {
        self.record(InputCall::MouseDown)
    }

    fn mouse_up(&mut self) -> Result<()> {
        self.record(InputCall::MouseUp)
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }
}
