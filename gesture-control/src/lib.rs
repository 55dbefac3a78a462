//! # Gesture Control
//!
//! Turns a stream of hand-keypoint observations into debounced pointer
//! actions: cursor moves, clicks, scrolling and drag-and-drop.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use gesture_control::dispatch::ControllerConfig;
//! use gesture_control::session::{ReplayResources, SessionManager, SessionOptions};
//!
//! # async fn run() -> gesture_control::Result<()> {
//! let resources = ReplayResources::new(ControllerConfig::default());
//! let manager = SessionManager::new(Arc::new(resources));
//!
//! let session = manager.open_session(SessionOptions::default())?;
//! let report = manager.handle_payload(session, "data:application/json;base64,W10=").await?;
//! println!("{}", serde_json::to_string(&report)?);
//!
//! manager.close_session(session);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`landmarks`]: Keypoint types, frame payloads and the provider boundary
//! - [`classifier`]: Stateless geometric rules mapping one hand to a gesture
//! - [`stabilizer`]: Majority voting, debouncing and position smoothing
//! - [`dispatch`]: Typed commands and the screen controller
//! - [`profile`]: Per-user thresholds, sensitivities and action mapping
//! - [`telemetry`]: Fire-and-forget gesture logs and their aggregation
//! - [`session`]: Per-client pipelines and their lifecycle
//! - [`time`]: Clock abstraction for duration tracking
//! - [`app`]: CLI and configuration management
//!
//! ## Frame Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Payload   │───▶│  Landmark   │───▶│ Classifier  │───▶│ Stabilizer  │
//! │  (base64)   │    │  Provider   │    │ (1st hand)  │    │  (vote)     │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                            ┌────────────────────┤
//!                                            ▼                    ▼
//!                                     ┌─────────────┐    ┌─────────────┐
//!                                     │ Dispatcher  │    │  Telemetry  │
//!                                     │  (stable)   │    │  (changed)  │
//!                                     └─────────────┘    └─────────────┘
//! ```

pub mod time;
pub mod landmarks;
pub mod classifier;
pub mod stabilizer;
pub mod dispatch;
pub mod profile;
pub mod telemetry;
pub mod session;
pub mod app;

// Re-export commonly used types
pub use classifier::{Action, Gesture, GestureClassifier, GestureResult, ThresholdConfig};
pub use landmarks::{HandObservation, Handedness, Landmark};
pub use session::{FrameReport, SessionId, SessionManager, SessionOptions};
pub use stabilizer::{StabilizedEvent, Stabilizer, StabilizerConfig};

/// Result type alias for gesture control
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gesture control
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Frame decode error: {0}")]
    Decode(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Landmark provider error: {0}")]
    Provider(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
