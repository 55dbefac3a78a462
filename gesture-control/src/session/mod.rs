//! Session Orchestrator
//!
//! One session per connected client. A session owns its classifier
//! settings, its stabilizer state, a landmark provider and an action
//! dispatcher, and runs every frame through
//!
//! ```text
//! provider → classify (primary hand) → stabilize → dispatch → telemetry
//! ```
//!
//! Sessions are independent. The table lock is only held to insert, look up
//! or remove a session; each session sits behind its own async mutex so its
//! frames are processed one at a time, in arrival order, while other
//! sessions proceed in parallel.

pub mod options;
pub mod report;
pub mod resources;

pub use options::{SessionId, SessionOptions};
pub use report::{DetectionReport, FrameReport, NoHandReport, NO_HAND};
pub use resources::{ProviderGuard, ReplayResources, SessionResources};

use crate::classifier::{Action, GestureClassifier};
use crate::dispatch::{ActionCommand, ActionDispatcher, DispatchResult, ScrollDirection};
use crate::landmarks::{decode_payload, HandObservation};
use crate::profile::ProfileStore;
use crate::stabilizer::{StabilizedEvent, Stabilizer, StabilizerStats};
use crate::telemetry::{GestureLog, TelemetryLogger};
use crate::time::{Clock, SystemClock};
use crate::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Only this hand of a multi-hand frame is classified
pub const PRIMARY_HAND_INDEX: usize = 0;

/// State owned by one open session
struct Session {
    id: SessionId,
    profile_id: Option<String>,
    classifier: GestureClassifier,
    stabilizer: Stabilizer,
    provider: ProviderGuard,
    dispatcher: Box<dyn ActionDispatcher>,
    /// Wrist height at the previous scroll evaluation
    last_scroll_wrist_y: Option<f64>,
    frames: u64,
}

impl Session {
    fn process(&mut self, hands: Vec<HandObservation>, telemetry: &TelemetryLogger) -> FrameReport {
        self.frames += 1;
        let Some(primary) = hands.get(PRIMARY_HAND_INDEX) else {
            return FrameReport::no_hand();
        };

        let raw = self.classifier.classify(primary);
        let event = self.stabilizer.process(raw);

        let dispatch = if event.is_actionable() {
            let direction = if event.action == Action::Scroll {
                self.scroll_direction(primary)
            } else {
                ScrollDirection::default()
            };
            Some(self.dispatch(&event, direction))
        } else {
            None
        };

        if event.stable && event.gesture_changed && event.gesture.is_known() {
            debug!(session_id = %self.id, gesture = %event.gesture, "Logging gesture transition");
            let mut log = GestureLog::new(event.gesture, event.confidence, event.action)
                .with_session(self.id.to_string())
                .with_profile(self.profile_id.clone());
            if let Some(held) = event.previous_hold_seconds {
                log = log.with_duration_ms(held * 1000.0);
            }
            telemetry.log(log);
        }

        let mut report = DetectionReport::new(event, hands.len(), primary.handedness);
        report.dispatch = dispatch;
        FrameReport::Detected(report)
    }

    fn scroll_direction(&mut self, hand: &HandObservation) -> ScrollDirection {
        let Some(wrist) = hand.wrist() else {
            return ScrollDirection::default();
        };
        let previous = self.last_scroll_wrist_y.replace(wrist.y).unwrap_or(wrist.y);
        ScrollDirection::from_motion(previous, wrist.y)
    }

    fn dispatch(&mut self, event: &StabilizedEvent, direction: ScrollDirection) -> DispatchResult {
        let outcome = ActionCommand::from_action(event.action, &event.details, direction).and_then(
            |command| match command {
                Some(command) => {
                    debug!(session_id = %self.id, action = %command.action(), "Dispatching");
                    self.dispatcher.dispatch(&command)
                }
                None => Ok(String::new()),
            },
        );
        DispatchResult::from_outcome(outcome)
    }

    fn reset(&mut self) {
        self.stabilizer.reset();
        self.last_scroll_wrist_y = None;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dispatcher.release();
        self.provider.release();
        info!(session_id = %self.id, frames = self.frames, "Session closed");
    }
}

type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Table of open sessions and the shared collaborators they are built from
pub struct SessionManager {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
    resources: Arc<dyn SessionResources>,
    profiles: Option<Arc<dyn ProfileStore>>,
    telemetry: TelemetryLogger,
    clock: Arc<dyn Clock>,
    defaults: SessionOptions,
}

impl SessionManager {
    /// Create a manager with default options, no profile store and
    /// telemetry disabled
    pub fn new(resources: Arc<dyn SessionResources>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            resources,
            profiles: None,
            telemetry: TelemetryLogger::disabled(),
            clock: Arc::new(SystemClock::new()),
            defaults: SessionOptions::default(),
        }
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileStore>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn with_telemetry(mut self, telemetry: TelemetryLogger) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Options used when a session is opened without a profile
    pub fn with_defaults(mut self, defaults: SessionOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &SessionOptions {
        &self.defaults
    }

    pub fn telemetry(&self) -> &TelemetryLogger {
        &self.telemetry
    }

    /// Open a session bound to `options`
    pub fn open_session(&self, options: SessionOptions) -> Result<SessionId> {
        options.validate()?;

        let provider = ProviderGuard::new(self.resources.provider()?);
        let dispatcher = self.resources.dispatcher(&options)?;
        let id = SessionId::new();

        let session = Session {
            id,
            profile_id: options.profile_id.clone(),
            classifier: GestureClassifier::with_config(options.thresholds, options.mapping),
            stabilizer: Stabilizer::with_clock(options.stabilizer, Arc::clone(&self.clock)),
            provider,
            dispatcher,
            last_scroll_wrist_y: None,
            frames: 0,
        };

        let open = {
            let mut sessions = self.sessions.lock();
            sessions.insert(id, Arc::new(tokio::sync::Mutex::new(session)));
            sessions.len()
        };
        info!(
            session_id = %id,
            profile_id = options.profile_id.as_deref().unwrap_or("-"),
            open,
            "Session opened"
        );
        Ok(id)
    }

    /// Open a session with a stored profile's settings.
    ///
    /// A missing or inactive profile falls back to the manager defaults; the
    /// requested id is still recorded on telemetry.
    pub fn open_session_for_profile(&self, profile_id: Option<&str>) -> Result<SessionId> {
        let Some(profile_id) = profile_id else {
            return self.open_session(self.defaults.clone());
        };

        let profile = match &self.profiles {
            Some(store) => store.load(profile_id)?,
            None => None,
        };

        let options = match profile {
            Some(profile) if profile.is_active => {
                SessionOptions::from_profile(&profile, &self.defaults)
            }
            _ => {
                debug!(profile_id, "Profile not found or inactive; using defaults");
                self.defaults.clone().with_profile_id(profile_id)
            }
        };
        self.open_session(options)
    }

    fn session(&self, id: SessionId) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    /// Run one frame's observations through the session.
    ///
    /// `frame` is the provider's output for the frame; an `Err` there is
    /// reported back as an error report without touching session state.
    pub async fn handle_frame(
        &self,
        id: SessionId,
        frame: Result<Vec<HandObservation>>,
    ) -> Result<FrameReport> {
        let session = self.session(id)?;
        let hands = match frame {
            Ok(hands) => hands,
            Err(e) => {
                warn!(session_id = %id, "Frame decode failed: {}", e);
                return Ok(FrameReport::error(e.to_string()));
            }
        };

        let mut session = session.lock().await;
        Ok(session.process(hands, &self.telemetry))
    }

    /// Decode an encoded frame with the session's provider and process it
    pub async fn handle_payload(&self, id: SessionId, payload: &str) -> Result<FrameReport> {
        let session = self.session(id)?;
        let mut session = session.lock().await;

        let detected = decode_payload(payload).and_then(|bytes| session.provider.detect(&bytes));
        match detected {
            Ok(hands) => Ok(session.process(hands, &self.telemetry)),
            Err(e) => {
                warn!(session_id = %id, "Frame decode failed: {}", e);
                Ok(FrameReport::error(e.to_string()))
            }
        }
    }

    /// Cold-start a session's stabilizer, keeping its lifetime counters
    pub async fn reset_session(&self, id: SessionId) -> Result<()> {
        let session = self.session(id)?;
        session.lock().await.reset();
        debug!(session_id = %id, "Session reset");
        Ok(())
    }

    pub async fn session_stats(&self, id: SessionId) -> Result<StabilizerStats> {
        let session = self.session(id)?;
        let stats = session.lock().await.stabilizer.statistics();
        Ok(stats)
    }

    /// Remove a session. Returns false if it was not open.
    ///
    /// Its provider is released once the last in-flight frame finishes.
    pub fn close_session(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().remove(&id);
        removed.is_some()
    }

    /// Close every session, returning how many were open
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self.sessions.lock().drain().collect();
        drained.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.lock().contains_key(&id)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("sessions", &self.session_count())
            .field("telemetry", &self.telemetry)
            .field("defaults", &self.defaults)
            .finish()
    }
}
