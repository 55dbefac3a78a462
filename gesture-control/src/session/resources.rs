//! Per-session resources
//!
//! Every session gets its own landmark provider and action dispatcher from a
//! [`SessionResources`] factory. The provider is wrapped in a
//! [`ProviderGuard`] so it is closed exactly once, whichever way the session
//! ends.

use super::SessionOptions;
use crate::dispatch::{ActionDispatcher, ControllerConfig, RecordingBackend, ScreenController};
use crate::landmarks::{HandObservation, JsonLandmarkProvider, LandmarkProvider};
use crate::Result;
use tracing::debug;

/// Factory for the collaborators a session owns
pub trait SessionResources: Send + Sync {
    fn provider(&self) -> Result<Box<dyn LandmarkProvider>>;

    fn dispatcher(&self, options: &SessionOptions) -> Result<Box<dyn ActionDispatcher>>;
}

/// Owns a provider and closes it on drop
pub struct ProviderGuard {
    provider: Option<Box<dyn LandmarkProvider>>,
}

impl ProviderGuard {
    pub fn new(provider: Box<dyn LandmarkProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn detect(&mut self, frame: &[u8]) -> Result<Vec<HandObservation>> {
        match self.provider.as_mut() {
            Some(p) => p.detect(frame),
            None => Err(crate::Error::Provider("provider already released".into())),
        }
    }

    /// Close the provider now. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut provider) = self.provider.take() {
            debug!(provider = provider.name(), "Releasing landmark provider");
            provider.close();
        }
    }

    pub fn is_released(&self) -> bool {
        self.provider.is_none()
    }
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Resources for offline replay: JSON landmark frames in, pointer calls
/// recorded instead of performed
#[derive(Debug, Clone)]
pub struct ReplayResources {
    controller: ControllerConfig,
    backend: RecordingBackend,
    max_hands: Option<usize>,
}

impl ReplayResources {
    pub fn new(controller: ControllerConfig) -> Self {
        let backend = RecordingBackend::new(controller.screen_width, controller.screen_height);
        Self {
            controller,
            backend,
            max_hands: None,
        }
    }

    pub fn with_max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = Some(max_hands);
        self
    }

    /// Shared call log of every dispatcher handed out
    pub fn backend(&self) -> &RecordingBackend {
        &self.backend
    }
}

impl SessionResources for ReplayResources {
    fn provider(&self) -> Result<Box<dyn LandmarkProvider>> {
        Ok(match self.max_hands {
            Some(n) => Box::new(JsonLandmarkProvider::with_max_hands(n)),
            None => Box::new(JsonLandmarkProvider::new()),
        })
    }

    fn dispatcher(&self, options: &SessionOptions) -> Result<Box<dyn ActionDispatcher>> {
        let controller = ScreenController::new(self.backend.clone(), &self.controller)
            .with_cursor_sensitivity(self.controller.cursor_sensitivity * options.cursor_sensitivity)
            .with_scroll_sensitivity(options.scroll_sensitivity);
        Ok(Box::new(controller))
    }
}
