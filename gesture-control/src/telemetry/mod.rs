//! Gesture telemetry
//!
//! Recognized gesture transitions are recorded as [`GestureLog`]s. Recording
//! is fire-and-forget: [`TelemetryLogger::log`] pushes onto an unbounded
//! channel drained by a detached writer task, which hands each write to the
//! blocking pool, so a slow or failing store can never hold up frame
//! processing. Write failures are logged and counted, nothing more.
//!
//! ```text
//! session ──log()──▶ mpsc ──▶ writer task ──▶ TelemetryStore
//! ```

pub mod record;
pub mod stats;
pub mod store;

pub use record::GestureLog;
pub use stats::{TelemetryStats, RECENT_LOGS};
pub use store::{JsonlTelemetryStore, MemoryTelemetryStore, TelemetryStore};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Telemetry settings, `[telemetry]` in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    /// JSON-lines output; defaults to `~/.gesture_control/gestures.jsonl`
    pub path: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl TelemetryConfig {
    /// Resolved log path
    pub fn log_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gesture_control")
                .join("gestures.jsonl")
        })
    }
}

enum Message {
    Record(GestureLog),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background telemetry writer.
///
/// Cheap to clone; every clone feeds the same FIFO so records from one
/// session reach the store in the order they were logged.
#[derive(Clone)]
pub struct TelemetryLogger {
    tx: Option<mpsc::UnboundedSender<Message>>,
    failed_writes: Arc<AtomicU64>,
}

impl TelemetryLogger {
    /// Start a writer task on the current tokio runtime.
    ///
    /// The task runs until every clone of the logger has been dropped.
    pub fn spawn(store: Arc<dyn TelemetryStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let failed_writes = Arc::new(AtomicU64::new(0));
        tokio::spawn(run_writer(store, rx, Arc::clone(&failed_writes)));
        Self {
            tx: Some(tx),
            failed_writes,
        }
    }

    /// A logger that drops every record
    pub fn disabled() -> Self {
        Self {
            tx: None,
            failed_writes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Queue a record without waiting for it to be written
    pub fn log(&self, log: GestureLog) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(Message::Record(log)).is_err() {
            warn!("Telemetry writer has stopped; dropping gesture log");
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Wait until everything queued so far has been handed to the store
    pub async fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = oneshot::channel();
        if tx.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Records that could not be written
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for TelemetryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryLogger")
            .field("enabled", &self.is_enabled())
            .field("failed_writes", &self.failed_writes())
            .finish()
    }
}

async fn run_writer(
    store: Arc<dyn TelemetryStore>,
    mut rx: mpsc::UnboundedReceiver<Message>,
    failed_writes: Arc<AtomicU64>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            Message::Record(log) => {
                // Store writes are blocking I/O; keep them off the runtime
                // threads that drive sessions. Awaiting here keeps FIFO order.
                let gesture = log.gesture;
                let writer = Arc::clone(&store);
                let outcome = tokio::task::spawn_blocking(move || writer.append(&log)).await;
                let error = match outcome {
                    Ok(Ok(())) => continue,
                    Ok(Err(e)) => e.to_string(),
                    Err(e) => format!("writer task failed: {}", e),
                };
                warn!(gesture = %gesture, "Failed to write gesture log: {}", error);
                failed_writes.fetch_add(1, Ordering::Relaxed);
            }
            Message::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Telemetry writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Action, Gesture};

    struct FailingStore;

    impl TelemetryStore for FailingStore {
        fn append(&self, _log: &GestureLog) -> crate::Result<()> {
            Err(crate::Error::Telemetry("disk full".into()))
        }

        fn load_all(&self) -> crate::Result<Vec<GestureLog>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_records_reach_store_in_order() {
        let store = Arc::new(MemoryTelemetryStore::new());
        let logger = TelemetryLogger::spawn(store.clone());

        for gesture in [Gesture::Fist, Gesture::Pinch, Gesture::OpenHand] {
            logger.log(GestureLog::new(gesture, 0.9, Action::None));
        }
        logger.flush().await;

        let gestures: Vec<_> = store.load_all().unwrap().iter().map(|l| l.gesture).collect();
        assert_eq!(gestures, vec![Gesture::Fist, Gesture::Pinch, Gesture::OpenHand]);
    }

    #[tokio::test]
    async fn test_write_failures_are_counted_not_raised() {
        let logger = TelemetryLogger::spawn(Arc::new(FailingStore));
        logger.log(GestureLog::new(Gesture::Fist, 0.9, Action::LeftClick));
        logger.log(GestureLog::new(Gesture::Fist, 0.9, Action::LeftClick));
        logger.flush().await;
        assert_eq!(logger.failed_writes(), 2);
    }

    #[tokio::test]
    async fn test_disabled_logger_is_inert() {
        let logger = TelemetryLogger::disabled();
        assert!(!logger.is_enabled());
        logger.log(GestureLog::new(Gesture::Fist, 0.9, Action::LeftClick));
        logger.flush().await;
        assert_eq!(logger.failed_writes(), 0);
    }

    #[test]
    fn test_config_default_path() {
        let config = TelemetryConfig::default();
        assert!(config.enabled);
        assert!(config.log_path().ends_with(".gesture_control/gestures.jsonl"));

        let config = TelemetryConfig {
            enabled: true,
            path: Some(PathBuf::from("/tmp/g.jsonl")),
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/g.jsonl"));
    }
}
