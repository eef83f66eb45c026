//! Profile document watcher
//!
//! Watches the directory holding the profile document and asks the preview
//! to reload whenever that file changes, with debouncing so editors that
//! write in several steps trigger a single reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::config::WatcherSettings;
use crate::message::Message;

/// Default debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// How often the blocking loop checks for the stop signal
const STOP_POLL: Duration = Duration::from_millis(100);

/// Configuration for the settings watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub debounce: Duration,
    pub enabled: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            enabled: true,
        }
    }
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &WatcherSettings) -> Self {
        Self::new()
            .with_debounce_ms(settings.debounce_ms)
            .with_enabled(settings.enabled)
    }

    /// Set debounce duration in milliseconds
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Watches one profile document for changes
pub struct SettingsWatcher {
    document: PathBuf,
    config: WatcherConfig,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl SettingsWatcher {
    pub fn new(document: impl Into<PathBuf>, config: WatcherConfig) -> Self {
        Self {
            document: document.into(),
            config,
            stop_tx: None,
        }
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Start watching.
    ///
    /// Sends `Message::SettingsFileChanged` on change and
    /// `Message::WatcherError` when the backend reports a problem. A disabled
    /// watcher starts as a no-op.
    pub fn start(&mut self, message_tx: mpsc::Sender<Message>) -> Result<(), String> {
        if self.is_running() {
            return Err("Watcher is already running".to_string());
        }
        if !self.config.enabled {
            debug!("Settings watcher disabled");
            return Ok(());
        }

        let document = self.document.clone();
        let debounce = self.config.debounce;
        let (stop_tx, stop_rx) = oneshot::channel();
        self.stop_tx = Some(stop_tx);

        tokio::task::spawn_blocking(move || {
            Self::run_watcher(document, debounce, message_tx, stop_rx);
        });

        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    fn run_watcher(
        document: PathBuf,
        debounce: Duration,
        message_tx: mpsc::Sender<Message>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        let (dir, file_name) = watch_target(&document);
        let tx = message_tx.clone();
        let target = file_name.clone();

        let debouncer_result = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let touched = events
                        .iter()
                        .filter(|event| !event.kind.is_access())
                        .any(|event| event.paths.iter().any(|p| p.file_name() == Some(&target)));
                    if touched {
                        debug!("Profile document changed");
                        let _ = tx.blocking_send(Message::SettingsFileChanged);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!("Settings watcher error: {:?}", error);
                        let _ = tx.blocking_send(Message::WatcherError {
                            message: error.to_string(),
                        });
                    }
                }
            }
        });

        let mut debouncer = match debouncer_result {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create settings watcher: {}", e);
                let _ = message_tx.blocking_send(Message::WatcherError {
                    message: format!("Failed to create watcher: {}", e),
                });
                return;
            }
        };

        // The directory is watched so atomic replace-by-rename is still seen
        if let Err(e) = debouncer.watch(&dir, RecursiveMode::NonRecursive) {
            warn!("Failed to watch {}: {}", dir.display(), e);
            let _ = message_tx.blocking_send(Message::WatcherError {
                message: format!("Cannot watch {}: {}", dir.display(), e),
            });
            return;
        }
        info!("Watching: {}", document.display());

        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                    info!("Settings watcher stopping");
                    break;
                }
                Err(oneshot::error::TryRecvError::Empty) => std::thread::sleep(STOP_POLL),
            }
        }
    }
}

impl Drop for SettingsWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Directory to watch and the file name to filter on
fn watch_target(document: &Path) -> (PathBuf, OsString) {
    let dir = match document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = document
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    (dir, name)
}
