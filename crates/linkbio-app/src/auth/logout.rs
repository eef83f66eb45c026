//! The explicit-logout flag.
//!
//! Set before a sign-out request is sent so that a session check racing with
//! it treats the session as intentionally ending. When backed by a marker
//! file the flag survives restarts, which is what lets the next mount force
//! a sign-out round-trip against a stale cached session.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use linkbio_core::prelude::*;

/// Best-effort "user explicitly logged out" marker; last write wins
#[derive(Debug, Clone, Default)]
pub struct LogoutFlag {
    set: Arc<AtomicBool>,
    marker: Option<Arc<PathBuf>>,
}

impl LogoutFlag {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Flag persisted as the existence of `marker`
    pub fn persisted(marker: impl Into<PathBuf>) -> Self {
        let marker = marker.into();
        let set = marker.exists();
        Self {
            set: Arc::new(AtomicBool::new(set)),
            marker: Some(Arc::new(marker)),
        }
    }

    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }

    pub fn set(&self) {
        self.set.store(true, Ordering::SeqCst);
        if let Some(marker) = &self.marker {
            write_marker(marker);
        }
    }

    pub fn clear(&self) {
        self.set.store(false, Ordering::SeqCst);
        if let Some(marker) = &self.marker {
            remove_marker(marker);
        }
    }

    /// Clear the flag, returning whether it was set
    pub fn take(&self) -> bool {
        let was_set = self.set.swap(false, Ordering::SeqCst);
        if was_set {
            if let Some(marker) = &self.marker {
                remove_marker(marker);
            }
        }
        was_set
    }
}

fn write_marker(marker: &Path) {
    let result = marker
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| std::fs::write(marker, b""));
    if let Err(e) = result {
        warn!("Failed to persist logout flag at {:?}: {}", marker, e);
    }
}

fn remove_marker(marker: &Path) {
    match std::fs::remove_file(marker) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to clear logout flag at {:?}: {}", marker, e),
    }
}
