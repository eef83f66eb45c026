//! Headless output - NDJSON events for scripts and tests
//!
//! Every command that is not the interactive preview reports its result as
//! newline-delimited JSON on stdout, one event per line. Each event has an
//! `"event"` field naming its type.
//!
//! ```json
//! {"event":"rendered","username":"ada","viewport":"wide","tree":{...},"timestamp":1704700001000}
//! {"event":"link_added","link_id":"V1StGXR8Z5jdHi6BmyT12","title":"Blog","url":"https://blog.example","timestamp":1704700002000}
//! ```

use std::io::{self, Write};

use chrono::Utc;
use linkbio_core::{Link, LinkId, RenderTree, Viewport};
use serde::Serialize;
use tracing::error;

/// Events emitted by headless commands
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A profile's links were rendered
    Rendered {
        username: String,
        viewport: Viewport,
        tree: RenderTree,
        timestamp: i64,
    },

    /// No public profile answers to the requested username
    PageNotFound { username: String, timestamp: i64 },

    /// Current link list of a profile
    Links { links: Vec<Link>, timestamp: i64 },

    LinkAdded {
        link_id: LinkId,
        title: String,
        url: String,
        timestamp: i64,
    },

    LinkRemoved { link_id: LinkId, timestamp: i64 },

    /// Config directory initialized
    ConfigCreated { path: String, timestamp: i64 },

    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Serialize to a single JSON line (no trailing newline)
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                None
            }
        }
    }

    /// Write this event to stdout as one NDJSON line
    pub fn emit(&self) {
        let Some(json) = self.to_json() else {
            return;
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn rendered(username: &str, viewport: Viewport, tree: RenderTree) -> Self {
        Self::Rendered {
            username: username.to_string(),
            viewport,
            tree,
            timestamp: Self::now(),
        }
    }

    pub fn page_not_found(username: &str) -> Self {
        Self::PageNotFound {
            username: username.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn links(links: &[Link]) -> Self {
        Self::Links {
            links: links.to_vec(),
            timestamp: Self::now(),
        }
    }

    pub fn link_added(link: &Link) -> Self {
        Self::LinkAdded {
            link_id: link.id.clone(),
            title: link.title.clone(),
            url: link.url.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn link_removed(link_id: &LinkId) -> Self {
        Self::LinkRemoved {
            link_id: link_id.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn config_created(path: &std::path::Path) -> Self {
        Self::ConfigCreated {
            path: path.display().to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}
