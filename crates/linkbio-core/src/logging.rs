//! Tracing setup for the `linkbio` binary.
//!
//! Nothing is logged to the terminal: headless commands print NDJSON events
//! on stdout and the preview draws over the whole screen, so any stray log
//! line would corrupt one or the other. Everything goes to a daily log file
//! instead.
//!
//! ```bash
//! LINKBIO_LOG=debug linkbio preview profile.json
//! LINKBIO_LOG=linkbio_app::auth=trace linkbio page ada
//! LINKBIO_LOG_DIR=/tmp/linkbio-logs linkbio render profile.json
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Filter directives, in `EnvFilter` syntax
pub const LOG_ENV_VAR: &str = "LINKBIO_LOG";

/// Overrides the directory log files are written to
pub const LOG_DIR_ENV_VAR: &str = "LINKBIO_LOG_DIR";

const DEFAULT_FILTER: &str = "linkbio=info,linkbio_core=info,linkbio_app=info,linkbio_tui=info,warn";
const LOG_FILE_PREFIX: &str = "linkbio.log";

/// Where log files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLocation {
    pub dir: PathBuf,
}

impl LogLocation {
    /// `$LINKBIO_LOG_DIR`, else `<data_local_dir>/linkbio/logs`
    pub fn from_env() -> Self {
        Self::resolve(std::env::var_os(LOG_DIR_ENV_VAR))
    }

    fn resolve(override_dir: Option<OsString>) -> Self {
        let dir = match override_dir.filter(|d| !d.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("linkbio")
                .join("logs"),
        };
        Self { dir }
    }

    /// Today's file; the appender suffixes the prefix with the date
    pub fn file_prefix(&self) -> PathBuf {
        self.dir.join(LOG_FILE_PREFIX)
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init() -> Result<LogLocation> {
    let location = LogLocation::from_env();
    std::fs::create_dir_all(&location.dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &location.dir, LOG_FILE_PREFIX);
    let timer = fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string());

    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(timer),
        )
        .init();

    tracing::info!(
        "linkbio {} started (pid {}), logging to {}",
        env!("CARGO_PKG_VERSION"),
        std::process::id(),
        location.dir.display()
    );
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_is_under_data_dir() {
        let location = LogLocation::resolve(None);
        assert!(location.dir.ends_with("linkbio/logs"));
        assert!(location.file_prefix().ends_with("linkbio/logs/linkbio.log"));
    }

    #[test]
    fn test_dir_override() {
        let location = LogLocation::resolve(Some(OsString::from("/tmp/lb")));
        assert_eq!(location.dir, PathBuf::from("/tmp/lb"));

        let empty = LogLocation::resolve(Some(OsString::new()));
        assert_eq!(empty, LogLocation::resolve(None));
    }
}
