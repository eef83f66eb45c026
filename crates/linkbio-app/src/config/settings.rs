//! Settings parser for .linkbio/config.toml

use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use linkbio_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration directory
pub const LINKBIO_DIR: &str = ".linkbio";

const DEFAULT_CONFIG: &str = r#"# linkbio configuration

[backend]
url = ""                  # Empty = local profile documents only
bucket = "profile-media"

[auth]
sign_in_path = "/login"
protected_paths = ["/dashboard", "/settings"]

[ui]
icons = "unicode"         # "unicode" or "nerd_fonts"
narrow_breakpoint = 60    # Columns below which the grid uses 2 columns
# text_shadow = true      # Override the profile's text shadow setting

[watcher]
enabled = true
debounce_ms = 300

[storage]
# data_dir = ".linkbio/profiles"

[media]
max_avatar_bytes = 2097152
max_favicon_bytes = 524288
"#;

pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(LINKBIO_DIR).join(CONFIG_FILENAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from .linkbio/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = config_path(project_path);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the default config file in .linkbio/ (existing files are kept)
pub fn init_config_dir(project_path: &Path) -> Result<PathBuf> {
    let dir = project_path.join(LINKBIO_DIR);
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::config(format!("Failed to create {LINKBIO_DIR} dir: {e}")))?;

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {e}")))?;
        info!("Created {:?}", config_path);
    }

    Ok(config_path)
}

/// Save settings to .linkbio/config.toml under an exclusive lock
pub fn save_settings(project_path: &Path, settings: &Settings) -> Result<()> {
    let dir = project_path.join(LINKBIO_DIR);
    std::fs::create_dir_all(&dir)
        .map_err(|e| Error::config(format!("Failed to create {LINKBIO_DIR} dir: {e}")))?;

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {e}")))?;

    let config_path = dir.join(CONFIG_FILENAME);
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&config_path)
        .map_err(|e| Error::config(format!("Failed to open config.toml: {e}")))?;

    // Blocks while another process holds the lock
    file.lock_exclusive()
        .map_err(|e| Error::config(format!("Failed to lock config.toml: {e}")))?;

    file.write_all(b"# linkbio configuration\n\n")
        .and_then(|_| file.write_all(content.as_bytes()))
        .and_then(|_| file.flush())
        .map_err(|e| Error::config(format!("Failed to write config.toml: {e}")))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbio_core::IconMode;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_invalid_toml_gives_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(LINKBIO_DIR)).unwrap();
        std::fs::write(config_path(temp.path()), "[ui\nicons = ").unwrap();
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_writes_parsable_defaults() {
        let temp = TempDir::new().unwrap();
        let path = init_config_dir(temp.path()).unwrap();
        assert!(path.exists());
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(LINKBIO_DIR)).unwrap();
        std::fs::write(config_path(temp.path()), "[ui]\nicons = \"nerd_fonts\"\n").unwrap();

        init_config_dir(temp.path()).unwrap();
        assert_eq!(load_settings(temp.path()).ui.icons, IconMode::NerdFonts);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.ui.narrow_breakpoint = 80;
        settings.ui.text_shadow = Some(true);
        settings.auth.protected_paths = vec!["/admin".into()];

        save_settings(temp.path(), &settings).unwrap();
        assert_eq!(load_settings(temp.path()), settings);
    }
}
