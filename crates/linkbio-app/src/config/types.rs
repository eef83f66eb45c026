//! Configuration types for linkbio
//!
//! Defines `Settings` (the `.linkbio/config.toml` document) and its sections.

use std::path::{Path, PathBuf};

use linkbio_core::IconMode;
use serde::{Deserialize, Serialize};

/// Application settings (.linkbio/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub watcher: WatcherSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub media: MediaSettings,
}

/// Backend-as-a-service connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the backend (empty = local only)
    #[serde(default)]
    pub url: String,

    /// Object storage bucket for profile media
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    "profile-media".to_string()
}

/// Route protection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Where unauthenticated visitors of protected routes are sent
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,

    /// Path prefixes that require a session
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            sign_in_path: default_sign_in_path(),
            protected_paths: default_protected_paths(),
        }
    }
}

fn default_sign_in_path() -> String {
    "/login".to_string()
}

fn default_protected_paths() -> Vec<String> {
    vec!["/dashboard".to_string(), "/settings".to_string()]
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Icon mode: "unicode" (default) or "nerd_fonts"
    #[serde(default)]
    pub icons: IconMode,

    /// Terminal width (columns) below which the grid uses 2 columns
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint: u16,

    /// Force text shadow on or off regardless of the profile setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<bool>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            icons: IconMode::default(),
            narrow_breakpoint: default_narrow_breakpoint(),
            text_shadow: None,
        }
    }
}

fn default_narrow_breakpoint() -> u16 {
    60
}

/// Settings file watcher
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WatcherSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Debounce duration in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

/// Local profile storage
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory of profile documents (default: `.linkbio/profiles`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolve the data directory against the project root
    pub fn data_dir(&self, project_path: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_path.join(dir),
            None => project_path.join(super::LINKBIO_DIR).join("profiles"),
        }
    }
}

/// Upload limits for profile images
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaSettings {
    #[serde(default = "default_max_avatar_bytes")]
    pub max_avatar_bytes: u64,

    #[serde(default = "default_max_favicon_bytes")]
    pub max_favicon_bytes: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            max_avatar_bytes: default_max_avatar_bytes(),
            max_favicon_bytes: default_max_favicon_bytes(),
        }
    }
}

fn default_max_avatar_bytes() -> u64 {
    2 * 1024 * 1024
}

fn default_max_favicon_bytes() -> u64 {
    512 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.backend.bucket, "profile-media");
        assert_eq!(settings.auth.sign_in_path, "/login");
        assert_eq!(settings.auth.protected_paths, vec!["/dashboard", "/settings"]);
        assert_eq!(settings.ui.icons, IconMode::Unicode);
        assert_eq!(settings.ui.narrow_breakpoint, 60);
        assert!(settings.watcher.enabled);
        assert_eq!(settings.watcher.debounce_ms, 300);
        assert_eq!(settings.media.max_avatar_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[ui]
icons = "nerd_fonts"

[auth]
sign_in_path = "/signin"
"#,
        )
        .unwrap();
        assert_eq!(settings.ui.icons, IconMode::NerdFonts);
        assert_eq!(settings.ui.narrow_breakpoint, 60);
        assert_eq!(settings.auth.sign_in_path, "/signin");
        assert_eq!(settings.auth.protected_paths.len(), 2);
        assert_eq!(settings.media, MediaSettings::default());
    }

    #[test]
    fn test_data_dir_resolution() {
        let root = Path::new("/proj");
        let mut storage = StorageSettings::default();
        assert_eq!(
            storage.data_dir(root),
            PathBuf::from("/proj/.linkbio/profiles")
        );
        storage.data_dir = Some(PathBuf::from("data"));
        assert_eq!(storage.data_dir(root), PathBuf::from("/proj/data"));
        storage.data_dir = Some(PathBuf::from("/var/linkbio"));
        assert_eq!(storage.data_dir(root), PathBuf::from("/var/linkbio"));
    }
}
