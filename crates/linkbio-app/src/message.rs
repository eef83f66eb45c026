//! Message types for the preview (TEA pattern)

use linkbio_core::{AppearanceUpdate, Link, ProfileSettings};

use crate::auth::AuthState;
use crate::input_key::InputKey;

/// All possible messages/actions in the preview
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Terminal resized
    Resize { width: u16, height: u16 },

    /// Tick event for periodic updates
    Tick,

    Quit,

    // ─────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────
    /// The auth state machine published a new state
    AuthChanged(AuthState),
    RequestSignIn,
    RequestSignOut,
    SignOutFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Settings file
    // ─────────────────────────────────────────────────────────
    /// The watched profile document changed on disk (or reload requested)
    SettingsFileChanged,
    SettingsLoaded(Box<ProfileSettings>),
    SettingsLoadFailed { message: String },
    WatcherError { message: String },

    // ─────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────
    CycleLayout,
    ToggleDarkMode,
    ToggleTextShadow,
    AppearanceSaved(Box<AppearanceUpdate>),
    AppearanceSaveFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrevious,
    /// Cycle the selected link between both / icon / title
    CycleSelectedDisplay,
    DeleteSelected,
    /// The list that was written
    LinksSaved { links: Vec<Link> },
    LinksSaveFailed { message: String },

    DismissStatus,
}
