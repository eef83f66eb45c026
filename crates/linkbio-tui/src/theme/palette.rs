//! Fixed chrome colors. Profile content takes its colors from the profile
//! theme instead (see `styles`).

use linkbio_core::Rgb;
use ratatui::style::Color;

// --- Status bar ---
pub const STATUS_BG: Color = Color::Rgb(22, 27, 34);
pub const STATUS_FG: Color = Color::Gray;
pub const STATUS_KEY: Color = Color::Yellow;

// --- Status messages ---
pub const STATUS_INFO: Color = Color::Cyan;
pub const STATUS_ERROR: Color = Color::Red;

// --- Auth indicator ---
pub const AUTH_OWNER: Color = Color::Green;
pub const AUTH_VISITOR: Color = Color::Blue;
pub const AUTH_SIGNED_OUT: Color = Color::Red;
pub const AUTH_RESOLVING: Color = Color::Yellow;

// --- Guard screens ---
pub const GUARD_BG: Color = Color::Black;
pub const GUARD_TEXT: Color = Color::White;
pub const GUARD_MUTED: Color = Color::DarkGray;

/// Terminal color for a theme color
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}
