//! Test utilities for TUI rendering verification
//!
//! Wraps ratatui's TestBackend so widgets and full frames can be rendered
//! and inspected as text.
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.render_widget(ProfileHeader::new(&profile, &styles), term.area());
//! assert!(term.buffer_contains("@ada"));
//! ```

use chrono::{Duration, Utc};
use linkbio_app::config::Settings;
use linkbio_app::state::PreviewState;
use linkbio_app::AuthState;
use linkbio_core::{theme, Link, Profile, ProfileSettings, Session, User};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

use crate::theme::styles::ProfileStyles;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Compact terminal for narrow layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        line_content(self.buffer(), line).contains(text)
    }

    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// Styles from the default light palette
pub fn test_styles() -> ProfileStyles {
    ProfileStyles::new(theme::resolve(theme::DEFAULT_THEME).palette(false), false)
}

/// Preview of `@ada` (owner `u1`) with `n` links titled `Link 0..n`
pub fn preview_state(n: usize) -> PreviewState {
    let settings = ProfileSettings {
        links: (0..n)
            .map(|i| Link::new(format!("Link {i}"), format!("https://example.com/{i}")))
            .collect(),
        ..Default::default()
    };
    PreviewState::new(Profile::new("p1", "u1", "ada"), settings, &Settings::default())
}

/// Sign the profile owner in
pub fn sign_in_owner(state: &mut PreviewState) {
    let user = User::new(state.profile.user_id.clone());
    let session = Session::new(user.clone(), "test-token", Utc::now() + Duration::hours(1));
    state.auth = AuthState::authenticated(session, user);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_sizes() {
        assert_eq!(TestTerminal::new().area(), Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
        assert_eq!(
            TestTerminal::compact().area(),
            Rect::new(0, 0, COMPACT_WIDTH, COMPACT_HEIGHT)
        );
    }

    #[test]
    fn test_buffer_contains() {
        let mut term = TestTerminal::new();
        term.render_widget(Paragraph::new("Hello"), term.area());
        assert!(term.buffer_contains("Hello"));
        assert!(term.line_contains(0, "Hello"));
        assert!(!term.line_contains(1, "Hello"));
        assert_eq!(term.content().lines().count(), TEST_HEIGHT as usize);
    }

    #[test]
    fn test_owner_helper_makes_preview_editable() {
        let mut state = preview_state(1);
        sign_in_owner(&mut state);
        assert!(state.is_editable());
    }
}
