//! Abstract input key event, independent of terminal library.
//!
//! Converted from crossterm key events at the TUI boundary so the preview
//! state machine never depends on terminal-specific types.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}
