//! linkbio-tui - Terminal preview for linkbio profiles
//!
//! This crate draws a profile page with ratatui: the profile header, the
//! link list in the stored layout, and the guard screens shown while the
//! session resolves or after sign-out. The event loop in [`runner`] wires
//! the TEA state from linkbio-app to the terminal.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run_preview;
