//! Terminal colors for the preview.
//!
//! - `palette` — fixed colors for the preview chrome (status bar, guard screens)
//! - `styles` — styles derived from the profile's theme palette

pub mod palette;
pub mod styles;
