//! linkbio - link-in-bio profile pages from the terminal
//!
//! The binary is a thin clap front end over [`commands`]; the interactive
//! preview lives in `linkbio-tui` and everything else in `linkbio-app` and
//! `linkbio-core`.

pub mod commands;
pub mod headless;

pub use commands::{
    add_link, init_project, list_links, remove_link, render_document, render_page, NewLink,
    RenderRequest,
};
pub use headless::HeadlessEvent;
