//! linkbio-app - Auth, editing workflows and preview state for linkbio
//!
//! This crate owns the auth state machine and the route guard that reads it,
//! the link editing and appearance workflows, the storage service traits with
//! their file-backed and in-memory implementations, and the TEA (The Elm
//! Architecture) state that drives the terminal preview.

pub mod actions;
pub mod appearance;
pub mod auth;
pub mod config;
pub mod editor;
pub mod guard;
pub mod handler;
pub mod input_key;
pub mod media;
pub mod message;
pub mod page;
pub mod services;
pub mod state;
pub mod watcher;

// Re-export primary types
pub use actions::{handle_action, ActionContext};
pub use auth::{AuthHandle, AuthMachine, AuthPhase, AuthState, LogoutFlag};
pub use editor::LinkEditor;
pub use guard::{GuardDecision, GuardWatch, Location, RouteGuard};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use page::{load_public_page, PageOutcome, PublicPage};
pub use state::PreviewState;
pub use watcher::{SettingsWatcher, WatcherConfig};
