//! Handler module - TEA update function and key handling
//!
//! - `update`: main update() function and message dispatch
//! - `keys`: key bindings for each guard screen

pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use linkbio_core::{AppearanceUpdate, Link, ProfileSettings};

use crate::message::Message;

pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Re-read the profile document
    ReloadSettings,

    /// Persist the full link list in one replace
    SaveLinks { profile_id: String, links: Vec<Link> },

    /// Persist an appearance change; `settings` is the copy it applies to
    SaveAppearance {
        profile_id: String,
        settings: Box<ProfileSettings>,
        update: Box<AppearanceUpdate>,
    },

    /// Sign the local owner in (local backend only)
    SignIn,

    /// Sign out through the auth state machine
    SignOut,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
