//! Service layer for linkbio
//!
//! The backend-as-a-service is consumed through three traits so the
//! workflows never depend on a concrete backend:
//!
//! ```text
//! ┌──────────────┐  ┌────────────┐  ┌───────────┐
//! │ AuthMachine  │  │ LinkEditor │  │  media /  │
//! │              │  │ appearance │  │   page    │
//! └──────┬───────┘  └─────┬──────┘  └─────┬─────┘
//!        │                │               │
//! ┌──────▼───────┐ ┌──────▼────────┐ ┌────▼────────┐
//! │ AuthProvider │ │ SettingsStore │ │ ObjectStore │
//! └──────────────┘ └───────────────┘ └─────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`AuthProvider`]: session lookup, sign-out, auth event stream
//! - [`SettingsStore`]: profile and profile settings records
//! - [`ObjectStore`]: uploaded profile media
//! - [`MemoryAuth`], [`MemorySettingsStore`], [`MemoryObjectStore`]: in-process
//!   implementations with failure injection
//! - [`FileSettingsStore`]: one JSON document per profile on disk

mod file_store;
mod memory;

use linkbio_core::prelude::*;
use linkbio_core::{AppearanceUpdate, AuthEvent, Link, MediaKind, Profile, ProfileSettings};
use linkbio_core::{Session, User};
use tokio::sync::broadcast;

pub use file_store::{FileSettingsStore, ProfileDocument, LOCAL_OWNER_ID};
pub use memory::{MemoryAuth, MemoryObjectStore, MemorySettingsStore};

/// Capacity of auth event channels
pub const AUTH_EVENT_CAPACITY: usize = 256;

/// Authentication backend
#[trait_variant::make(AuthProvider: Send)]
pub trait LocalAuthProvider {
    /// The session currently held by the backend, if any
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Identity behind the current session, validated server-side
    async fn current_user(&self) -> Result<Option<User>>;

    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to auth state changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Profile and profile settings records
#[trait_variant::make(SettingsStore: Send)]
pub trait LocalSettingsStore {
    async fn fetch_settings(&self, profile_id: &str) -> Result<ProfileSettings>;

    /// Replace the whole link list in one write
    async fn replace_links(&self, profile_id: &str, links: &[Link]) -> Result<()>;

    async fn update_appearance(&self, profile_id: &str, update: &AppearanceUpdate) -> Result<()>;

    /// `Ok(None)` when no profile has this username
    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>>;

    async fn update_profile_media(&self, profile_id: &str, kind: MediaKind, url: &str)
        -> Result<()>;
}

/// Object storage for uploaded media
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Store `bytes` at `path`, returning the stored path
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Public URL for a stored path
    fn public_url(&self, path: &str) -> String;

    async fn remove(&self, paths: &[String]) -> Result<()>;
}
