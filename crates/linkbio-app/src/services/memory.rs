//! In-process service implementations.
//!
//! Used by the local preview and by tests. Each store can be switched into a
//! failing mode to exercise error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use linkbio_core::prelude::*;
use linkbio_core::{
    AppearanceUpdate, AuthEvent, Link, MediaKind, Profile, ProfileSettings, Session, User,
};
use tokio::sync::{broadcast, RwLock};

use super::{AuthProvider, ObjectStore, SettingsStore, AUTH_EVENT_CAPACITY};

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Auth backend holding at most one session
pub struct MemoryAuth {
    session: RwLock<Option<Session>>,
    event_tx: broadcast::Sender<AuthEvent>,
    fail_session: AtomicBool,
    fail_sign_out: AtomicBool,
    reject_identity: AtomicBool,
    sign_out_calls: AtomicUsize,
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            session: RwLock::new(None),
            event_tx,
            fail_session: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            reject_identity: AtomicBool::new(false),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Start with a cached session (no event is emitted)
    pub fn with_session(mut self, session: Session) -> Self {
        *self.session.get_mut() = Some(session);
        self
    }

    /// Store a session and announce `SIGNED_IN`
    pub async fn sign_in(&self, session: Session) {
        self.emit(AuthEvent::signed_in(session)).await;
    }

    /// Apply an event to the held session and broadcast it
    pub async fn emit(&self, event: AuthEvent) {
        *self.session.write().await = event.active_session().cloned();
        debug!("MemoryAuth emitting {}", event.kind);
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    /// Make `current_session` fail
    pub fn set_fail_session(&self, fail: bool) {
        self.fail_session.store(fail, Ordering::SeqCst);
    }

    /// Make `sign_out` fail
    pub fn set_fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Make `current_user` report no identity even with a session held
    pub fn set_reject_identity(&self, reject: bool) {
        self.reject_identity.store(reject, Ordering::SeqCst);
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for MemoryAuth {
    async fn current_session(&self) -> Result<Option<Session>> {
        if self.fail_session.load(Ordering::SeqCst) {
            return Err(Error::auth("session lookup failed"));
        }
        Ok(self.session.read().await.clone())
    }

    async fn current_user(&self) -> Result<Option<User>> {
        if self.reject_identity.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.session.read().await.as_ref().map(|s| s.user.clone()))
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(Error::auth("sign-out rejected"));
        }
        self.emit(AuthEvent::signed_out()).await;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.event_tx.subscribe()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Profiles and settings records keyed by profile id
#[derive(Default)]
pub struct MemorySettingsStore {
    records: RwLock<HashMap<String, ProfileSettings>>,
    profiles: RwLock<Vec<Profile>>,
    link_writes: RwLock<Vec<Vec<Link>>>,
    failing: AtomicBool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile, settings: ProfileSettings) -> Self {
        self.records
            .get_mut()
            .insert(profile.id.clone(), settings);
        self.profiles.get_mut().push(profile);
        self
    }

    /// Make every call fail with a storage error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn settings(&self, profile_id: &str) -> Option<ProfileSettings> {
        self.records.read().await.get(profile_id).cloned()
    }

    pub async fn profile(&self, profile_id: &str) -> Option<Profile> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == profile_id)
            .cloned()
    }

    /// Every link list written through `replace_links`, oldest first
    pub async fn link_writes(&self) -> Vec<Vec<Link>> {
        self.link_writes.read().await.clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(Error::storage("backend unavailable"))
        } else {
            Ok(())
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn fetch_settings(&self, profile_id: &str) -> Result<ProfileSettings> {
        self.check()?;
        self.records
            .read()
            .await
            .get(profile_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Profile settings"))
    }

    async fn replace_links(&self, profile_id: &str, links: &[Link]) -> Result<()> {
        self.check()?;
        self.records
            .write()
            .await
            .entry(profile_id.to_string())
            .or_default()
            .links = links.to_vec();
        self.link_writes.write().await.push(links.to_vec());
        Ok(())
    }

    async fn update_appearance(&self, profile_id: &str, update: &AppearanceUpdate) -> Result<()> {
        self.check()?;
        self.records
            .write()
            .await
            .entry(profile_id.to_string())
            .or_default()
            .apply(update);
        Ok(())
    }

    async fn profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        self.check()?;
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn update_profile_media(
        &self,
        profile_id: &str,
        kind: MediaKind,
        url: &str,
    ) -> Result<()> {
        self.check()?;
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| Error::not_found("Profile"))?;
        match kind {
            MediaKind::Avatar => profile.avatar_url = Some(url.to_string()),
            MediaKind::Favicon => profile.favicon_url = Some(url.to_string()),
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Objects
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Object store keeping uploads in memory
pub struct MemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    fail_upload: AtomicBool,
    fail_remove: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
            fail_upload: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
        }
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    pub async fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|o| o.content_type.clone())
    }

    pub async fn size(&self, path: &str) -> Option<usize> {
        self.objects.read().await.get(path).map(|o| o.bytes.len())
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(Error::upload("object store rejected the upload"));
        }
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Error::storage("object removal failed"));
        }
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }
}
