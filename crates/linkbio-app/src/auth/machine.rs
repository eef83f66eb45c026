//! The single writer of [`AuthState`].
//!
//! `mount` subscribes to the backend's event stream first and then resolves
//! the initial session, so events raised while the first lookup is in flight
//! are buffered and applied in order once it completes. After `unmount`
//! nothing more is published, including lookups that finish late.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use linkbio_core::prelude::*;
use linkbio_core::{AuthEvent, AuthEventKind};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::{AuthHandle, AuthState, LogoutFlag};
use crate::services::AuthProvider;

pub struct AuthMachine<A> {
    auth: Arc<A>,
    state_tx: Arc<watch::Sender<AuthState>>,
    logout: LogoutFlag,
    mounted: Arc<AtomicBool>,
    listener: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<A> Clone for AuthMachine<A> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            state_tx: Arc::clone(&self.state_tx),
            logout: self.logout.clone(),
            mounted: Arc::clone(&self.mounted),
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<A> AuthMachine<A>
where
    A: AuthProvider + Sync + 'static,
{
    pub fn new(auth: Arc<A>, logout: LogoutFlag) -> Self {
        let (state_tx, _) = watch::channel(AuthState::resolving());
        Self {
            auth,
            state_tx: Arc::new(state_tx),
            logout,
            mounted: Arc::new(AtomicBool::new(false)),
            listener: Arc::new(Mutex::new(None)),
        }
    }

    /// A read handle for consumers
    pub fn handle(&self) -> AuthHandle {
        AuthHandle::new(self.state_tx.subscribe())
    }

    pub fn state(&self) -> AuthState {
        self.state_tx.borrow().clone()
    }

    pub fn logout_flag(&self) -> &LogoutFlag {
        &self.logout
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Resolve the initial session and follow auth events until unmounted
    pub fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            warn!("Auth state machine already mounted");
            return;
        }

        let events = self.auth.subscribe();
        let this = self.clone();
        let task = tokio::spawn(async move {
            let initial = this.initial_state().await;
            this.publish(initial);
            this.listen(events).await;
        });

        let mut listener = self.listener.lock().unwrap_or_else(PoisonError::into_inner);
        *listener = Some(task);
    }

    /// Stop following auth events and discard any in-flight resolution
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        let task = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
        debug!("Auth state machine unmounted");
    }

    /// Sign out through the backend.
    ///
    /// The logout flag is raised before the request and dropped again if the
    /// request fails; on success the local session is cleared.
    pub async fn sign_out(&self) -> Result<()> {
        self.logout.set();
        match self.auth.sign_out().await {
            Ok(()) => {
                info!("Signed out");
                self.publish(AuthState::unauthenticated());
                Ok(())
            }
            Err(e) => {
                self.logout.clear();
                error!("Sign-out failed: {}", e);
                Err(e)
            }
        }
    }

    async fn initial_state(&self) -> AuthState {
        if self.logout.take() {
            info!("Explicit logout pending, signing out before resolving session");
            self.force_sign_out().await;
            return AuthState::unauthenticated();
        }
        self.resolve_current().await
    }

    /// Query the backend for the current session and validate its identity
    async fn resolve_current(&self) -> AuthState {
        let session = match self.auth.current_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return AuthState::unauthenticated(),
            Err(e) => {
                warn!("Session lookup failed: {}", e);
                self.force_sign_out().await;
                return AuthState::unauthenticated();
            }
        };

        match self.auth.current_user().await {
            Ok(Some(user)) if user.id == session.user.id => {
                debug!("Session resolved for user {}", user.id);
                AuthState::authenticated(session, user)
            }
            Ok(_) => {
                warn!("Session identity could not be validated, signing out");
                self.force_sign_out().await;
                AuthState::unauthenticated()
            }
            Err(e) => {
                warn!("Identity validation failed: {}", e);
                self.force_sign_out().await;
                AuthState::unauthenticated()
            }
        }
    }

    async fn force_sign_out(&self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Forced sign-out failed: {}", e);
        }
    }

    async fn listen(&self, mut events: broadcast::Receiver<AuthEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => self.apply(&event),
                Err(RecvError::Lagged(skipped)) if self.logout.is_set() => {
                    warn!("Missed {} auth events during logout", skipped);
                    self.publish(AuthState::unauthenticated());
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} auth events, re-resolving session", skipped);
                    let state = self.resolve_current().await;
                    self.publish(state);
                }
                Err(RecvError::Closed) => {
                    debug!("Auth event stream closed");
                    break;
                }
            }
        }
    }

    fn apply(&self, event: &AuthEvent) {
        debug!("Auth event {}", event.kind);
        let signed_in = event.kind == AuthEventKind::SignedIn;
        match event.active_session() {
            // Only a fresh sign-in outranks a pending logout
            Some(_) if !signed_in && self.logout.is_set() => {
                debug!("Ignoring {} session while logout is pending", event.kind);
                self.publish(AuthState::unauthenticated());
            }
            Some(session) => {
                if signed_in {
                    self.logout.clear();
                }
                self.publish(AuthState::authenticated(
                    session.clone(),
                    session.user.clone(),
                ));
            }
            None => self.publish(AuthState::unauthenticated()),
        }
    }

    fn publish(&self, state: AuthState) {
        if !self.is_mounted() {
            debug!("Discarding auth state change after unmount");
            return;
        }
        self.state_tx.send_replace(state);
    }
}
