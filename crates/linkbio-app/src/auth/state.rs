//! Observable auth state and its read handle

use linkbio_core::{Session, User};
use tokio::sync::watch;

/// Snapshot observed by every reader of the auth state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub user: Option<User>,
    /// `true` until the first resolution completes; never set again afterwards
    pub loading: bool,
}

/// Coarse phase derived from an [`AuthState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Resolving,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    /// Initial state before anything has been resolved
    pub fn resolving() -> Self {
        Self {
            session: None,
            user: None,
            loading: true,
        }
    }

    pub fn authenticated(session: Session, user: User) -> Self {
        Self {
            session: Some(session),
            user: Some(user),
            loading: false,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            session: None,
            user: None,
            loading: false,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        match (self.loading, &self.session) {
            (true, _) => AuthPhase::Resolving,
            (false, Some(_)) => AuthPhase::Authenticated,
            (false, None) => AuthPhase::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == AuthPhase::Authenticated
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::resolving()
    }
}

/// Read-only view of the auth state, cheap to clone and hand to consumers
#[derive(Debug, Clone)]
pub struct AuthHandle {
    rx: watch::Receiver<AuthState>,
}

impl AuthHandle {
    pub(super) fn new(rx: watch::Receiver<AuthState>) -> Self {
        Self { rx }
    }

    /// Current snapshot
    pub fn state(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change and return it.
    ///
    /// Returns `None` once the state machine is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the first resolution has completed
    pub async fn resolved(&mut self) -> Option<AuthState> {
        self.rx
            .wait_for(|state| !state.loading)
            .await
            .ok()
            .map(|state| state.clone())
    }
}
