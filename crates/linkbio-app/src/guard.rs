//! Route guard over the auth state.
//!
//! While the auth state is still resolving, protected routes are held in
//! [`GuardDecision::Pending`] and no navigation happens. Once resolved,
//! authenticated visitors are let through and everyone else is redirected to
//! the sign-in entry point with the original location attached. The decision
//! is re-evaluated on every auth state change via [`GuardWatch`].

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::auth::{AuthHandle, AuthPhase, AuthState};
use crate::config::AuthSettings;

/// A navigable location within the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self { path }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Outcome of checking a location against the auth state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Auth still resolving: show a pending indicator, do not navigate
    Pending,
    /// Render the requested content
    Allow,
    /// Navigate to `to`, remembering where the visitor was headed
    Redirect { to: String, from: Location },
}

impl GuardDecision {
    /// Sign-in URL carrying the original target as a `redirect` query value
    pub fn redirect_url(&self) -> Option<String> {
        match self {
            GuardDecision::Redirect { to, from } => Some(format!(
                "{to}?redirect={}",
                utf8_percent_encode(&from.path, NON_ALPHANUMERIC)
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    sign_in_path: String,
    protected: Vec<String>,
}

impl RouteGuard {
    pub fn new(sign_in_path: impl Into<String>, protected: Vec<String>) -> Self {
        Self {
            sign_in_path: sign_in_path.into(),
            protected,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.sign_in_path.clone(),
            settings.protected_paths.clone(),
        )
    }

    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    /// Prefix match on whole path segments (`/dashboard` covers
    /// `/dashboard/links` but not `/dashboards`)
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn evaluate(&self, state: &AuthState, location: &Location) -> GuardDecision {
        if !self.is_protected(&location.path) {
            return GuardDecision::Allow;
        }
        match state.phase() {
            AuthPhase::Resolving => GuardDecision::Pending,
            AuthPhase::Authenticated => GuardDecision::Allow,
            AuthPhase::Unauthenticated => GuardDecision::Redirect {
                to: self.sign_in_path.clone(),
                from: location.clone(),
            },
        }
    }

    /// Follow the auth state for one location
    pub fn watch(&self, handle: AuthHandle, location: Location) -> GuardWatch {
        GuardWatch {
            guard: self.clone(),
            handle,
            location,
        }
    }
}

/// A guard bound to one location, re-evaluated on every auth change
#[derive(Debug)]
pub struct GuardWatch {
    guard: RouteGuard,
    handle: AuthHandle,
    location: Location,
}

impl GuardWatch {
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current(&self) -> GuardDecision {
        self.guard.evaluate(&self.handle.state(), &self.location)
    }

    /// Wait for the next auth change and return the fresh decision.
    ///
    /// Returns `None` once the auth state machine is gone.
    pub async fn next(&mut self) -> Option<GuardDecision> {
        let state = self.handle.changed().await?;
        Some(self.guard.evaluate(&state, &self.location))
    }
}
