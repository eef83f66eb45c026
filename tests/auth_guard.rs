//! Auth state machine and route guard working together

use std::sync::Arc;

use chrono::{Duration, Utc};
use linkbio_app::config::AuthSettings;
use linkbio_app::services::MemoryAuth;
use linkbio_app::{AuthMachine, AuthPhase, GuardDecision, Location, LogoutFlag, RouteGuard};
use linkbio_core::{AuthEvent, Session, User};
use tempfile::TempDir;

fn session(user: &str) -> Session {
    Session::new(User::new(user), "token", Utc::now() + Duration::hours(1))
}

fn guard() -> RouteGuard {
    RouteGuard::from_settings(&AuthSettings::default())
}

#[tokio::test]
async fn test_guard_follows_session_lifecycle() {
    let auth = Arc::new(MemoryAuth::new().with_session(session("u1")));
    let machine = AuthMachine::new(Arc::clone(&auth), LogoutFlag::in_memory());
    let mut watch = guard().watch(machine.handle(), Location::new("/dashboard/links"));

    machine.mount();
    // Nothing has run yet on the current-thread runtime
    assert_eq!(watch.current(), GuardDecision::Pending);

    assert_eq!(watch.next().await, Some(GuardDecision::Allow));

    auth.emit(AuthEvent::signed_out()).await;
    let decision = watch.next().await.unwrap();
    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/login".into(),
            from: Location::new("/dashboard/links"),
        }
    );
    assert_eq!(
        decision.redirect_url().unwrap(),
        "/login?redirect=%2Fdashboard%2Flinks"
    );

    auth.sign_in(session("u1")).await;
    assert_eq!(watch.next().await, Some(GuardDecision::Allow));

    machine.unmount();
}

#[tokio::test]
async fn test_public_route_never_waits() {
    let auth = Arc::new(MemoryAuth::new());
    let machine = AuthMachine::new(auth, LogoutFlag::in_memory());
    let watch = guard().watch(machine.handle(), Location::new("/ada"));

    assert_eq!(watch.current(), GuardDecision::Allow);
}

#[tokio::test]
async fn test_failed_session_lookup_redirects() {
    let auth = Arc::new(MemoryAuth::new().with_session(session("u1")));
    auth.set_fail_session(true);
    let machine = AuthMachine::new(Arc::clone(&auth), LogoutFlag::in_memory());
    let mut handle = machine.handle();
    machine.mount();

    let state = handle.resolved().await.unwrap();
    assert_eq!(state.phase(), AuthPhase::Unauthenticated);
    assert!(matches!(
        guard().evaluate(&state, &Location::new("/settings")),
        GuardDecision::Redirect { .. }
    ));
    // The unusable session is cleared on the backend too
    assert_eq!(auth.sign_out_calls(), 1);
    machine.unmount();
}

#[tokio::test]
async fn test_explicit_logout_survives_restart() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("logout");

    let first = Arc::new(MemoryAuth::new().with_session(session("u1")));
    let machine = AuthMachine::new(Arc::clone(&first), LogoutFlag::persisted(&marker));
    let mut handle = machine.handle();
    machine.mount();
    assert!(handle.resolved().await.unwrap().is_authenticated());

    machine.sign_out().await.unwrap();
    machine.unmount();
    assert!(marker.exists());

    // A stale cached session is waiting on the next start
    let second = Arc::new(MemoryAuth::new().with_session(session("u1")));
    let machine = AuthMachine::new(Arc::clone(&second), LogoutFlag::persisted(&marker));
    let mut handle = machine.handle();
    machine.mount();

    let state = handle.resolved().await.unwrap();
    assert_eq!(state.phase(), AuthPhase::Unauthenticated);
    assert_eq!(second.sign_out_calls(), 1);
    assert!(!marker.exists());
    machine.unmount();
}

#[tokio::test]
async fn test_failed_sign_out_keeps_session() {
    let auth = Arc::new(MemoryAuth::new().with_session(session("u1")));
    let machine = AuthMachine::new(Arc::clone(&auth), LogoutFlag::in_memory());
    let mut handle = machine.handle();
    machine.mount();
    handle.resolved().await.unwrap();

    auth.set_fail_sign_out(true);
    assert!(machine.sign_out().await.is_err());

    assert!(!machine.logout_flag().is_set());
    assert!(machine.state().is_authenticated());
    assert_eq!(
        guard().evaluate(&machine.state(), &Location::new("/dashboard")),
        GuardDecision::Allow
    );
    machine.unmount();
}
