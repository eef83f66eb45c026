use chrono::{Duration, Utc};
use linkbio_core::{AppearanceUpdate, LayoutType, Link, LinkDisplay, Profile, ProfileSettings};
use linkbio_core::{Session, User};

use super::*;
use crate::auth::AuthState;
use crate::config::Settings;
use crate::guard::GuardDecision;
use crate::input_key::InputKey;
use crate::state::{PreviewState, StatusKind};

fn links() -> Vec<Link> {
    vec![
        Link::new("One", "https://one").with_id("1"),
        Link::new("Two", "https://two").with_id("2"),
        Link::new("Three", "https://three").with_id("3"),
    ]
}

fn owner() -> AuthState {
    let user = User::new("u1");
    let session = Session::new(user.clone(), "t", Utc::now() + Duration::hours(1));
    AuthState::authenticated(session, user)
}

fn state() -> PreviewState {
    let settings = ProfileSettings {
        links: links(),
        ..Default::default()
    };
    PreviewState::new(Profile::new("p1", "u1", "ada"), settings, &Settings::default())
}

fn signed_in_state() -> PreviewState {
    let mut state = state();
    update(&mut state, Message::AuthChanged(owner()));
    state
}

/// Run a message and any follow-up messages, returning the last action
fn process(state: &mut PreviewState, message: Message) -> Option<UpdateAction> {
    let mut next = Some(message);
    let mut action = None;
    while let Some(msg) = next {
        let result = update(state, msg);
        next = result.message;
        if result.action.is_some() {
            action = result.action;
        }
    }
    action
}

#[test]
fn test_quit_from_any_screen() {
    let mut state = state();
    process(&mut state, Message::Key(InputKey::Char('q')));
    assert!(state.should_quit());
}

#[test]
fn test_keys_ignored_while_pending() {
    let mut state = state();
    assert_eq!(state.decision(), GuardDecision::Pending);
    assert!(process(&mut state, Message::Key(InputKey::Char('x'))).is_none());
    assert!(process(&mut state, Message::Key(InputKey::Char('i'))).is_none());
    assert_eq!(state.links().len(), 3);
}

#[test]
fn test_sign_out_event_redirects_with_origin() {
    let mut state = signed_in_state();
    assert_eq!(state.decision(), GuardDecision::Allow);

    process(&mut state, Message::AuthChanged(AuthState::unauthenticated()));

    assert_eq!(
        state.decision(),
        GuardDecision::Redirect {
            to: "/login".into(),
            from: crate::guard::Location::new("/dashboard"),
        }
    );
    let status = state.status.unwrap();
    assert!(status.text.contains("/login"));
    assert!(status.text.contains("/dashboard"));
}

#[test]
fn test_sign_in_key_on_redirect_screen() {
    let mut state = state();
    update(&mut state, Message::AuthChanged(AuthState::unauthenticated()));
    let action = process(&mut state, Message::Key(InputKey::Char('i')));
    assert_eq!(action, Some(UpdateAction::SignIn));
}

#[test]
fn test_sign_out_key_when_signed_in() {
    let mut state = signed_in_state();
    let action = process(&mut state, Message::Key(InputKey::Char('o')));
    assert_eq!(action, Some(UpdateAction::SignOut));
}

#[test]
fn test_delete_selected_saves_remaining_links() {
    let mut state = signed_in_state();
    process(&mut state, Message::SelectNext);
    process(&mut state, Message::SelectNext);

    let action = process(&mut state, Message::Key(InputKey::Char('x')));

    match action {
        Some(UpdateAction::SaveLinks { profile_id, links }) => {
            assert_eq!(profile_id, "p1");
            let ids: Vec<_> = links.iter().map(|l| l.id.as_str()).collect();
            assert_eq!(ids, ["1", "3"]);
        }
        other => panic!("expected SaveLinks, got {other:?}"),
    }
    assert!(state.saving);
    assert!(state.editor.is_dirty());
    assert_eq!(state.selected, Some(1));
}

#[test]
fn test_delete_requires_owner() {
    let mut state = state();
    update(&mut state, Message::AuthChanged(AuthState::unauthenticated()));
    state.selected = Some(0);
    assert!(process(&mut state, Message::DeleteSelected).is_none());
    assert_eq!(state.links().len(), 3);
}

#[test]
fn test_links_saved_marks_editor_clean() {
    let mut state = signed_in_state();
    state.selected = Some(0);
    let Some(UpdateAction::SaveLinks { links, .. }) = process(&mut state, Message::DeleteSelected)
    else {
        panic!("expected SaveLinks");
    };

    process(&mut state, Message::LinksSaved { links });
    assert!(!state.saving);
    assert!(!state.editor.is_dirty());
    assert_eq!(state.settings.links.len(), 2);
}

#[test]
fn test_failed_save_keeps_local_edit() {
    let mut state = signed_in_state();
    state.selected = Some(0);
    process(&mut state, Message::DeleteSelected);

    process(
        &mut state,
        Message::LinksSaveFailed {
            message: "Could not save changes: offline".into(),
        },
    );
    assert_eq!(state.links().len(), 2);
    assert!(state.editor.is_dirty());
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
}

#[test]
fn test_cycle_display_updates_selected_link() {
    let mut state = signed_in_state();
    state.selected = Some(1);

    let action = process(&mut state, Message::Key(InputKey::Char('d')));

    assert!(matches!(action, Some(UpdateAction::SaveLinks { .. })));
    assert_eq!(state.links()[1].display, LinkDisplay::Icon);
    assert_eq!(state.links()[1].id.as_str(), "2");
    assert!(state.editor.editing_id().is_none());
}

#[test]
fn test_cycle_layout_waits_for_save() {
    let mut state = signed_in_state();

    let action = process(&mut state, Message::Key(InputKey::Char('l')));

    let Some(UpdateAction::SaveAppearance { update: change, .. }) = action else {
        panic!("expected SaveAppearance");
    };
    assert_eq!(change.layout_type, Some(LayoutType::Bento));
    assert_eq!(state.settings.layout_type, LayoutType::Links);

    process(&mut state, Message::AppearanceSaved(change));
    assert_eq!(state.settings.layout_type, LayoutType::Bento);
}

#[test]
fn test_appearance_failure_leaves_settings() {
    let mut state = signed_in_state();
    process(&mut state, Message::ToggleDarkMode);
    process(
        &mut state,
        Message::AppearanceSaveFailed {
            message: "nope".into(),
        },
    );
    assert!(!state.settings.is_dark_mode);
    assert!(!state.saving);
}

#[test]
fn test_reload_replaces_clean_links() {
    let mut state = signed_in_state();
    let reloaded = ProfileSettings {
        links: vec![Link::new("Only", "https://only")],
        layout_type: LayoutType::Mixed,
        ..Default::default()
    };

    process(&mut state, Message::SettingsLoaded(Box::new(reloaded)));
    assert_eq!(state.links().len(), 1);
    assert_eq!(state.settings.layout_type, LayoutType::Mixed);
}

#[test]
fn test_reload_keeps_dirty_links() {
    let mut state = signed_in_state();
    state.selected = Some(0);
    process(&mut state, Message::DeleteSelected);

    process(
        &mut state,
        Message::SettingsLoaded(Box::new(ProfileSettings::default())),
    );
    assert_eq!(state.links().len(), 2);
}

#[test]
fn test_appearance_update_type_is_partial() {
    let mut state = signed_in_state();
    let Some(UpdateAction::SaveAppearance { update: change, .. }) =
        process(&mut state, Message::ToggleTextShadow)
    else {
        panic!("expected SaveAppearance");
    };
    assert_eq!(
        *change,
        AppearanceUpdate {
            text_shadow: Some(true),
            ..Default::default()
        }
    );
}

#[test]
fn test_second_save_refused_while_first_in_flight() {
    let mut state = signed_in_state();
    state.selected = Some(0);
    let Some(UpdateAction::SaveLinks { links, .. }) = process(&mut state, Message::DeleteSelected)
    else {
        panic!("expected SaveLinks");
    };

    // Neither a layout change nor another delete may start a second write
    assert!(process(&mut state, Message::CycleLayout).is_none());
    assert!(process(&mut state, Message::DeleteSelected).is_none());
    assert_eq!(state.links().len(), 2);
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));

    process(&mut state, Message::LinksSaved { links });
    assert!(matches!(
        process(&mut state, Message::CycleLayout),
        Some(UpdateAction::SaveAppearance { .. })
    ));
}
