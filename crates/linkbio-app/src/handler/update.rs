//! Main update function - handles state transitions (TEA pattern)

use linkbio_core::{AppearanceUpdate, EditIntent};
use tracing::{debug, warn};

use crate::guard::GuardDecision;
use crate::message::Message;
use crate::state::{PreviewPhase, PreviewState, StatusMessage};

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut PreviewState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Resize { width, height } => {
            state.width = width;
            state.height = height;
            UpdateResult::none()
        }

        Message::Tick => {
            state.ticks = state.ticks.wrapping_add(1);
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = PreviewPhase::Quitting;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Auth
        // ─────────────────────────────────────────────────────────
        Message::AuthChanged(auth) => handle_auth_changed(state, auth),

        Message::RequestSignIn => {
            if state.auth.is_authenticated() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::SignIn)
        }

        Message::RequestSignOut => {
            if !state.auth.is_authenticated() {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::SignOut)
        }

        Message::SignOutFailed { message } => {
            state.set_status(StatusMessage::error(format!("Sign-out failed: {message}")));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Settings file
        // ─────────────────────────────────────────────────────────
        Message::SettingsFileChanged => UpdateResult::action(UpdateAction::ReloadSettings),

        Message::SettingsLoaded(settings) => {
            if state.editor.is_dirty() {
                warn!("Profile document changed while links have unsaved edits");
                state.set_status(StatusMessage::info(
                    "Profile file changed; keeping unsaved link edits",
                ));
            } else {
                state.editor.reset(settings.links.clone());
            }
            state.settings = *settings;
            state.clamp_selection();
            UpdateResult::none()
        }

        Message::SettingsLoadFailed { message } => {
            state.set_status(StatusMessage::error(format!("Reload failed: {message}")));
            UpdateResult::none()
        }

        Message::WatcherError { message } => {
            state.set_status(StatusMessage::error(format!("Watcher: {message}")));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Appearance
        // ─────────────────────────────────────────────────────────
        Message::CycleLayout => {
            let update = AppearanceUpdate {
                layout_type: Some(state.settings.layout_type.next()),
                ..Default::default()
            };
            save_appearance(state, update)
        }

        Message::ToggleDarkMode => {
            let update = AppearanceUpdate {
                is_dark_mode: Some(!state.settings.is_dark_mode),
                ..Default::default()
            };
            save_appearance(state, update)
        }

        Message::ToggleTextShadow => {
            let update = AppearanceUpdate {
                text_shadow: Some(!state.settings.text_shadow),
                ..Default::default()
            };
            save_appearance(state, update)
        }

        Message::AppearanceSaved(update) => {
            state.saving = false;
            state.settings.apply(&update);
            state.set_status(StatusMessage::info("Appearance saved"));
            UpdateResult::none()
        }

        Message::AppearanceSaveFailed { message } => {
            state.saving = false;
            state.set_status(StatusMessage::error(message));
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Links
        // ─────────────────────────────────────────────────────────
        Message::SelectNext => {
            state.select_next();
            UpdateResult::none()
        }

        Message::SelectPrevious => {
            state.select_previous();
            UpdateResult::none()
        }

        Message::CycleSelectedDisplay => handle_cycle_display(state),

        Message::DeleteSelected => handle_delete_selected(state),

        Message::LinksSaved { links } => {
            state.saving = false;
            state.editor.mark_saved(&links);
            state.settings.links = links;
            state.set_status(StatusMessage::info("Links saved"));
            UpdateResult::none()
        }

        Message::LinksSaveFailed { message } => {
            state.saving = false;
            state.set_status(StatusMessage::error(message));
            UpdateResult::none()
        }

        Message::DismissStatus => {
            state.status = None;
            UpdateResult::none()
        }
    }
}

fn handle_auth_changed(state: &mut PreviewState, auth: crate::auth::AuthState) -> UpdateResult {
    let before = state.decision();
    state.auth = auth;
    let after = state.decision();

    if before != after {
        debug!("Guard decision {:?} -> {:?}", before, after);
        match &after {
            GuardDecision::Redirect { to, from } => {
                state.set_status(StatusMessage::info(format!(
                    "Signed out: redirecting to {to} (from {from})"
                )));
            }
            GuardDecision::Allow if before != GuardDecision::Pending => {
                state.set_status(StatusMessage::info("Signed in"));
            }
            _ => {}
        }
    }

    if !state.is_editable() {
        state.editor.cancel_edit();
    }
    UpdateResult::none()
}

/// Saves run one at a time; a change requested mid-save is refused
/// before it touches local state.
fn save_in_flight(state: &mut PreviewState) -> bool {
    if state.saving {
        state.set_status(StatusMessage::info("Still saving; try again in a moment"));
    }
    state.saving
}

fn save_appearance(state: &mut PreviewState, update: AppearanceUpdate) -> UpdateResult {
    if !state.is_editable() || save_in_flight(state) {
        return UpdateResult::none();
    }
    state.saving = true;
    UpdateResult::action(UpdateAction::SaveAppearance {
        profile_id: state.profile.id.clone(),
        settings: Box::new(state.settings.clone()),
        update: Box::new(update),
    })
}

fn save_links(state: &mut PreviewState) -> UpdateResult {
    state.saving = true;
    UpdateResult::action(UpdateAction::SaveLinks {
        profile_id: state.editor.profile_id().to_string(),
        links: state.editor.links().to_vec(),
    })
}

fn handle_cycle_display(state: &mut PreviewState) -> UpdateResult {
    if !state.is_editable() || save_in_flight(state) {
        return UpdateResult::none();
    }
    let Some(id) = state.selected_link_id().cloned() else {
        return UpdateResult::none();
    };

    let result = state
        .editor
        .apply(&EditIntent::Edit(id))
        .and_then(|()| {
            let draft = state.editor.draft_mut();
            draft.display = draft.display.next();
            state.editor.submit_draft()
        });

    match result {
        Ok(_) => save_links(state),
        Err(e) => {
            state.editor.cancel_edit();
            state.set_status(StatusMessage::error(e.user_message()));
            UpdateResult::none()
        }
    }
}

fn handle_delete_selected(state: &mut PreviewState) -> UpdateResult {
    if !state.is_editable() || save_in_flight(state) {
        return UpdateResult::none();
    }
    let Some(id) = state.selected_link_id().cloned() else {
        return UpdateResult::none();
    };

    match state.editor.apply(&EditIntent::Delete(id)) {
        Ok(()) => {
            state.clamp_selection();
            save_links(state)
        }
        Err(e) => {
            state.set_status(StatusMessage::error(e.user_message()));
            UpdateResult::none()
        }
    }
}
