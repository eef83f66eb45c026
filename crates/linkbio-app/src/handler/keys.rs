//! Key bindings

use crate::guard::GuardDecision;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::PreviewState;

pub fn handle_key(state: &PreviewState, key: InputKey) -> Option<Message> {
    // Quit works everywhere
    if matches!(key, InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c')) {
        return Some(Message::Quit);
    }

    match state.decision() {
        GuardDecision::Pending => None,
        GuardDecision::Redirect { .. } => handle_key_signed_out(key),
        GuardDecision::Allow => handle_key_profile(state, key),
    }
}

fn handle_key_signed_out(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('i') | InputKey::Enter => Some(Message::RequestSignIn),
        _ => None,
    }
}

fn handle_key_profile(state: &PreviewState, key: InputKey) -> Option<Message> {
    let general = match key {
        InputKey::Char('r') => Some(Message::SettingsFileChanged),
        InputKey::Char('o') => Some(Message::RequestSignOut),
        InputKey::Char('j') | InputKey::Down | InputKey::Tab => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up | InputKey::BackTab => Some(Message::SelectPrevious),
        _ => None,
    };
    if general.is_some() || !state.is_editable() {
        return general;
    }

    match key {
        InputKey::Char('l') => Some(Message::CycleLayout),
        InputKey::Char('t') => Some(Message::ToggleDarkMode),
        InputKey::Char('s') => Some(Message::ToggleTextShadow),
        InputKey::Char('d') => Some(Message::CycleSelectedDisplay),
        InputKey::Char('x') | InputKey::Delete => Some(Message::DeleteSelected),
        _ => None,
    }
}
