//! Preview runner - entry point and event loop
//!
//! - `run_preview`: open a profile document and preview it until quit
//! - `run_loop`: drain background messages, draw, poll the terminal

use std::path::Path;
use std::sync::Arc;

use linkbio_app::config::{Settings, LINKBIO_DIR};
use linkbio_app::services::{FileSettingsStore, MemoryAuth, SettingsStore};
use linkbio_app::state::PreviewState;
use linkbio_app::handler::update;
use linkbio_app::{
    handle_action, ActionContext, AuthHandle, AuthMachine, LogoutFlag, Message, SettingsWatcher,
    WatcherConfig,
};
use linkbio_core::prelude::*;
use linkbio_core::User;
use tokio::sync::mpsc;

use crate::terminal::TerminalGuard;
use crate::{event, render};

/// Capacity of the background message channel
const MESSAGE_CAPACITY: usize = 256;

/// Marker file recording an explicit sign-out across restarts
const LOGOUT_MARKER: &str = "logout";

/// Preview the profile document at `document`.
///
/// The preview starts signed out; the owner signs in from the redirect
/// screen. Edits are written back to the document, and changes made to it
/// by other programs are picked up by the watcher.
pub async fn run_preview(document: &Path, project_path: &Path, settings: Settings) -> Result<()> {
    let (store, profile_id) = FileSettingsStore::for_document(document)?;
    let loaded = store.read_document(&profile_id)?;
    let profile = loaded.profile_or_local(&profile_id);
    info!(
        "Previewing {} ({} links, layout {})",
        profile.username,
        loaded.settings.links.len(),
        loaded.settings.layout_type
    );

    let mut state = PreviewState::new(profile.clone(), loaded.settings, &settings);

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CAPACITY);

    // Auth: a local backend with no cached session
    let auth = Arc::new(MemoryAuth::new());
    let marker = project_path.join(LINKBIO_DIR).join(LOGOUT_MARKER);
    let machine = AuthMachine::new(Arc::clone(&auth), LogoutFlag::persisted(marker));
    spawn_auth_forwarder(machine.handle(), msg_tx.clone());
    machine.mount();

    let mut watcher = SettingsWatcher::new(document, WatcherConfig::from_settings(&settings.watcher));
    if let Err(e) = watcher.start(msg_tx.clone()) {
        warn!("Failed to start settings watcher: {}", e);
    }

    let ctx = ActionContext {
        store: Arc::new(store),
        profile_id,
        auth,
        machine: machine.clone(),
        owner: User::new(profile.user_id),
    };

    let mut guard = TerminalGuard::enter();
    let result = run_loop(guard.terminal(), &mut state, msg_rx, &msg_tx, &ctx);

    watcher.stop();
    machine.unmount();
    drop(guard);

    result
}

/// Forward every published auth state into the message channel
fn spawn_auth_forwarder(mut handle: AuthHandle, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        while let Some(state) = handle.changed().await {
            if msg_tx.send(Message::AuthChanged(state)).await.is_err() {
                break;
            }
        }
        debug!("Auth forwarder stopped");
    });
}

/// Main event loop
fn run_loop<S>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut PreviewState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &ActionContext<S>,
) -> Result<()>
where
    S: SettingsStore + Send + Sync + 'static,
{
    let size = terminal.size()?;
    process_message(
        state,
        Message::Resize {
            width: size.width,
            height: size.height,
        },
        msg_tx,
        ctx,
    );

    while !state.should_quit() {
        // Results of background work and auth changes
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, msg_tx, ctx);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, msg_tx, ctx);
        }
    }

    Ok(())
}

/// Run a message and its follow-ups through `update`, dispatching actions
pub fn process_message<S>(
    state: &mut PreviewState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &ActionContext<S>,
) where
    S: SettingsStore + Send + Sync + 'static,
{
    let mut next = Some(message);
    while let Some(msg) = next {
        let result = update(state, msg);
        if let Some(action) = result.action {
            handle_action(action, ctx, msg_tx.clone());
        }
        next = result.message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::preview_state;
    use linkbio_app::services::MemorySettingsStore;
    use linkbio_app::{AuthState, GuardDecision, InputKey};
    use linkbio_core::{Profile, ProfileSettings};

    fn context() -> (ActionContext<MemorySettingsStore>, Arc<MemoryAuth>) {
        let store = MemorySettingsStore::new().with_profile(
            Profile::new("p1", "u1", "ada"),
            ProfileSettings::default(),
        );
        let auth = Arc::new(MemoryAuth::new());
        let machine = AuthMachine::new(Arc::clone(&auth), LogoutFlag::in_memory());
        let ctx = ActionContext {
            store: Arc::new(store),
            profile_id: "p1".into(),
            auth: Arc::clone(&auth),
            machine,
            owner: User::new("u1"),
        };
        (ctx, auth)
    }

    #[tokio::test]
    async fn test_sign_in_flow_reaches_owner_view() {
        let (ctx, _auth) = context();
        let (msg_tx, mut msg_rx) = mpsc::channel(16);
        spawn_auth_forwarder(ctx.machine.handle(), msg_tx.clone());
        ctx.machine.mount();

        let mut state = preview_state(2);
        let resolved = msg_rx.recv().await.unwrap();
        process_message(&mut state, resolved, &msg_tx, &ctx);
        assert!(matches!(state.decision(), GuardDecision::Redirect { .. }));

        process_message(&mut state, Message::Key(InputKey::Char('i')), &msg_tx, &ctx);
        let signed_in = msg_rx.recv().await.unwrap();
        process_message(&mut state, signed_in, &msg_tx, &ctx);

        assert_eq!(state.decision(), GuardDecision::Allow);
        assert!(state.is_editable());
        ctx.machine.unmount();
    }

    #[tokio::test]
    async fn test_delete_is_persisted_through_actions() {
        let (ctx, _auth) = context();
        let (msg_tx, mut msg_rx) = mpsc::channel(16);

        let mut state = preview_state(3);
        let user = User::new("u1");
        let session = linkbio_core::Session::new(
            user.clone(),
            "t",
            chrono::Utc::now() + chrono::Duration::hours(1),
        );
        state.auth = AuthState::authenticated(session, user);
        state.selected = Some(0);

        process_message(&mut state, Message::DeleteSelected, &msg_tx, &ctx);
        let saved = msg_rx.recv().await.unwrap();
        process_message(&mut state, saved, &msg_tx, &ctx);

        assert!(!state.editor.is_dirty());
        let stored = ctx.store.settings("p1").await.unwrap();
        assert_eq!(stored.links.len(), 2);
        assert_eq!(stored.links, state.links());
    }
}
