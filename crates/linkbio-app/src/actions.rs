//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use chrono::{Duration, Utc};
use linkbio_core::{Session, User};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::appearance::update_appearance;
use crate::auth::AuthMachine;
use crate::editor::save_links;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::services::{MemoryAuth, SettingsStore};

/// Lifetime of sessions issued by the local sign-in
pub const LOCAL_SESSION_HOURS: i64 = 1;

const LOCAL_TOKEN_LEN: usize = 32;

/// Everything an action needs to reach the outside world
pub struct ActionContext<S> {
    pub store: Arc<S>,
    /// Profile whose settings are reloaded
    pub profile_id: String,
    pub auth: Arc<MemoryAuth>,
    pub machine: AuthMachine<MemoryAuth>,
    /// Identity signed in by [`UpdateAction::SignIn`]
    pub owner: User,
}

/// Execute an action by spawning a background task
///
/// Results come back to the event loop as messages on `msg_tx`.
pub fn handle_action<S>(
    action: UpdateAction,
    ctx: &ActionContext<S>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    S: SettingsStore + Send + Sync + 'static,
{
    debug!("Handling action {}", action_name(&action));
    match action {
        UpdateAction::ReloadSettings => {
            let store = Arc::clone(&ctx.store);
            let profile_id = ctx.profile_id.clone();
            tokio::spawn(async move {
                let msg = match store.fetch_settings(&profile_id).await {
                    Ok(settings) => Message::SettingsLoaded(Box::new(settings)),
                    Err(e) => {
                        warn!("Reloading settings failed: {}", e);
                        Message::SettingsLoadFailed {
                            message: e.user_message(),
                        }
                    }
                };
                let _ = msg_tx.send(msg).await;
            })
        }

        UpdateAction::SaveLinks { profile_id, links } => {
            let store = Arc::clone(&ctx.store);
            tokio::spawn(async move {
                let msg = match save_links(store.as_ref(), &profile_id, &links).await {
                    Ok(()) => Message::LinksSaved { links },
                    Err(e) => Message::LinksSaveFailed {
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            })
        }

        UpdateAction::SaveAppearance {
            profile_id,
            settings,
            update,
        } => {
            let store = Arc::clone(&ctx.store);
            tokio::spawn(async move {
                let mut settings = *settings;
                let result =
                    update_appearance(store.as_ref(), &profile_id, &mut settings, &update).await;
                let msg = match result {
                    Ok(()) => Message::AppearanceSaved(update),
                    Err(e) => Message::AppearanceSaveFailed {
                        message: e.user_message(),
                    },
                };
                let _ = msg_tx.send(msg).await;
            })
        }

        UpdateAction::SignIn => {
            let auth = Arc::clone(&ctx.auth);
            let session = local_session(ctx.owner.clone());
            tokio::spawn(async move {
                info!("Signing in local owner {}", session.user.id);
                auth.sign_in(session).await;
            })
        }

        UpdateAction::SignOut => {
            let machine = ctx.machine.clone();
            tokio::spawn(async move {
                if let Err(e) = machine.sign_out().await {
                    error!("Sign-out action failed: {}", e);
                    let _ = msg_tx
                        .send(Message::SignOutFailed {
                            message: e.user_message(),
                        })
                        .await;
                }
            })
        }
    }
}

/// A session for `user` with a random access token
fn local_session(user: User) -> Session {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LOCAL_TOKEN_LEN)
        .map(char::from)
        .collect();
    Session::new(user, token, Utc::now() + Duration::hours(LOCAL_SESSION_HOURS))
}

fn action_name(action: &UpdateAction) -> &'static str {
    match action {
        UpdateAction::ReloadSettings => "reload_settings",
        UpdateAction::SaveLinks { .. } => "save_links",
        UpdateAction::SaveAppearance { .. } => "save_appearance",
        UpdateAction::SignIn => "sign_in",
        UpdateAction::SignOut => "sign_out",
    }
}
