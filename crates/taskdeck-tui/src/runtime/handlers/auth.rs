//! Sign-in, sign-up, and sign-out handlers.

use std::path::PathBuf;
use std::sync::Arc;

use taskdeck_core::backend::BackendClient;
use taskdeck_core::session::{self, SessionStore};

use crate::events::UiEvent;
use crate::features::auth::AuthMode;

/// Runs a sign-in request, persisting and publishing the session on success.
///
/// Pure async function - runtime spawns and sends result to inbox. The
/// screen switch happens through the session store notification, not the
/// returned event.
pub async fn sign_in(
    client: Arc<BackendClient>,
    store: SessionStore,
    session_path: PathBuf,
    email: String,
    password: String,
) -> UiEvent {
    match client.sign_in(&email, &password).await {
        Ok(new_session) => {
            if let Err(err) = session::save_session(&session_path, &new_session) {
                tracing::warn!(error = %err, "failed to persist session");
            }
            store.set(Some(new_session));
            UiEvent::AuthFinished {
                mode: AuthMode::SignIn,
                result: Ok(()),
            }
        }
        Err(err) => UiEvent::AuthFinished {
            mode: AuthMode::SignIn,
            result: Err(err),
        },
    }
}

/// Runs a sign-up request.
///
/// Success does not sign the user in: the account may still need email
/// confirmation, so the flow continues at the sign-in form.
pub async fn sign_up(client: Arc<BackendClient>, email: String, password: String) -> UiEvent {
    UiEvent::AuthFinished {
        mode: AuthMode::SignUp,
        result: client.sign_up(&email, &password).await,
    }
}

/// Revokes the session server-side, then clears it locally.
///
/// Local sign-out happens even when revocation fails, so the user is never
/// stuck in a signed-in UI with a dead token.
pub async fn sign_out(
    client: Arc<BackendClient>,
    store: SessionStore,
    session_path: PathBuf,
    access_token: String,
) -> UiEvent {
    let result = client.sign_out(&access_token).await;
    if let Err(err) = session::clear_session(&session_path) {
        tracing::warn!(error = %err, "failed to remove persisted session");
    }
    store.set(None);
    UiEvent::SignOutFinished(result)
}
