//! Startup session restore.

use std::path::PathBuf;
use std::sync::Arc;

use taskdeck_core::backend::BackendClient;
use taskdeck_core::session::{self, SessionStore};

use crate::events::UiEvent;

/// Restores a persisted session from disk and validates it against the
/// backend.
///
/// A restored session is only published once `get_user` confirms the token
/// still works; stale or unreadable sessions are cleared so the next start
/// does not retry them.
pub async fn restore_session(
    client: Arc<BackendClient>,
    store: SessionStore,
    session_path: PathBuf,
) -> UiEvent {
    let stored = match session::load_session(&session_path) {
        Ok(Some(stored)) => stored,
        Ok(None) => return UiEvent::SessionRestoreFinished { restored: false },
        Err(err) => {
            tracing::warn!(error = %err, "failed to read persisted session");
            return UiEvent::SessionRestoreFinished { restored: false };
        }
    };

    match client.get_user(&stored.access_token).await {
        Ok(user) => {
            let session = taskdeck_core::backend::Session { user, ..stored };
            store.set(Some(session));
            UiEvent::SessionRestoreFinished { restored: true }
        }
        Err(err) => {
            tracing::info!(error = %err, "persisted session rejected, clearing it");
            if let Err(err) = session::clear_session(&session_path) {
                tracing::warn!(error = %err, "failed to remove persisted session");
            }
            UiEvent::SessionRestoreFinished { restored: false }
        }
    }
}
