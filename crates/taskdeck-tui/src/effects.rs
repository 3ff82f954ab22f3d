//! Side effects requested by the update loop.
//!
//! The reducer never performs IO. Instead it returns a list of [`UiEffect`]
//! values describing the work to do, and the runtime executes them. Each
//! async effect reports back as a [`crate::events::UiEvent`].

use uuid::Uuid;

use crate::features::auth::AuthMode;

/// Effects returned from `update()` for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Exit the event loop.
    Quit,
    /// Load a persisted session from disk and validate it.
    RestoreSession,
    /// Run a sign-in or sign-up request with the given credentials.
    SubmitAuth {
        mode: AuthMode,
        email: String,
        password: String,
    },
    /// Fetch the profile of the signed-in user.
    FetchUser,
    /// Fetch the task list, newest first.
    ReloadTasks,
    /// Insert a new task row.
    InsertTask { title: String, user_id: Uuid },
    /// Set the completed flag on a task.
    SetTaskCompleted { id: Uuid, completed: bool },
    /// Delete a task row.
    DeleteTask { id: Uuid },
    /// Revoke the session and clear it from disk.
    SignOut,
}
