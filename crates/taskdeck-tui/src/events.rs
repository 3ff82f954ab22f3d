//! Event types consumed by the TUI reducer.
//!
//! Every input the app reacts to is normalized into a [`UiEvent`] before it
//! reaches `update()`. Terminal input, timer ticks, and the results of async
//! work all arrive through the same channel, which keeps the reducer pure and
//! easy to test.

use taskdeck_core::backend::{RemoteError, Session, Task, User};

use crate::features::auth::AuthMode;

/// Which task mutation an async completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMutationKind {
    Add,
    Toggle,
    Delete,
}

/// Events processed by the update loop.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick for spinner animation.
    Tick,
    /// Frame rendered with the given dimensions.
    Frame { width: u16, height: u16 },
    /// Raw terminal event (key press, resize, ...).
    Terminal(crossterm::event::Event),
    /// The shared session store published a new value.
    SessionChanged(Option<Session>),
    /// Startup session restore finished (session already published via the
    /// store when `restored` is true).
    SessionRestoreFinished { restored: bool },
    /// A sign-in or sign-up request finished.
    AuthFinished {
        mode: AuthMode,
        result: Result<(), RemoteError>,
    },
    /// The profile fetch for the signed-in user finished.
    UserLoaded(Result<User, RemoteError>),
    /// A task list fetch finished.
    TasksLoaded(Result<Vec<Task>, RemoteError>),
    /// A task mutation (insert/toggle/delete) finished.
    TaskMutationFinished {
        kind: TaskMutationKind,
        result: Result<(), RemoteError>,
    },
    /// The sign-out request finished.
    SignOutFinished(Result<(), RemoteError>),
}
