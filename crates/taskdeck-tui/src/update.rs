//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use taskdeck_core::backend::{RemoteError, Session, Task, User};

use crate::effects::UiEffect;
use crate::events::{TaskMutationKind, UiEvent};
use crate::features::auth::AuthMode;
use crate::features::tasks::TasksScreenState;
use crate::features::{auth, tasks};
use crate::overlays::{self, AlertState, Overlay};
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            // Advance spinner animation
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { .. } => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionChanged(session) => handle_session_changed(app, session),
        UiEvent::SessionRestoreFinished { restored } => {
            tracing::debug!(restored, "session restore finished");
            vec![]
        }
        UiEvent::AuthFinished { mode, result } => handle_auth_finished(app, mode, result),
        UiEvent::UserLoaded(result) => handle_user_loaded(app, result),
        UiEvent::TasksLoaded(result) => handle_tasks_loaded(app, result),
        UiEvent::TaskMutationFinished { kind, result } => {
            handle_task_mutation_finished(app, kind, result)
        }
        UiEvent::SignOutFinished(result) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "sign out request failed");
            }
            vec![]
        }
    }
}

// ============================================================================
// Session Events
// ============================================================================

/// Follows session presence: a session appearing mounts the tasks screen, a
/// session disappearing returns to the auth screen. A refresh of an existing
/// session only swaps the stored tokens.
fn handle_session_changed(app: &mut AppState, session: Option<Session>) -> Vec<UiEffect> {
    let was_signed_in = app.tui.session.is_some();
    let is_signed_in = session.is_some();
    app.tui.session = session;

    if was_signed_in == is_signed_in {
        return vec![];
    }

    app.overlay = None;
    if is_signed_in {
        app.tui.screen = Screen::Tasks(TasksScreenState::new());
        vec![UiEffect::FetchUser, UiEffect::ReloadTasks]
    } else {
        app.tui.screen = Screen::Auth(auth::AuthScreenState::new());
        vec![]
    }
}

// ============================================================================
// Async Result Events
// ============================================================================

fn handle_auth_finished(
    app: &mut AppState,
    mode: AuthMode,
    result: Result<(), RemoteError>,
) -> Vec<UiEffect> {
    // The session store event may have flipped the screen already.
    let Screen::Auth(state) = &mut app.tui.screen else {
        return vec![];
    };
    state.in_flight = false;

    match result {
        Ok(()) => {
            if mode == AuthMode::SignUp {
                // Not signed in yet: the account needs a sign-in of its own.
                state.signup_complete = true;
            }
            // Sign-in success arrives through the session store.
            vec![]
        }
        Err(err) => {
            let title = match mode {
                AuthMode::SignIn => "Sign in failed",
                AuthMode::SignUp => "Sign up failed",
            };
            app.overlay = Some(Overlay::Alert(AlertState::new(title, err.message)));
            vec![]
        }
    }
}

fn handle_user_loaded(app: &mut AppState, result: Result<User, RemoteError>) -> Vec<UiEffect> {
    match result {
        Ok(user) => {
            if let Screen::Tasks(state) = &mut app.tui.screen {
                state.user = Some(user);
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load user profile");
        }
    }
    vec![]
}

fn handle_tasks_loaded(app: &mut AppState, result: Result<Vec<Task>, RemoteError>) -> Vec<UiEffect> {
    let Screen::Tasks(state) = &mut app.tui.screen else {
        return vec![];
    };
    state.loading = false;

    match result {
        Ok(task_rows) => {
            state.tasks = task_rows;
            state.clamp_selection();
        }
        Err(err) => {
            // Keep showing the previous list.
            tracing::error!(error = %err, "failed to load tasks");
        }
    }
    vec![]
}

fn handle_task_mutation_finished(
    app: &mut AppState,
    kind: TaskMutationKind,
    result: Result<(), RemoteError>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            if kind == TaskMutationKind::Add
                && let Screen::Tasks(state) = &mut app.tui.screen
            {
                state.input.clear();
            }
            vec![UiEffect::ReloadTasks]
        }
        Err(err) => {
            // The typed input stays put so the user can retry.
            tracing::error!(error = %err, ?kind, "task mutation failed");
            vec![]
        }
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        // Key release events arrive on some terminals (kitty protocol) and
        // would double every keystroke.
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C always quits, regardless of focus.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    // An active overlay captures input first.
    if let Some(effects) = overlays::handle_overlay_key(&mut app.overlay, key) {
        return effects;
    }

    match &mut app.tui.screen {
        Screen::Auth(state) => auth::update::handle_key(state, key),
        Screen::Tasks(state) => tasks::update::handle_key(state, key),
    }
}
