//! Application state composition.
//!
//! This module defines the top-level state hierarchy for the TUI:
//! - `AppState` - combined state (`TuiState` + overlay)
//! - `TuiState` - non-overlay UI state (active screen, session)
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── screen: Screen            (Auth or Tasks, with per-screen state)
//! │   ├── session: Option<Session>  (current backend session)
//! │   ├── spinner_frame: usize      (animation counter)
//! │   └── should_quit: bool
//! └── overlay: Option<Overlay>      (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut` to both without borrow conflicts.

use taskdeck_core::backend::Session;

use crate::features::auth::AuthScreenState;
use crate::features::tasks::TasksScreenState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            tui: TuiState::new(session),
            overlay: None,
        }
    }
}

/// Which screen fills the terminal.
///
/// The screen follows session presence: signed out shows `Auth`, signed in
/// shows `Tasks`. Each variant owns the state of its screen, so switching
/// screens drops the old screen's state wholesale.
#[derive(Debug)]
pub enum Screen {
    Auth(AuthScreenState),
    Tasks(TasksScreenState),
}

/// Non-overlay UI state.
pub struct TuiState {
    pub screen: Screen,
    pub session: Option<Session>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(session: Option<Session>) -> Self {
        let screen = match &session {
            Some(_) => Screen::Tasks(TasksScreenState::new()),
            None => Screen::Auth(AuthScreenState::new()),
        };
        Self {
            screen,
            session,
            spinner_frame: 0,
            should_quit: false,
        }
    }
}
