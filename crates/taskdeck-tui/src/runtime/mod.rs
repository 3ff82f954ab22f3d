//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//! - This eliminates per-operation receivers and simplifies event collection
//!
//! The session store subscription is bridged into the same inbox: every
//! publish arrives as `UiEvent::SessionChanged`, so the reducer sees session
//! changes in event order alongside everything else.
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use taskdeck_core::backend::{BackendClient, BackendSettings};
use taskdeck_core::config::{Config, paths};
use taskdeck_core::session::{SessionStore, SessionSubscription};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::AuthMode;
use crate::state::{AppState, Screen};
use crate::{render, terminal, update};

/// Target frame rate while a request is pending (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing is
/// happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the backend client, and the session store. Runs the
/// event loop and executes effects. Terminal state is guaranteed to be
/// restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    /// Shared backend client used by all handlers.
    client: Arc<BackendClient>,
    /// Session store; handlers publish through it, the runtime subscribes.
    store: SessionStore,
    /// Where the session is persisted between runs.
    session_path: PathBuf,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Keeps the session store subscription alive for the runtime's lifetime.
    _session_subscription: SessionSubscription,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during
    /// interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// Must be called from within a tokio runtime: handlers are spawned onto
    /// it, and the session subscription is forwarded by a spawned task.
    pub fn new(config: &Config) -> Result<Self> {
        // Resolve backend settings before touching the terminal so config
        // errors print normally.
        let settings = BackendSettings::from_config(&config.backend)?;
        let client = Arc::new(BackendClient::new(settings));

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let store = SessionStore::new();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        // Bridge session store publishes into the inbox.
        let (mut session_rx, session_subscription) = store.subscribe();
        let session_tx = inbox_tx.clone();
        tokio::spawn(async move {
            while let Some(session) = session_rx.recv().await {
                if session_tx.send(UiEvent::SessionChanged(session)).is_err() {
                    break;
                }
            }
        });

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(None),
            client,
            store,
            session_path: paths::session_path(),
            inbox_tx,
            inbox_rx,
            _session_subscription: session_subscription,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        // Kick off the session restore before the first frame.
        self.execute_effect(UiEffect::RestoreSession);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            // Collect events from terminal and inbox
            let mut events = self.collect_events()?;

            // Prepend Frame event with current terminal size
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            // Process each event through the reducer
            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick
                // cadence. Terminal events update state but batch renders to
                // the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            // Only render if something changed
            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (terminal, inbox).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast poll while a request is pending or the user is interacting,
        // slow poll otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let request_pending = match &self.state.tui.screen {
            Screen::Auth(state) => state.in_flight,
            Screen::Tasks(state) => state.loading,
        };
        let tick_interval = if request_pending || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Calculate time until next tick for poll duration.
        // This ensures we wake up exactly when Tick is due.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until the next tick is due
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Emit Tick after poll - we've now waited until the tick interval
        // elapsed (or woke early due to terminal input).
        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect, sending the result event to the inbox.
    ///
    /// This centralizes the spawn-and-send pattern: handlers become pure
    /// async functions that return `UiEvent`, while the runtime handles
    /// spawning.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            // Simple effects (inline)
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Session effects
            UiEffect::RestoreSession => {
                let client = Arc::clone(&self.client);
                let store = self.store.clone();
                let path = self.session_path.clone();
                self.spawn_effect(move || handlers::restore_session(client, store, path));
            }
            UiEffect::SignOut => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                let store = self.store.clone();
                let path = self.session_path.clone();
                self.spawn_effect(move || handlers::sign_out(client, store, path, token));
            }

            // Auth effects
            UiEffect::SubmitAuth {
                mode,
                email,
                password,
            } => {
                let client = Arc::clone(&self.client);
                match mode {
                    AuthMode::SignIn => {
                        let store = self.store.clone();
                        let path = self.session_path.clone();
                        self.spawn_effect(move || {
                            handlers::sign_in(client, store, path, email, password)
                        });
                    }
                    AuthMode::SignUp => {
                        self.spawn_effect(move || handlers::sign_up(client, email, password));
                    }
                }
            }

            // Task effects
            UiEffect::FetchUser => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::fetch_user(client, token));
            }
            UiEffect::ReloadTasks => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::fetch_tasks(client, token));
            }
            UiEffect::InsertTask { title, user_id } => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::insert_task(client, token, title, user_id));
            }
            UiEffect::SetTaskCompleted { id, completed } => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || {
                    handlers::set_task_completed(client, token, id, completed)
                });
            }
            UiEffect::DeleteTask { id } => {
                let Some(token) = self.access_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::delete_task(client, token, id));
            }
        }
    }

    /// The current access token, if signed in.
    ///
    /// Backend effects can outlive the session (sign-out racing a reload);
    /// those are dropped here.
    fn access_token(&self) -> Option<String> {
        let token = self
            .state
            .tui
            .session
            .as_ref()
            .map(|s| s.access_token.clone());
        if token.is_none() {
            tracing::debug!("dropping backend effect without a session");
        }
        token
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
