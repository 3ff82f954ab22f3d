//! Full-screen terminal UI for taskdeck.
//!
//! The crate follows an Elm-style split:
//! - [`state`] holds the data, [`update`] is the pure reducer
//! - [`render`] draws state to a frame
//! - [`runtime`] owns the terminal and executes [`effects`]

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use taskdeck_core::config::Config;

/// Runs the interactive task tracker.
pub async fn run_app(config: &Config) -> Result<()> {
    // The app renders full-screen, so it needs a real terminal
    if !stderr().is_terminal() {
        anyhow::bail!("taskdeck requires an interactive terminal.");
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
