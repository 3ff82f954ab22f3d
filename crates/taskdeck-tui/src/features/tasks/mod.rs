//! Task list screen feature slice.

pub mod render;
pub mod state;
pub mod update;

pub use state::TasksScreenState;
