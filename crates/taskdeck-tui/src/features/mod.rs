//! Feature slices: one directory per screen, each with its own
//! state/update/render split.

pub mod auth;
pub mod tasks;
