//! Core taskdeck library (config, backend client, session store).

pub mod backend;
pub mod config;
pub mod session;
