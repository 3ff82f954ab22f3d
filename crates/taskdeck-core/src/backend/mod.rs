//! Access layer for the hosted backend (auth API and task storage).

pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendClient, BackendSettings};
pub use error::{RemoteError, RemoteErrorKind, RemoteResult};
pub use types::{NewTask, Session, Task, User};
