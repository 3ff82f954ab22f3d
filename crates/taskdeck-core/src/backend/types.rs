//! Data shapes shared with the hosted backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session as issued by the auth API.
///
/// Carried opaquely: tokens are attached to requests and persisted to
/// disk, never inspected beyond deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp the access token expires at (when reported).
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

/// The account behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A single task row, as returned by the data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new task row.
///
/// The backend fills in id, completed and created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub user_id: Uuid,
}
