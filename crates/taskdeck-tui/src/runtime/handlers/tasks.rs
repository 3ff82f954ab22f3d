//! Task fetch and mutation handlers.

use std::sync::Arc;

use taskdeck_core::backend::{BackendClient, NewTask};
use uuid::Uuid;

use crate::events::{TaskMutationKind, UiEvent};

/// Fetches the signed-in user's profile.
pub async fn fetch_user(client: Arc<BackendClient>, access_token: String) -> UiEvent {
    UiEvent::UserLoaded(client.get_user(&access_token).await)
}

/// Fetches the task list, newest first.
pub async fn fetch_tasks(client: Arc<BackendClient>, access_token: String) -> UiEvent {
    UiEvent::TasksLoaded(client.fetch_tasks(&access_token).await)
}

/// Inserts a new task row.
pub async fn insert_task(
    client: Arc<BackendClient>,
    access_token: String,
    title: String,
    user_id: Uuid,
) -> UiEvent {
    let task = NewTask { title, user_id };
    UiEvent::TaskMutationFinished {
        kind: TaskMutationKind::Add,
        result: client.insert_task(&access_token, &task).await,
    }
}

/// Sets the completed flag on a task.
pub async fn set_task_completed(
    client: Arc<BackendClient>,
    access_token: String,
    id: Uuid,
    completed: bool,
) -> UiEvent {
    UiEvent::TaskMutationFinished {
        kind: TaskMutationKind::Toggle,
        result: client.set_task_completed(&access_token, id, completed).await,
    }
}

/// Deletes a task row.
pub async fn delete_task(client: Arc<BackendClient>, access_token: String, id: Uuid) -> UiEvent {
    UiEvent::TaskMutationFinished {
        kind: TaskMutationKind::Delete,
        result: client.delete_task(&access_token, id).await,
    }
}
