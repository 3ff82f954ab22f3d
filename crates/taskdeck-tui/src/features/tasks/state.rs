//! Tasks screen state.

use taskdeck_core::backend::{Task, User};

/// State for the signed-in task list screen.
#[derive(Debug)]
pub struct TasksScreenState {
    /// Tasks as returned by the backend, newest first.
    pub tasks: Vec<Task>,
    /// Profile of the signed-in user, once loaded.
    pub user: Option<User>,
    /// New-task input line.
    pub input: String,
    /// Index of the selected row in `tasks`.
    pub selected: usize,
    /// The initial task fetch has not settled yet.
    pub loading: bool,
}

impl TasksScreenState {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            user: None,
            input: String::new(),
            selected: 0,
            loading: true,
        }
    }

    /// The currently selected task, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Keeps `selected` inside the list after the list changes.
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }
}

impl Default for TasksScreenState {
    fn default() -> Self {
        Self::new()
    }
}
