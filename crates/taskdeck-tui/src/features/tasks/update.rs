//! Tasks feature reducer.
//!
//! Pure key handling for the task list. Mutations are optimistic about
//! nothing: each one round-trips through the backend and the list is
//! reloaded on success.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::effects::UiEffect;

use super::state::TasksScreenState;

/// Handles a key press on the tasks screen.
pub fn handle_key(state: &mut TasksScreenState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            match state.selected_task() {
                Some(task) => vec![UiEffect::SetTaskCompleted {
                    id: task.id,
                    completed: !task.completed,
                }],
                None => vec![],
            }
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            match state.selected_task() {
                Some(task) => vec![UiEffect::DeleteTask { id: task.id }],
                None => vec![],
            }
        }
        KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![UiEffect::SignOut]
        }
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            if !state.tasks.is_empty() {
                state.selected = (state.selected + 1).min(state.tasks.len() - 1);
            }
            vec![]
        }
        KeyCode::Enter => submit_new_task(state),
        KeyCode::Backspace => {
            state.input.pop();
            vec![]
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.input.push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Requests an insert for the typed title.
///
/// The input is only cleared once the insert succeeds, so a failed request
/// leaves the typed text in place. Without a loaded user there is no
/// `user_id` to attach, so the submit is dropped.
fn submit_new_task(state: &mut TasksScreenState) -> Vec<UiEffect> {
    let title = state.input.trim();
    if title.is_empty() {
        return vec![];
    }
    let Some(user) = &state.user else {
        return vec![];
    };
    vec![UiEffect::InsertTask {
        title: title.to_string(),
        user_id: user.id,
    }]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use taskdeck_core::backend::{Task, User};
    use uuid::Uuid;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn user_fixture() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("me@example.com".to_string()),
        }
    }

    fn task_fixture(title: &str, completed: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            completed,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn state_with_tasks(titles: &[&str]) -> TasksScreenState {
        let mut state = TasksScreenState::new();
        state.user = Some(user_fixture());
        state.tasks = titles.iter().map(|t| task_fixture(t, false)).collect();
        state.loading = false;
        state
    }

    #[test]
    fn test_typing_fills_input() {
        let mut state = TasksScreenState::new();
        for c in "buy milk".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.input, "buy mil");
    }

    #[test]
    fn test_enter_with_blank_input_is_a_no_op() {
        let mut state = state_with_tasks(&[]);
        state.input = "   ".to_string();
        assert!(handle_key(&mut state, key(KeyCode::Enter)).is_empty());
        assert_eq!(state.input, "   ");
    }

    #[test]
    fn test_enter_without_user_is_a_no_op() {
        let mut state = TasksScreenState::new();
        state.input = "buy milk".to_string();
        assert!(handle_key(&mut state, key(KeyCode::Enter)).is_empty());
        assert_eq!(state.input, "buy milk");
    }

    #[test]
    fn test_enter_requests_insert_and_keeps_input() {
        let mut state = state_with_tasks(&[]);
        let user_id = state.user.as_ref().map(|u| u.id);
        state.input = "  buy milk  ".to_string();
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::InsertTask {
                title: "buy milk".to_string(),
                user_id: user_id.unwrap(),
            }]
        );
        // Cleared only once the insert succeeds.
        assert_eq!(state.input, "  buy milk  ");
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut state = state_with_tasks(&["a", "b"]);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.selected, 0);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.selected, 1);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_toggle_uses_selected_row() {
        let mut state = state_with_tasks(&["a", "b"]);
        state.tasks[1].completed = true;
        handle_key(&mut state, key(KeyCode::Down));
        let effects = handle_key(&mut state, ctrl('t'));
        assert_eq!(
            effects,
            vec![UiEffect::SetTaskCompleted {
                id: state.tasks[1].id,
                completed: false,
            }]
        );
    }

    #[test]
    fn test_toggle_on_empty_list_is_a_no_op() {
        let mut state = state_with_tasks(&[]);
        assert!(handle_key(&mut state, ctrl('t')).is_empty());
        assert!(handle_key(&mut state, ctrl('x')).is_empty());
    }

    #[test]
    fn test_delete_targets_selected_row() {
        let mut state = state_with_tasks(&["a", "b", "c"]);
        handle_key(&mut state, key(KeyCode::Down));
        let effects = handle_key(&mut state, ctrl('x'));
        assert_eq!(effects, vec![UiEffect::DeleteTask { id: state.tasks[1].id }]);
    }

    #[test]
    fn test_ctrl_o_signs_out() {
        let mut state = state_with_tasks(&["a"]);
        assert_eq!(handle_key(&mut state, ctrl('o')), vec![UiEffect::SignOut]);
    }

    #[test]
    fn test_ctrl_chars_do_not_reach_input() {
        let mut state = state_with_tasks(&[]);
        handle_key(&mut state, ctrl('t'));
        handle_key(&mut state, ctrl('o'));
        assert_eq!(state.input, "");
    }
}
