//! Auth feature reducer.
//!
//! Pure key handling for the login/signup form. All IO happens through the
//! effects returned to the runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::effects::UiEffect;

use super::state::{AuthField, AuthMode, AuthScreenState};

/// Handles a key press on the auth screen.
pub fn handle_key(state: &mut AuthScreenState, key: KeyEvent) -> Vec<UiEffect> {
    if state.signup_complete {
        // Confirmation panel: Enter moves to the sign-in form, everything
        // else is swallowed. The user is not signed in yet.
        if key.code == KeyCode::Enter {
            state.signup_complete = false;
            state.mode = AuthMode::SignIn;
        }
        return vec![];
    }

    match key.code {
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.mode = match state.mode {
                AuthMode::SignIn => AuthMode::SignUp,
                AuthMode::SignUp => AuthMode::SignIn,
            };
            vec![]
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
            // Two fields, so forward and backward both flip.
            state.focus = match state.focus {
                AuthField::Email => AuthField::Password,
                AuthField::Password => AuthField::Email,
            };
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Backspace => {
            match state.focus {
                AuthField::Email => state.email.pop(),
                AuthField::Password => state.password.pop(),
            };
            vec![]
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            match state.focus {
                AuthField::Email => state.email.push(c),
                AuthField::Password => state.password.push(c),
            }
            vec![]
        }
        _ => vec![],
    }
}

/// Submits the form unless a request is already running or a field is empty.
///
/// The email is trimmed before it is sent; the password is sent verbatim
/// (trailing spaces can be part of a password).
fn submit(state: &mut AuthScreenState) -> Vec<UiEffect> {
    if state.in_flight {
        return vec![];
    }
    let email = state.email.trim();
    if email.is_empty() || state.password.trim().is_empty() {
        return vec![];
    }
    state.in_flight = true;
    vec![UiEffect::SubmitAuth {
        mode: state.mode,
        email: email.to_string(),
        password: state.password.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(state: &mut AuthScreenState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_routes_to_focused_field() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "me@example.com");
        handle_key(&mut state, key(KeyCode::Tab));
        type_str(&mut state, "hunter2");
        assert_eq!(state.email, "me@example.com");
        assert_eq!(state.password, "hunter2");
    }

    #[test]
    fn test_tab_and_arrows_flip_focus() {
        let mut state = AuthScreenState::new();
        assert_eq!(state.focus, AuthField::Email);
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, AuthField::Password);
        handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(state.focus, AuthField::Email);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.focus, AuthField::Password);
        handle_key(&mut state, key(KeyCode::Up));
        assert_eq!(state.focus, AuthField::Email);
    }

    #[test]
    fn test_ctrl_t_toggles_mode_and_keeps_fields() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "me@example.com");
        handle_key(&mut state, ctrl('t'));
        assert_eq!(state.mode, AuthMode::SignUp);
        assert_eq!(state.email, "me@example.com");
        handle_key(&mut state, ctrl('t'));
        assert_eq!(state.mode, AuthMode::SignIn);
    }

    #[test]
    fn test_control_chars_do_not_insert() {
        let mut state = AuthScreenState::new();
        handle_key(&mut state, ctrl('a'));
        assert_eq!(state.email, "");
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "ab");
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.email, "a");
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "me@example.com");
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(!state.in_flight);

        // Whitespace-only passwords don't count either.
        handle_key(&mut state, key(KeyCode::Tab));
        type_str(&mut state, "   ");
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(!state.in_flight);
    }

    #[test]
    fn test_submit_trims_email_but_not_password() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "  me@example.com ");
        handle_key(&mut state, key(KeyCode::Tab));
        type_str(&mut state, " hunter2 ");
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.in_flight);
        assert_eq!(
            effects,
            vec![UiEffect::SubmitAuth {
                mode: AuthMode::SignIn,
                email: "me@example.com".to_string(),
                password: " hunter2 ".to_string(),
            }]
        );
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let mut state = AuthScreenState::new();
        type_str(&mut state, "me@example.com");
        handle_key(&mut state, key(KeyCode::Tab));
        type_str(&mut state, "hunter2");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)).len(), 1);
        assert!(handle_key(&mut state, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_signup_panel_swallows_keys_until_enter() {
        let mut state = AuthScreenState::new();
        state.mode = AuthMode::SignUp;
        state.signup_complete = true;
        state.email = "me@example.com".to_string();

        handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(state.signup_complete);
        assert_eq!(state.email, "me@example.com");

        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(!state.signup_complete);
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.email, "me@example.com");
    }
}
