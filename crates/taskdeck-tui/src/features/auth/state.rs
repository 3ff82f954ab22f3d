//! Auth screen state.

/// Whether the form submits a sign-in or a sign-up request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// State for the login/signup screen.
#[derive(Debug)]
pub struct AuthScreenState {
    pub mode: AuthMode,
    pub focus: AuthField,
    pub email: String,
    pub password: String,
    /// A submit request is running; further submits are ignored.
    pub in_flight: bool,
    /// Sign-up succeeded and the confirmation panel is showing.
    pub signup_complete: bool,
}

impl AuthScreenState {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            focus: AuthField::Email,
            email: String::new(),
            password: String::new(),
            in_flight: false,
            signup_complete: false,
        }
    }
}

impl Default for AuthScreenState {
    fn default() -> Self {
        Self::new()
    }
}
