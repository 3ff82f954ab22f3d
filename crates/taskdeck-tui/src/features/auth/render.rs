//! Auth feature view.
//!
//! Rendering for the login/signup form and the post-signup confirmation
//! panel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_start_with_ellipsis;
use crate::overlays::render_utils::{calculate_overlay_area, render_overlay_container};
use crate::render::SPINNER_FRAMES;

use super::state::{AuthField, AuthMode, AuthScreenState};

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 13;

/// Renders the centered auth card.
pub fn render_auth_screen(
    frame: &mut Frame,
    state: &AuthScreenState,
    spinner_frame: usize,
    area: Rect,
) {
    let border_color = if state.signup_complete {
        Color::Green
    } else {
        Color::Cyan
    };
    let popup_area = calculate_overlay_area(area, area.height, CARD_WIDTH, CARD_HEIGHT);
    render_overlay_container(frame, popup_area, "Taskdeck", border_color);

    let inner = Rect::new(
        popup_area.x + 2,
        popup_area.y + 1,
        popup_area.width.saturating_sub(4),
        popup_area.height.saturating_sub(2),
    );

    if state.signup_complete {
        render_signup_complete(frame, inner);
    } else {
        render_form(frame, state, spinner_frame, inner);
    }
}

fn render_form(frame: &mut Frame, state: &AuthScreenState, spinner_frame: usize, inner: Rect) {
    let heading = match state.mode {
        AuthMode::SignIn => "Welcome back!",
        AuthMode::SignUp => "Create your account",
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled("Email address", label_style)),
        field_line(
            &state.email,
            state.focus == AuthField::Email && !state.in_flight,
            false,
            inner.width as usize,
        ),
        Line::default(),
        Line::from(Span::styled("Password", label_style)),
        field_line(
            &state.password,
            state.focus == AuthField::Password && !state.in_flight,
            true,
            inner.width as usize,
        ),
        Line::default(),
        action_line(state, spinner_frame),
    ];
    while (lines.len() as u16) < inner.height.saturating_sub(1) {
        lines.push(Line::default());
    }
    frame.render_widget(Paragraph::new(lines), inner);

    render_mode_hint(frame, state.mode, inner);
}

fn render_signup_complete(frame: &mut Frame, inner: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Account Created Successfully!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("You can now sign in with your credentials."),
        Line::default(),
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Continue to Sign In", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// A single "> value█" form field. The password variant masks every char.
fn field_line(value: &str, focused: bool, mask: bool, width: usize) -> Line<'static> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    // Room for the prompt and the cursor block.
    let shown = truncate_start_with_ellipsis(&shown, width.saturating_sub(3));

    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(shown, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn action_line(state: &AuthScreenState, spinner_frame: usize) -> Line<'static> {
    if state.in_flight {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        let label = match state.mode {
            AuthMode::SignIn => "Signing in...",
            AuthMode::SignUp => "Creating account...",
        };
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {label}"), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let label = match state.mode {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Create account",
        };
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {label}"), Style::default().fg(Color::DarkGray)),
        ])
    }
}

/// Bottom row of the card: the mode-switch prompt.
fn render_mode_hint(frame: &mut Frame, mode: AuthMode, inner: Rect) {
    let (question, switch) = match mode {
        AuthMode::SignIn => ("Don't have an account?", "sign up"),
        AuthMode::SignUp => ("Already have an account?", "sign in"),
    };
    let line = Line::from(vec![
        Span::styled(format!("{question} "), Style::default().fg(Color::DarkGray)),
        Span::styled("Ctrl+T", Style::default().fg(Color::Cyan)),
        Span::styled(format!(" to {switch}"), Style::default().fg(Color::DarkGray)),
    ]);
    let hint_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        hint_area,
    );
}
