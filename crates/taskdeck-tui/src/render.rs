//! Pure view/render functions for the TUI.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::auth::render::render_auth_screen;
use crate::features::tasks::render::render_tasks_screen;
use crate::overlays::OverlayExt;
use crate::state::{AppState, Screen};

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for progress animation.
pub(crate) const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let content_height = area.height.saturating_sub(STATUS_HEIGHT);
    let content = Rect::new(area.x, area.y, area.width, content_height);

    match &state.screen {
        Screen::Auth(auth) => render_auth_screen(frame, auth, state.spinner_frame, content),
        Screen::Tasks(tasks) => render_tasks_screen(frame, tasks, state.spinner_frame, content),
    }

    let status_area = Rect::new(area.x, area.y + content_height, area.width, STATUS_HEIGHT);
    render_status_line(app, frame, status_area);

    // Overlays draw on top of everything else.
    app.overlay.render(frame, area, content_height);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let hints: &[(&str, &str)] = if app.overlay.is_some() {
        &[("Enter", "dismiss")]
    } else {
        match &app.tui.screen {
            Screen::Auth(_) => &[
                ("Tab", "switch field"),
                ("Enter", "submit"),
                ("Ctrl+C", "quit"),
            ],
            Screen::Tasks(_) => &[
                ("Enter", "add"),
                ("↑/↓", "select"),
                ("Ctrl+T", "toggle"),
                ("Ctrl+X", "delete"),
                ("Ctrl+O", "sign out"),
                ("Ctrl+C", "quit"),
            ],
        }
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
