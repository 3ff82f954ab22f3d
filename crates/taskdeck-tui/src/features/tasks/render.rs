//! Tasks feature view.
//!
//! Header, new-task input line, and the task list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use taskdeck_core::backend::Task;

use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputLine, render_input_line, render_separator};
use crate::render::SPINNER_FRAMES;

use super::state::TasksScreenState;

/// Left/right padding for screen content.
const MARGIN: u16 = 1;

/// Renders the signed-in task list screen.
pub fn render_tasks_screen(
    frame: &mut Frame,
    state: &TasksScreenState,
    spinner_frame: usize,
    area: Rect,
) {
    let content_width = area.width.saturating_sub(MARGIN * 2);

    let header_area = Rect::new(area.x + MARGIN, area.y, content_width, 1);
    render_header(frame, state, header_area);

    render_separator(frame, area, 1);

    let input_area = Rect::new(area.x + MARGIN, area.y + 2, content_width, 1);
    render_input_line(
        frame,
        input_area,
        &InputLine {
            value: &state.input,
            placeholder: Some("What needs to be done?"),
            prompt: "> ",
            prompt_color: Color::DarkGray,
            text_color: Color::White,
            placeholder_color: Color::DarkGray,
            cursor_color: Color::Cyan,
        },
    );

    render_separator(frame, area, 3);

    let list_area = Rect::new(
        area.x + MARGIN,
        area.y + 4,
        content_width,
        area.height.saturating_sub(4),
    );
    render_list(frame, state, spinner_frame, list_area);
}

fn render_header(frame: &mut Frame, state: &TasksScreenState, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "My Tasks",
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        area,
    );

    if let Some(email) = state.user.as_ref().and_then(|u| u.email.as_deref()) {
        let email = truncate_with_ellipsis(email, area.width.saturating_sub(10) as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                email,
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }
}

fn render_list(frame: &mut Frame, state: &TasksScreenState, spinner_frame: usize, area: Rect) {
    if state.loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("  {spinner} "), Style::default().fg(Color::Cyan)),
                Span::styled("Loading your todos...", Style::default().fg(Color::DarkGray)),
            ])),
            area,
        );
        return;
    }

    if state.tasks.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "  No tasks yet. Add your first task above!",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    let line_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = state
        .tasks
        .iter()
        .map(|task| ListItem::new(task_line(task, line_width)))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn task_line(task: &Task, max_width: usize) -> Line<'static> {
    let (marker, marker_color) = if task.completed {
        ("● ", Color::Green)
    } else {
        ("○ ", Color::DarkGray)
    };
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };
    let title = truncate_with_ellipsis(&task.title, max_width.saturating_sub(2));
    Line::from(vec![
        Span::styled(marker, Style::default().fg(marker_color)),
        Span::styled(title, title_style),
    ])
}
