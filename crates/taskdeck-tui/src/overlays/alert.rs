//! Blocking alert overlay.
//!
//! Shown when a sign-in or sign-up request fails. Takes over keyboard input
//! until dismissed.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

const ALERT_WIDTH: u16 = 56;

/// Modal error message.
#[derive(Debug)]
pub struct AlertState {
    title: String,
    message: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, available_height: u16) {
        let hints = [InputHint::new("Enter", "dismiss")];

        let body_width = ALERT_WIDTH.saturating_sub(4) as usize;
        let text_rows = self.message.width().div_ceil(body_width.max(1)).clamp(1, 6) as u16;

        let layout = render_overlay(
            frame,
            area,
            available_height,
            &OverlayConfig {
                title: &self.title,
                border_color: Color::Red,
                width: ALERT_WIDTH,
                height: text_rows + 4,
                hints: &hints,
            },
        );

        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y + 1,
            layout.body.width.saturating_sub(2),
            layout.body.height.saturating_sub(1),
        );
        frame.render_widget(
            Paragraph::new(self.message.clone()).wrap(Wrap { trim: true }),
            body,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_and_esc_dismiss() {
        let mut alert = AlertState::new("Sign in failed", "HTTP 400: Invalid login credentials");
        assert!(matches!(
            alert.handle_key(key(KeyCode::Enter)).transition,
            OverlayTransition::Close
        ));
        assert!(matches!(
            alert.handle_key(key(KeyCode::Esc)).transition,
            OverlayTransition::Close
        ));
    }

    #[test]
    fn test_other_keys_keep_alert_open() {
        let mut alert = AlertState::new("Sign in failed", "boom");
        assert!(matches!(
            alert.handle_key(key(KeyCode::Char('q'))).transition,
            OverlayTransition::Stay
        ));
        assert!(matches!(
            alert.handle_key(key(KeyCode::Tab)).transition,
            OverlayTransition::Stay
        ));
    }
}
