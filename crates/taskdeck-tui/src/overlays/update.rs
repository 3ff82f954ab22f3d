//! Overlay key routing.

use crossterm::event::KeyEvent;

use super::{Overlay, OverlayTransition};
use crate::effects::UiEffect;

/// Routes a key press to the active overlay, if any.
///
/// Returns `None` when no overlay is open so the key falls through to the
/// active screen. A `Close` transition clears the overlay in place.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let active = overlay.as_mut()?;
    let update = active.handle_key(key);
    if matches!(update.transition, OverlayTransition::Close) {
        *overlay = None;
    }
    Some(update.effects)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::overlays::AlertState;

    #[test]
    fn test_no_overlay_falls_through() {
        let mut overlay: Option<Overlay> = None;
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(handle_overlay_key(&mut overlay, key).is_none());
    }

    #[test]
    fn test_close_transition_clears_overlay() {
        let mut overlay = Some(Overlay::Alert(AlertState::new("Sign in failed", "boom")));
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let effects = handle_overlay_key(&mut overlay, key);
        assert_eq!(effects, Some(vec![]));
        assert!(overlay.is_none());
    }

    #[test]
    fn test_stay_transition_keeps_overlay() {
        let mut overlay = Some(Overlay::Alert(AlertState::new("Sign in failed", "boom")));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let effects = handle_overlay_key(&mut overlay, key);
        assert_eq!(effects, Some(vec![]));
        assert!(overlay.is_some());
    }
}
