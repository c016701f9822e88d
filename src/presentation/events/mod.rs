//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Checks if key should exit the application.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Checks if key activates the clear affordance.
#[must_use]
pub fn is_clear_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Checks if key is a submit event.
#[must_use]
pub fn is_submit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Enter,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL
        )));
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_clear_event() {
        assert!(is_clear_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
        assert!(!is_clear_event(&make_key_event(
            KeyCode::Char('x'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_submit_event() {
        assert!(is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }
}
