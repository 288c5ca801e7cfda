//! Key mapping from terminal events to engine actions.

use crate::types::UserAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key event to `(action, held)`.
///
/// Press and repeat events map to the action; a release event maps to the
/// `held = false` form of the two hold-capable keys and to nothing else.
pub fn handle_key_event(key: KeyEvent) -> Option<(UserAction, bool)> {
    if should_quit(key) {
        return match key.kind {
            KeyEventKind::Release => None,
            _ => Some((UserAction::Terminate, false)),
        };
    }

    if key.kind == KeyEventKind::Release {
        return match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
                Some((UserAction::Down, false))
            }
            KeyCode::Char(' ') => Some((UserAction::Action, false)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some((UserAction::Left, false)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some((UserAction::Right, false))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some((UserAction::Up, false)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some((UserAction::Down, true)),

        KeyCode::Char(' ') => Some((UserAction::Action, true)),
        KeyCode::Enter => Some((UserAction::Start, false)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some((UserAction::Pause, false)),

        _ => None,
    }
}

/// Check if key should end the session.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
