//! Key mapping from terminal events to game intents.

use crate::types::GameIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game intents.
///
/// Digits `1`-`9` pick up the figure in that tray slot; movement keys drag the
/// held figure by one cell.
pub fn map_key(key: KeyEvent) -> Option<GameIntent> {
    match key.code {
        // Tray slots
        KeyCode::Char(c @ '1'..='9') => Some(GameIntent::PickSlot(c as usize - '1' as usize)),

        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameIntent::Nudge(-1, 0)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameIntent::Nudge(1, 0)),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameIntent::Nudge(0, -1)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameIntent::Nudge(0, 1)),

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameIntent::Release),
        KeyCode::Esc => Some(GameIntent::Cancel),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameIntent::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_slot_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('1'))),
            Some(GameIntent::PickSlot(0))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('3'))),
            Some(GameIntent::PickSlot(2))
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(GameIntent::Nudge(-1, 0))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some(GameIntent::Nudge(1, 0))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('K'))),
            Some(GameIntent::Nudge(0, -1))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('j'))),
            Some(GameIntent::Nudge(0, 1))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Enter)),
            Some(GameIntent::Release)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameIntent::Release)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(GameIntent::Cancel));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameIntent::Restart)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), None);
    }
}
