//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to an engine command.
///
/// Release events never map to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::RotateCw),

        // Drop
        KeyCode::Down | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::HardDrop)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
