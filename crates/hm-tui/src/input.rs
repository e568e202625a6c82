//! Input handling - convert key events to commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hm_core::Action;

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Action),
    /// Start a new episode.
    Reset,
    Quit,
}

/// Convert a key event to a command.
///
/// Arrows, vi keys (`hjkl`) and `wasd` move; `r` resets; `q`, `Esc` and
/// Ctrl+C quit. Key releases are ignored.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(Command::Move(Action::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(Command::Move(Action::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(Command::Move(Action::Left))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::Move(Action::Up)),

        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}
