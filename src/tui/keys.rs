//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::NavCommand;

/// Maps a key event to a navigation command.
///
/// Only presses are mapped; repeats and releases return `None`.
#[must_use]
pub fn command_for(key: KeyEvent) -> Option<NavCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(NavCommand::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') => NavCommand::Quit,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => NavCommand::NextCategory,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => NavCommand::PreviousCategory,
        KeyCode::Up | KeyCode::Char('k') => NavCommand::Up,
        KeyCode::Down | KeyCode::Char('j') => NavCommand::Down,
        KeyCode::PageUp => NavCommand::PageUp,
        KeyCode::PageDown => NavCommand::PageDown,
        KeyCode::Home | KeyCode::Char('g') => NavCommand::Top,
        KeyCode::End | KeyCode::Char('G') => NavCommand::Bottom,
        KeyCode::Enter => NavCommand::Open,
        KeyCode::Esc => NavCommand::Close,
        KeyCode::Char('?') => NavCommand::ToggleHelp,
        _ => return None,
    };
    Some(command)
}
