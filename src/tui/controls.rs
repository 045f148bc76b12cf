//! Keyboard input handling for the chart viewer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous(),
        KeyCode::Char(c @ '1'..='6') => app.select(c as usize - '1' as usize),
        _ => {}
    }
}
