//! Event handling for the TUI.
//!
//! Provides keyboard event polling and key predicates.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::TuiResult;

/// Poll for keyboard events with a timeout.
///
/// Returns `Some(KeyEvent)` if a key was pressed within the timeout,
/// or `None` if no key was pressed. Key releases are ignored.
pub fn poll_key(timeout: Duration) -> TuiResult<Option<KeyEvent>> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(Some(key));
    }
    Ok(None)
}

/// A character key with no modifier other than shift.
fn is_char(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

/// Check if the key event represents a quit command.
///
/// Returns `true` for 'q' key or Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    is_char(key, 'q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Tab switches focus between the project list and the chart.
pub fn is_tab(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
}

pub fn is_escape(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

pub fn is_enter(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// j or Down arrow.
pub fn is_down(key: &KeyEvent) -> bool {
    is_char(key, 'j') || key.code == KeyCode::Down
}

/// k or Up arrow.
pub fn is_up(key: &KeyEvent) -> bool {
    is_char(key, 'k') || key.code == KeyCode::Up
}

/// h or Left arrow.
pub fn is_left(key: &KeyEvent) -> bool {
    is_char(key, 'h') || key.code == KeyCode::Left
}

/// l or Right arrow.
pub fn is_right(key: &KeyEvent) -> bool {
    is_char(key, 'l') || key.code == KeyCode::Right
}

/// '+' or '=' (the unshifted plus key).
pub fn is_zoom_in(key: &KeyEvent) -> bool {
    is_char(key, '+') || is_char(key, '=')
}

pub fn is_zoom_out(key: &KeyEvent) -> bool {
    is_char(key, '-') || is_char(key, '_')
}

pub fn is_zoom_reset(key: &KeyEvent) -> bool {
    is_char(key, '0')
}

/// n toggles the notice center.
pub fn is_notices(key: &KeyEvent) -> bool {
    is_char(key, 'n')
}

/// e exports the selected chart as PNG.
pub fn is_export(key: &KeyEvent) -> bool {
    is_char(key, 'e')
}

/// r rereads the store.
pub fn is_reload(key: &KeyEvent) -> bool {
    is_char(key, 'r')
}

/// c switches between open and completed projects.
pub fn is_toggle_completed(key: &KeyEvent) -> bool {
    is_char(key, 'c')
}
