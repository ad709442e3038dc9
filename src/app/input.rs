use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::editor::Direction;

/// Translate a key event into a message, if it maps to one.
///
/// Key release events are ignored; repeats count as presses so held keys
/// keep editing.
pub(super) fn message_for_key(key: &KeyEvent) -> Option<Message> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let msg = match key.code {
        KeyCode::Char('q') if ctrl => Message::Quit,
        KeyCode::Char('s') if ctrl => Message::Save,
        KeyCode::Home if ctrl => Message::MoveToStart,
        KeyCode::End if ctrl => Message::MoveToEnd,
        KeyCode::Char(c) if !ctrl => Message::InsertChar(c),
        KeyCode::Enter => Message::SplitLine,
        KeyCode::Backspace => Message::DeleteBack,
        KeyCode::Delete => Message::DeleteForward,
        KeyCode::Left => Message::MoveCursor(Direction::Left),
        KeyCode::Right => Message::MoveCursor(Direction::Right),
        KeyCode::Up => Message::MoveCursor(Direction::Up),
        KeyCode::Down => Message::MoveCursor(Direction::Down),
        KeyCode::Home => Message::MoveHome,
        KeyCode::End => Message::MoveEnd,
        _ => return None,
    };
    Some(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_char_inserts() {
        let msg = message_for_key(&press(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(msg, Some(Message::InsertChar('a')));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let msg = message_for_key(&press(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(msg, Some(Message::Quit));
    }

    #[test]
    fn test_ctrl_s_saves() {
        let msg = message_for_key(&press(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(msg, Some(Message::Save));
    }

    #[test]
    fn test_unbound_ctrl_char_is_ignored() {
        let msg = message_for_key(&press(KeyCode::Char('z'), KeyModifiers::CONTROL));
        assert_eq!(msg, None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(message_for_key(&key), None);
    }

    #[test]
    fn test_arrows_move_cursor() {
        let msg = message_for_key(&press(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(msg, Some(Message::MoveCursor(Direction::Down)));
    }

    #[test]
    fn test_ctrl_home_goes_to_buffer_start() {
        let msg = message_for_key(&press(KeyCode::Home, KeyModifiers::CONTROL));
        assert_eq!(msg, Some(Message::MoveToStart));
    }
}
