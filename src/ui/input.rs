//! Keyboard and mouse mapping for the terminal host.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// What an input means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Start, restart or flap, depending on the session state.
    Primary,
    ToggleMenu,
    ToggleMute,
    ReloadCustomImages,
    RevertDefaultImages,
    Quit,
}

pub fn map_key(key: KeyEvent, menu_open: bool) -> Option<HostAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(HostAction::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(HostAction::Primary),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Tab => Some(HostAction::ToggleMenu),
        KeyCode::Esc if menu_open => Some(HostAction::ToggleMenu),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(HostAction::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(HostAction::Quit),
        KeyCode::Char('1') if menu_open => Some(HostAction::ReloadCustomImages),
        KeyCode::Char('2') if menu_open => Some(HostAction::RevertDefaultImages),
        _ => None,
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Option<HostAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(HostAction::Primary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_primary_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Enter] {
            assert_eq!(map_key(key(code), false), Some(HostAction::Primary));
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, false), Some(HostAction::Quit));
        assert_eq!(map_key(key(KeyCode::Char('c')), false), None);
    }

    #[test]
    fn test_menu_only_keys() {
        assert_eq!(map_key(key(KeyCode::Char('1')), false), None);
        assert_eq!(
            map_key(key(KeyCode::Char('1')), true),
            Some(HostAction::ReloadCustomImages)
        );
        assert_eq!(map_key(key(KeyCode::Esc), false), None);
        assert_eq!(map_key(key(KeyCode::Esc), true), Some(HostAction::ToggleMenu));
    }

    #[test]
    fn test_release_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, false), None);
    }

    #[test]
    fn test_left_click_is_primary() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_mouse(click), Some(HostAction::Primary));
    }
}
