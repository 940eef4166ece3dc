//! src/controller/actions.rs
//! ============================================================================
//! # Actions: picker commands decoupled from raw key events
//!
//! `Action::from_key` is the single keymap. Movement and activation apply to
//! whichever pane has focus; the caller routes them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Accept the current location and exit.
    Accept,

    /// Select the highlighted row of the focused pane.
    Activate,

    GoHome,

    GoToParent,

    MoveDown,

    MoveFirst,

    MoveLast,

    MoveUp,

    /// Exit without a choice.
    Quit,

    Refresh,

    SwitchFocus,

    ToggleHidden,

    ToggleSort,
}

impl Action {
    /// Map a key press to an action. Releases and repeats are ignored.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Self::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Self::Quit),
            (KeyCode::Char('o'), _) => Some(Self::Accept),

            (KeyCode::Up | KeyCode::Char('k'), _) => Some(Self::MoveUp),
            (KeyCode::Down | KeyCode::Char('j'), _) => Some(Self::MoveDown),
            (KeyCode::Home | KeyCode::Char('g'), _) => Some(Self::MoveFirst),
            (KeyCode::End | KeyCode::Char('G'), _) => Some(Self::MoveLast),

            (KeyCode::Enter | KeyCode::Right | KeyCode::Char('l'), _) => Some(Self::Activate),
            (KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h'), _) => {
                Some(Self::GoToParent)
            }
            (KeyCode::Char('~'), _) => Some(Self::GoHome),

            (KeyCode::Char('.'), _) => Some(Self::ToggleHidden),
            (KeyCode::Char('s'), _) => Some(Self::ToggleSort),
            (KeyCode::Char('r') | KeyCode::F(5), _) => Some(Self::Refresh),
            (KeyCode::Tab | KeyCode::BackTab, _) => Some(Self::SwitchFocus),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keymap() {
        assert_eq!(Action::from_key(press(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(Action::from_key(press(KeyCode::Backspace)), Some(Action::GoToParent));
        assert_eq!(Action::from_key(press(KeyCode::Char('h'))), Some(Action::GoToParent));
        assert_eq!(Action::from_key(press(KeyCode::Char('.'))), Some(Action::ToggleHidden));
        assert_eq!(Action::from_key(press(KeyCode::Char('s'))), Some(Action::ToggleSort));
        assert_eq!(Action::from_key(press(KeyCode::Char('r'))), Some(Action::Refresh));
        assert_eq!(Action::from_key(press(KeyCode::Tab)), Some(Action::SwitchFocus));
        assert_eq!(Action::from_key(press(KeyCode::Char('~'))), Some(Action::GoHome));
        assert_eq!(Action::from_key(press(KeyCode::Char('o'))), Some(Action::Accept));
        assert_eq!(Action::from_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(Action::from_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Action::from_key(key), Some(Action::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Action::from_key(key), None);
    }
}
