//! Key Map - bindings the skeleton handles itself
//!
//! Everything not matched here is forwarded to the active page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keybinding definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers (Ctrl, Shift, Alt)
    pub modifiers: KeyModifiers,
    /// Description for help display
    pub description: &'static str,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers, description: &'static str) -> Self {
        Self {
            code,
            modifiers,
            description,
        }
    }

    /// Parse `ctrl+left`, `alt+x`, `q`, `f1`, ...
    pub fn parse(text: &str, description: &'static str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
        let key = parts.pop()?;

        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                // Terminals report shifted letters as uppercase with SHIFT set
                if c.is_ascii_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                    KeyCode::Char(c)
                } else if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(c.to_ascii_uppercase())
                } else {
                    KeyCode::Char(c)
                }
            }
        };

        Some(Self::new(code, modifiers, description))
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release && key.code == self.code && key.modifiers == self.modifiers
    }
}

/// Skeleton-level key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub quit: Vec<KeyBinding>,
    pub switch_tab_left: Vec<KeyBinding>,
    pub switch_tab_right: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: vec![KeyBinding::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                "Quit",
            )],
            switch_tab_left: vec![KeyBinding::new(
                KeyCode::Left,
                KeyModifiers::CONTROL,
                "Previous tab",
            )],
            switch_tab_right: vec![KeyBinding::new(
                KeyCode::Right,
                KeyModifiers::CONTROL,
                "Next tab",
            )],
        }
    }
}

fn any_matches(bindings: &[KeyBinding], key: &KeyEvent) -> bool {
    bindings.iter().any(|b| b.matches(key))
}

/// What the skeleton does with a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    SwitchTabLeft,
    SwitchTabRight,
    /// Not a skeleton binding: forward to the page
    Forward,
}

impl KeyMap {
    pub fn action(&self, key: &KeyEvent) -> KeyAction {
        if any_matches(&self.quit, key) {
            KeyAction::Quit
        } else if any_matches(&self.switch_tab_left, key) {
            KeyAction::SwitchTabLeft
        } else if any_matches(&self.switch_tab_right, key) {
            KeyAction::SwitchTabRight
        } else {
            KeyAction::Forward
        }
    }

    /// All bindings, for help display
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.quit
            .iter()
            .chain(&self.switch_tab_left)
            .chain(&self.switch_tab_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_actions() {
        let map = KeyMap::default();
        assert_eq!(
            map.action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            map.action(&key(KeyCode::Left, KeyModifiers::CONTROL)),
            KeyAction::SwitchTabLeft
        );
        assert_eq!(
            map.action(&key(KeyCode::Right, KeyModifiers::CONTROL)),
            KeyAction::SwitchTabRight
        );
        assert_eq!(
            map.action(&key(KeyCode::Left, KeyModifiers::NONE)),
            KeyAction::Forward
        );
    }

    #[test]
    fn test_parse_bindings() {
        let b = KeyBinding::parse("ctrl+left", "x").unwrap();
        assert_eq!(b.code, KeyCode::Left);
        assert_eq!(b.modifiers, KeyModifiers::CONTROL);

        let b = KeyBinding::parse("q", "x").unwrap();
        assert_eq!(b.code, KeyCode::Char('q'));
        assert_eq!(b.modifiers, KeyModifiers::NONE);

        let b = KeyBinding::parse("alt+shift+f2", "x").unwrap();
        assert_eq!(b.code, KeyCode::F(2));
        assert_eq!(b.modifiers, KeyModifiers::ALT | KeyModifiers::SHIFT);
    }

    #[test]
    fn test_shifted_letters_match_terminal_events() {
        let expected = key(KeyCode::Char('A'), KeyModifiers::SHIFT);
        for text in ["shift+a", "shift+A", "A"] {
            let b = KeyBinding::parse(text, "x").unwrap();
            assert!(b.matches(&expected), "{} should match Shift+A", text);
        }

        let ctrl_shift = KeyBinding::parse("ctrl+shift+k", "x").unwrap();
        assert!(ctrl_shift.matches(&key(
            KeyCode::Char('K'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));

        let plain = KeyBinding::parse("a", "x").unwrap();
        assert!(!plain.matches(&expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(KeyBinding::parse("hyper+x", "x").is_none());
        assert!(KeyBinding::parse("ctrl+nope", "x").is_none());
        assert!(KeyBinding::parse("", "x").is_none());
        assert!(KeyBinding::parse("fx", "x").is_none());
    }

    #[test]
    fn test_release_events_ignored() {
        let map = KeyMap::default();
        let mut ev = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        ev.kind = KeyEventKind::Release;
        assert_eq!(map.action(&ev), KeyAction::Forward);
    }
}
