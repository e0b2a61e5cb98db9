//! Global key bindings, built once at startup.
//!
//! Keys that only mean something in one focus area (typing, `j`/`k`, the
//! copy key) are handled by the focus handlers in `handler.rs`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleSidebar,
    ToggleTheme,
    NewChat,
    RefreshWeather,
    Geolocate,
    ApplySuggestion(usize),
    CycleFocus,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    code: KeyCode,
    modifiers: KeyModifiers,
    action: Action,
}

const fn bind(code: KeyCode, modifiers: KeyModifiers, action: Action) -> Binding {
    Binding {
        code,
        modifiers,
        action,
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        use KeyCode::{Char, Tab};
        const CTRL: KeyModifiers = KeyModifiers::CONTROL;
        const ALT: KeyModifiers = KeyModifiers::ALT;

        let mut bindings = vec![
            bind(Char('c'), CTRL, Action::Quit),
            bind(Char('b'), CTRL, Action::ToggleSidebar),
            bind(Char('t'), CTRL, Action::ToggleTheme),
            bind(Char('n'), CTRL, Action::NewChat),
            bind(Char('r'), CTRL, Action::RefreshWeather),
            bind(Char('g'), CTRL, Action::Geolocate),
            bind(Tab, KeyModifiers::NONE, Action::CycleFocus),
        ];
        bindings.extend(
            ('1'..='4')
                .enumerate()
                .map(|(idx, digit)| bind(Char(digit), ALT, Action::ApplySuggestion(idx))),
        );

        Self { bindings }
    }
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.code == key.code && b.modifiers == key.modifiers)
            .map(|b| b.action)
    }

    /// The first key bound to `action`, formatted for the footer.
    pub fn hint(&self, action: Action) -> Option<String> {
        let binding = self.bindings.iter().find(|b| b.action == action)?;
        let prefix = if binding.modifiers.contains(KeyModifiers::CONTROL) {
            "^"
        } else if binding.modifiers.contains(KeyModifiers::ALT) {
            "M-"
        } else {
            ""
        };
        let key = match binding.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Tab => "Tab".to_string(),
            other => format!("{other:?}"),
        };
        Some(format!("{prefix}{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_lookup_global_bindings() {
        let keymap = Keymap::new();
        assert_eq!(
            keymap.lookup(&key(KeyCode::Char('b'), KeyModifiers::CONTROL)),
            Some(Action::ToggleSidebar)
        );
        assert_eq!(
            keymap.lookup(&key(KeyCode::Char('3'), KeyModifiers::ALT)),
            Some(Action::ApplySuggestion(2))
        );
        assert_eq!(keymap.lookup(&key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::CycleFocus));
    }

    #[test]
    fn test_plain_chars_are_not_bound() {
        let keymap = Keymap::new();
        assert_eq!(keymap.lookup(&key(KeyCode::Char('b'), KeyModifiers::NONE)), None);
        assert_eq!(keymap.lookup(&key(KeyCode::Char('1'), KeyModifiers::NONE)), None);
        assert_eq!(keymap.lookup(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_hints() {
        let keymap = Keymap::new();
        assert_eq!(keymap.hint(Action::ToggleTheme).as_deref(), Some("^T"));
        assert_eq!(keymap.hint(Action::ApplySuggestion(0)).as_deref(), Some("M-1"));
        assert_eq!(keymap.hint(Action::CycleFocus).as_deref(), Some("Tab"));
    }
}
