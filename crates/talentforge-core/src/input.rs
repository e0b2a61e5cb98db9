//! Growable text-entry widgets.
//!
//! There are two widgets, one on the welcome screen and one under the
//! conversation, and exactly one of them is visible at a time. Heights are
//! in layout units: one wrapped row is `ROW_HEIGHT` units and a widget never
//! grows past `MAX_HEIGHT`.

use crate::state::ViewMode;
use crate::wrap::wrap_chars;

pub const ROW_HEIGHT: u16 = 20;
pub const MAX_HEIGHT: u16 = 200;

const DEFAULT_WRAP_WIDTH: usize = 50;

/// Preset prompts offered on the welcome screen and in the sidebar.
pub const SUGGESTIONS: [&str; 4] = [
    "Help me prepare for a software engineering interview",
    "Review my resume summary and suggest improvements",
    "What job search strategies work best right now?",
    "How should I negotiate a salary offer?",
];

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Welcome,
    Chat,
}

impl From<ViewMode> for InputTarget {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Welcome => InputTarget::Welcome,
            ViewMode::Conversation => InputTarget::Chat,
        }
    }
}

/// Editing operations forwarded from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// The activation key, with or without the newline modifier held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter { newline_modifier: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Submit the widget's value. No newline was inserted.
    Submit,
    /// A literal line break was inserted.
    Newline,
}

#[derive(Debug, Clone)]
pub struct InputWidget {
    value: String,
    cursor: usize,
    wrap_width: usize,
    height: u16,
    submit_enabled: bool,
}

impl Default for InputWidget {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            wrap_width: DEFAULT_WRAP_WIDTH,
            height: ROW_HEIGHT,
            submit_enabled: false,
        }
    }
}

impl InputWidget {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Visible rows implied by the current height.
    pub fn rows(&self) -> u16 {
        (self.height / ROW_HEIGHT).max(1)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Called by the renderer when the widget's inner width changes.
    pub fn set_wrap_width(&mut self, width: usize) {
        let width = width.max(1);
        if width != self.wrap_width {
            self.wrap_width = width;
            self.changed();
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
        self.changed();
    }

    pub fn apply(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(c) => {
                let byte_pos = char_to_byte_index(&self.value, self.cursor);
                self.value.insert(byte_pos, c);
                self.cursor += 1;
                self.changed();
            }
            InputEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(byte_pos);
                    self.changed();
                }
            }
            InputEdit::Delete => {
                if self.cursor < self.value.chars().count() {
                    let byte_pos = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(byte_pos);
                    self.changed();
                }
            }
            InputEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEdit::Right => {
                let char_count = self.value.chars().count();
                self.cursor = (self.cursor + 1).min(char_count);
            }
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = self.value.chars().count(),
        }
    }

    pub fn key(&mut self, key: EditKey) -> KeyOutcome {
        match key {
            EditKey::Enter {
                newline_modifier: true,
            } => {
                self.apply(InputEdit::Insert('\n'));
                KeyOutcome::Newline
            }
            EditKey::Enter {
                newline_modifier: false,
            } => KeyOutcome::Submit,
        }
    }

    /// Empty the widget and drop back to a single row.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.changed();
    }

    /// Wrapped row count of the current value at the current width, in
    /// terminal columns.
    pub fn content_rows(&self) -> u16 {
        let rows = wrap_chars(&self.value, self.wrap_width).len();
        rows.min(u16::MAX as usize) as u16
    }

    // Single place that reacts to a value change: grow, then enable.
    fn changed(&mut self) {
        let content = self.content_rows().saturating_mul(ROW_HEIGHT);
        self.height = content.min(MAX_HEIGHT);
        self.submit_enabled = !self.value.trim().is_empty();
    }
}

/// Owns the welcome and chat widgets.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    welcome: InputWidget,
    chat: InputWidget,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widget(&self, target: InputTarget) -> &InputWidget {
        match target {
            InputTarget::Welcome => &self.welcome,
            InputTarget::Chat => &self.chat,
        }
    }

    pub fn widget_mut(&mut self, target: InputTarget) -> &mut InputWidget {
        match target {
            InputTarget::Welcome => &mut self.welcome,
            InputTarget::Chat => &mut self.chat,
        }
    }

    /// The widget visible in `mode`.
    pub fn active(&self, mode: ViewMode) -> &InputWidget {
        self.widget(mode.into())
    }

    pub fn active_mut(&mut self, mode: ViewMode) -> &mut InputWidget {
        self.widget_mut(mode.into())
    }

    /// Write a preset into the visible widget. Returns the widget that
    /// should take focus.
    pub fn apply_suggestion(&mut self, mode: ViewMode, text: &str) -> InputTarget {
        let target = InputTarget::from(mode);
        self.widget_mut(target).set_value(text);
        target
    }
}
