//! Terminal-agnostic keyboard input and the input line.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Logical commands bound to keys. Keys without a command edit the input
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Focus the next buffer in presentation order.
    NavigateNext,
    /// Focus the previous buffer in presentation order.
    NavigatePrevious,
    /// Send the input line to the focused buffer.
    Submit,
    /// Quit the application.
    Quit,
}

impl KeyInput {
    /// Command bound to this key, if any.
    pub fn command(self) -> Option<InputCommand> {
        match self {
            Self::Right | Self::Tab => Some(InputCommand::NavigateNext),
            Self::Left | Self::BackTab => Some(InputCommand::NavigatePrevious),
            Self::Enter => Some(InputCommand::Submit),
            Self::Esc => Some(InputCommand::Quit),
            Self::Char(_)
            | Self::Backspace
            | Self::Delete
            | Self::Up
            | Self::Down
            | Self::Home
            | Self::End => None,
        }
    }
}

/// Single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    /// Cursor position in characters, `0..=len`.
    cursor: usize,
}

impl InputLine {
    /// Create an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an editing key. Returns `true` if the line or cursor changed.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        let len = self.text.chars().count();
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                true
            },
            KeyInput::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                true
            },
            KeyInput::Delete if self.cursor < len => {
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                true
            },
            KeyInput::Home if self.cursor > 0 => {
                self.cursor = 0;
                true
            },
            KeyInput::End if self.cursor < len => {
                self.cursor = len;
                true
            },
            _ => false,
        }
    }

    /// Clear the line.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text.char_indices().nth(chars).map_or(self.text.len(), |(at, _)| at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputLine {
        let mut line = InputLine::new();
        for c in text.chars() {
            line.edit(KeyInput::Char(c));
        }
        line
    }

    #[test]
    fn navigation_keys_map_to_commands() {
        assert_eq!(KeyInput::Right.command(), Some(InputCommand::NavigateNext));
        assert_eq!(KeyInput::Tab.command(), Some(InputCommand::NavigateNext));
        assert_eq!(KeyInput::Left.command(), Some(InputCommand::NavigatePrevious));
        assert_eq!(KeyInput::BackTab.command(), Some(InputCommand::NavigatePrevious));
        assert_eq!(KeyInput::Enter.command(), Some(InputCommand::Submit));
        assert_eq!(KeyInput::Char('x').command(), None);
    }

    #[test]
    fn char_input_adds_to_line() {
        let line = typed("hi");

        assert_eq!(line.text(), "hi");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut line = typed("ab");

        assert!(line.edit(KeyInput::Backspace));
        assert_eq!(line.text(), "a");
        assert_eq!(line.cursor(), 1);
    }

    #[test]
    fn editing_multibyte_text() {
        let mut line = typed("héé");
        line.edit(KeyInput::Home);
        line.edit(KeyInput::Delete);
        line.edit(KeyInput::End);
        line.edit(KeyInput::Backspace);

        assert_eq!(line.text(), "é");
        assert_eq!(line.cursor(), 1);
    }

    #[test]
    fn noop_edits_report_unchanged() {
        let mut line = InputLine::new();

        assert!(!line.edit(KeyInput::Backspace));
        assert!(!line.edit(KeyInput::Delete));
        assert!(!line.edit(KeyInput::Up));
    }

    #[test]
    fn clear_empties_line() {
        let mut line = typed("hello");

        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.cursor(), 0);
    }
}
