//! Single-line text field shared by the login and contact forms.

use std::borrow::Cow;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const MASK_CHAR: char = '•';

#[derive(Debug, Clone)]
pub struct TextField {
    label: &'static str,
    value: String,
    /// Cursor position in chars.
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            masked: false,
        }
    }

    /// A field whose content is rendered as bullets (password input).
    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text as it should appear on screen.
    pub fn display_value(&self) -> Cow<'_, str> {
        if self.masked {
            Cow::Owned(std::iter::repeat_n(MASK_CHAR, self.char_len()).collect())
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into().replace(['\n', '\r'], "");
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts text at the cursor. Line breaks are dropped.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    /// Backspace semantics.
    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index(self.cursor - 1);
        let end = self.byte_index(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Delete key semantics.
    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// Applies an editing key. Returns true if the key was consumed.
    ///
    /// Enter, Tab and arrow Up/Down are left to the form for focus handling.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => return false,
        }
        true
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, col: usize) -> usize {
        self.value
            .char_indices()
            .nth(col)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_editing_multibyte() {
        let mut field = TextField::new("Nome:");
        for ch in "Joao".chars() {
            field.input(key(KeyCode::Char(ch)));
        }
        field.input(key(KeyCode::Left));
        field.input(key(KeyCode::Backspace));
        field.input(key(KeyCode::Char('ã')));
        assert_eq!(field.value(), "João");
        assert_eq!(field.cursor(), 3);

        field.input(key(KeyCode::Home));
        field.input(key(KeyCode::Delete));
        assert_eq!(field.value(), "oão");
    }

    #[test]
    fn test_masked_field_hides_value() {
        let mut field = TextField::masked("Senha");
        field.insert_str("segredo");
        assert_eq!(field.value(), "segredo");
        assert_eq!(field.display_value(), "•••••••");
        assert!(!field.display_value().contains("segredo"));
    }

    #[test]
    fn test_focus_keys_are_not_consumed() {
        let mut field = TextField::new("Email");
        assert!(!field.input(key(KeyCode::Enter)));
        assert!(!field.input(key(KeyCode::Tab)));
        assert!(!field.input(key(KeyCode::Up)));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut field = TextField::new("Telefone:");
        field.insert_str("555\n-1234\r");
        assert_eq!(field.value(), "555-1234");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = TextField::new("Email");
        field.set_value("ana@example.com");
        field.input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);
    }
}
