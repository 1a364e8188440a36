//! Editing, movement and message handling for the field.

use super::format::{InputFormatter, LengthLimit, SingleLine};
use super::model::{paste, Model};
use super::types::{PasteErrMsg, PasteMsg, SubmittedMsg};
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Replaces the value. Formatters are not consulted; the length limit is.
    /// The cursor moves to the end.
    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().collect();
        if self.max_length > 0 {
            runes.truncate(self.max_length);
        }
        self.value = runes;
        self.pos = self.value.len();
        self.handle_overflow();
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Moves the cursor to the start.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.set_cursor(0);
    }

    /// Whether the field takes keyboard input.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Focuses the field; returns the caret's blink command.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.cursor.focus()
    }

    /// Releases focus.
    pub fn blur(&mut self) {
        self.focus = false;
        self.cursor.blur();
    }

    /// Submits the value: runs the submit callback, releases focus unless
    /// the action is `Unspecified`, and returns a command yielding
    /// [`SubmittedMsg`].
    pub fn submit(&mut self) -> Cmd {
        let value = self.value();
        if let Some(on_submitted) = &self.on_submitted {
            on_submitted(&value);
        }
        let action = self.action;
        if action.releases_focus() {
            self.blur();
        }
        tracing::debug!(id = self.id, ?action, "field submitted");

        let id = self.id;
        Box::pin(async move { Some(Box::new(SubmittedMsg { id, value, action }) as Msg) })
    }

    /// Handles keys, paste results and caret blinks. Ignores everything
    /// while blurred.
    ///
    /// ```rust
    /// use bubbletea_autocomplete::field::new;
    /// use bubbletea_rs::KeyMsg;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let mut field = new();
    /// let _ = field.focus();
    /// field.update(Box::new(KeyMsg { key: KeyCode::Char('h'), modifiers: KeyModifiers::NONE }));
    /// assert_eq!(field.value(), "h");
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.key_map.submit) {
                return Some(self.submit());
            }
            if matches_binding(key_msg, &self.key_map.paste) {
                return Some(paste());
            }
            if !self.handle_deletion_keys(key_msg) && !self.handle_movement_keys(key_msg) {
                self.handle_character_input(key_msg);
            }
            return None;
        }

        if let Some(paste_msg) = msg.downcast_ref::<PasteMsg>() {
            self.err = None;
            let runes: Vec<char> = paste_msg.0.chars().collect();
            self.insert_runes_from_user_input(runes);
            return None;
        }

        if let Some(paste_err) = msg.downcast_ref::<PasteErrMsg>() {
            self.record_paste_error(paste_err);
            return None;
        }

        self.cursor.update(&msg)
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let km = &self.key_map;
        if matches_binding(key_msg, &km.delete_word_backward) {
            let start = self.word_start_before(self.pos);
            self.delete_range(start, self.pos);
        } else if matches_binding(key_msg, &km.delete_character_backward) {
            if self.pos > 0 {
                self.delete_range(self.pos - 1, self.pos);
            }
        } else if matches_binding(key_msg, &km.delete_character_forward) {
            if self.pos < self.value.len() {
                self.delete_range(self.pos, self.pos + 1);
            }
        } else if matches_binding(key_msg, &km.delete_after_cursor) {
            self.delete_range(self.pos, self.value.len());
        } else if matches_binding(key_msg, &km.delete_before_cursor) {
            self.delete_range(0, self.pos);
        } else if matches_binding(key_msg, &km.delete_word_forward) {
            let end = self.word_end_after(self.pos);
            self.delete_range(self.pos, end);
        } else {
            return false;
        }
        true
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let km = &self.key_map;
        if matches_binding(key_msg, &km.word_backward) {
            self.set_cursor(self.word_start_before(self.pos));
        } else if matches_binding(key_msg, &km.character_backward) {
            self.set_cursor(self.pos.saturating_sub(1));
        } else if matches_binding(key_msg, &km.word_forward) {
            self.set_cursor(self.word_end_after(self.pos));
        } else if matches_binding(key_msg, &km.character_forward) {
            self.set_cursor(self.pos + 1);
        } else if matches_binding(key_msg, &km.line_start) {
            self.cursor_start();
        } else if matches_binding(key_msg, &km.line_end) {
            self.cursor_end();
        } else {
            return false;
        }
        true
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) {
        if let KeyCode::Char(ch) = key_msg.key {
            if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                && !key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                self.insert_runes_from_user_input(vec![ch]);
            }
        }
    }

    /// Inserts user text at the cursor, honouring the input kind, the
    /// length limit and the formatter chain.
    pub(super) fn insert_runes_from_user_input(&mut self, runes: Vec<char>) {
        let runes = SingleLine.format(&[], runes);
        let runes: Vec<char> = runes.into_iter().filter(|c| self.kind.accepts(*c)).collect();
        if runes.is_empty() {
            return;
        }

        let mut candidate = self.value[..self.pos].to_vec();
        candidate.extend_from_slice(&runes);
        let new_pos = candidate.len();
        candidate.extend_from_slice(&self.value[self.pos..]);

        self.commit_edit(candidate, new_pos);
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let mut candidate = self.value.clone();
        candidate.drain(start..end);
        self.commit_edit(candidate, start);
    }

    /// Runs the formatter chain over an edit and applies the result.
    /// Returns whether the value changed.
    fn commit_edit(&mut self, candidate: Vec<char>, pos: usize) -> bool {
        let mut next = candidate;
        for formatter in &self.formatters {
            next = formatter.format(&self.value, next);
        }
        if self.max_length > 0 {
            next = LengthLimit(self.max_length).format(&self.value, next);
        }
        if next == self.value {
            return false;
        }
        self.value = next;
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
        true
    }

    fn word_start_before(&self, pos: usize) -> usize {
        let mut i = pos;
        while i > 0 && self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        while i > 0 && !self.value[i - 1].is_whitespace() {
            i -= 1;
        }
        i
    }

    fn word_end_after(&self, pos: usize) -> usize {
        let mut i = pos;
        while i < self.value.len() && self.value[i].is_whitespace() {
            i += 1;
        }
        while i < self.value.len() && !self.value[i].is_whitespace() {
            i += 1;
        }
        i
    }

    /// Keeps the cursor inside the visible window of a fixed-width field.
    pub(super) fn handle_overflow(&mut self) {
        // One column is reserved for the caret at the end of the value.
        let visible = self.width.saturating_sub(1);
        if self.width == 0 || self.value.len() <= visible {
            self.offset = 0;
            self.offset_right = self.value.len();
            return;
        }

        self.offset_right = self.offset_right.min(self.value.len());
        if self.offset_right < self.offset + visible {
            self.offset_right = (self.offset + visible).min(self.value.len());
            self.offset = self.offset_right.saturating_sub(visible);
        }

        if self.pos < self.offset {
            self.offset = self.pos;
            self.offset_right = (self.offset + visible).min(self.value.len());
        } else if self.pos >= self.offset_right {
            self.offset_right = self.pos.min(self.value.len());
            if self.pos == self.value.len() {
                self.offset = self.offset_right.saturating_sub(visible);
            } else {
                self.offset_right += 1;
                self.offset = self.offset_right.saturating_sub(visible);
            }
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self)
    }

    fn blur(&mut self) {
        Model::blur(self)
    }

    fn focused(&self) -> bool {
        Model::focused(self)
    }
}
