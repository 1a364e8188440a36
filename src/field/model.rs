//! Core model for the field component.

use super::format::InputFormatter;
use super::keymap::{default_key_map, KeyMap};
use super::types::{Align, InputAction, InputKind, PasteErrMsg, PasteMsg, SubmitFunc};
use crate::cursor::{new as cursor_new, Model as Cursor};
use bubbletea_rs::{tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// Styles of the field.
#[derive(Debug, Clone)]
pub struct FieldStyles {
    /// Style of the prompt prefix.
    pub prompt: Style,
    /// Style of the value.
    pub text: Style,
    /// Style of the placeholder.
    pub placeholder: Style,
}

impl Default for FieldStyles {
    fn default() -> Self {
        Self {
            prompt: Style::new(),
            text: Style::new(),
            placeholder: Style::new().foreground(Color::from("240")),
        }
    }
}

/// A single-line text input.
///
/// The field owns the query text of an autocomplete widget, but it is a
/// complete input on its own:
///
/// ```rust
/// use bubbletea_autocomplete::field::{new, Align, InputKind};
///
/// let mut field = new();
/// field.set_placeholder("Search fruit...");
/// field.set_width(20);
/// field.set_align(Align::Left);
/// field.set_kind(InputKind::Text);
/// field.set_max_length(40);
/// let _blink = field.focus();
/// assert!(field.focused());
/// ```
pub struct Model {
    /// Error reported by the last paste attempt.
    pub err: Option<String>,

    /// Prompt displayed before the value.
    pub prompt: String,
    /// Placeholder displayed while the value is empty.
    pub placeholder: String,
    /// Field styles.
    pub styles: FieldStyles,
    /// Caret.
    pub cursor: Cursor,
    /// Key bindings.
    pub key_map: KeyMap,

    pub(super) id: usize,
    pub(super) value: Vec<char>,
    pub(super) focus: bool,
    pub(super) pos: usize,
    /// Visible columns for the value; 0 sizes the field to its content.
    pub(super) width: usize,
    /// Maximum number of characters; 0 means unlimited.
    pub(super) max_length: usize,
    pub(super) kind: InputKind,
    pub(super) action: InputAction,
    pub(super) align: Align,
    pub(super) formatters: Vec<Box<dyn InputFormatter>>,
    pub(super) on_submitted: Option<SubmitFunc>,

    // horizontal scroll window over `value`
    pub(super) offset: usize,
    pub(super) offset_right: usize,
}

/// Creates an unfocused field with default settings.
pub fn new() -> Model {
    Model {
        err: None,
        prompt: "> ".to_string(),
        placeholder: String::new(),
        styles: FieldStyles::default(),
        cursor: cursor_new(),
        key_map: default_key_map(),
        id: next_id(),
        value: Vec::new(),
        focus: false,
        pos: 0,
        width: 0,
        max_length: 0,
        kind: InputKind::Text,
        action: InputAction::Done,
        align: Align::Left,
        formatters: Vec::new(),
        on_submitted: None,
        offset: 0,
        offset_right: 0,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("pos", &self.pos)
            .field("focus", &self.focus)
            .field("kind", &self.kind)
            .field("action", &self.action)
            .field("formatters", &self.formatters.len())
            .finish()
    }
}

/// Reads the system clipboard on the runtime's next tick.
///
/// Yields `PasteMsg` with the clipboard text or `PasteErrMsg` with the
/// reason it could not be read.
pub fn paste() -> Cmd {
    tick(Duration::from_nanos(1), |_| match read_clipboard() {
        Ok(text) => Box::new(PasteMsg(text)) as Msg,
        Err(reason) => {
            tracing::debug!(error = %reason, "clipboard read failed");
            Box::new(PasteErrMsg(reason)) as Msg
        }
    })
}

#[cfg(feature = "clipboard-support")]
fn read_clipboard() -> Result<String, String> {
    use clipboard::{ClipboardContext, ClipboardProvider};
    let mut ctx: ClipboardContext =
        ClipboardProvider::new().map_err(|e| format!("clipboard unavailable: {e}"))?;
    ctx.get_contents()
        .map_err(|e| format!("clipboard has no text: {e}"))
}

#[cfg(not(feature = "clipboard-support"))]
fn read_clipboard() -> Result<String, String> {
    Err("built without clipboard-support".to_string())
}

impl Model {
    /// Identifier carried by messages this field emits.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Sets the number of visible columns; 0 sizes the field to its content.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.handle_overflow();
    }

    /// Visible columns, 0 when sized to content.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Limits the value to `limit` characters; 0 removes the limit.
    ///
    /// The limit applies to user input; a longer value is cut immediately.
    pub fn set_max_length(&mut self, limit: usize) {
        self.max_length = limit;
        if limit > 0 && self.value.len() > limit {
            self.value.truncate(limit);
            self.pos = self.pos.min(limit);
            self.handle_overflow();
        }
    }

    /// The character limit, 0 when unlimited.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Sets the kind of value collected.
    pub fn set_kind(&mut self, kind: InputKind) {
        self.kind = kind;
    }

    /// Kind of value collected.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Sets what submitting means.
    pub fn set_action(&mut self, action: InputAction) {
        self.action = action;
    }

    /// What submitting means.
    pub fn action(&self) -> InputAction {
        self.action
    }

    /// Sets the alignment inside a fixed width.
    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    /// Alignment inside a fixed width.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Appends a formatter to the chain run on every user edit.
    pub fn add_formatter(&mut self, formatter: impl InputFormatter + 'static) {
        self.formatters.push(Box::new(formatter));
    }

    /// Removes every formatter.
    pub fn clear_formatters(&mut self) {
        self.formatters.clear();
    }

    /// Sets the callback invoked with the value on submit.
    pub fn set_on_submitted(&mut self, f: impl Fn(&str) + Send + 'static) {
        self.on_submitted = Some(Box::new(f));
    }

    pub(super) fn record_paste_error(&mut self, err: &PasteErrMsg) {
        tracing::debug!(id = self.id, error = %err.0, "paste failed");
        self.err = Some(err.0.clone());
    }
}
