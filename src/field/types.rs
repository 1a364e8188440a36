//! Core types for the field component.

use bubbletea_rs::Msg;

/// Clipboard paste message carrying raw text.
#[derive(Debug, Clone)]
pub struct PasteMsg(pub String);

/// Clipboard paste error message.
#[derive(Debug, Clone)]
pub struct PasteErrMsg(pub String);

/// Sent after the field was submitted with enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedMsg {
    /// Id of the submitting field.
    pub id: usize,
    /// Value at the time of submission.
    pub value: String,
    /// Action configured on the field.
    pub action: InputAction,
}

/// Called with the field value on submit.
pub type SubmitFunc = Box<dyn Fn(&str) + Send>;

/// The kind of value the field collects. Every kind except [`InputKind::Text`]
/// restricts the characters a user can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Free text.
    #[default]
    Text,
    /// Digits with sign and decimal separators.
    Number,
    /// Digits and the usual phone punctuation.
    Phone,
    /// An e-mail address; whitespace is rejected.
    Email,
    /// A URL; whitespace is rejected.
    Url,
}

impl InputKind {
    /// Whether a user may enter `c` into a field of this kind.
    pub fn accepts(self, c: char) -> bool {
        match self {
            InputKind::Text => true,
            InputKind::Number => c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | ','),
            InputKind::Phone => c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '),
            InputKind::Email | InputKind::Url => !c.is_whitespace(),
        }
    }
}

/// What submitting the field means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputAction {
    /// Input is complete.
    #[default]
    Done,
    /// Move focus to the next input.
    Next,
    /// Move focus to the previous input.
    Previous,
    /// Run a search with the value.
    Search,
    /// Navigate to the value.
    Go,
    /// Send the value.
    Send,
    /// No particular meaning; the field keeps focus after submit.
    Unspecified,
}

impl InputAction {
    /// Whether submitting with this action releases focus.
    pub fn releases_focus(self) -> bool {
        self != InputAction::Unspecified
    }
}

/// Horizontal placement of the value inside a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl From<PasteMsg> for Msg {
    fn from(msg: PasteMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<PasteErrMsg> for Msg {
    fn from(msg: PasteErrMsg) -> Self {
        Box::new(msg) as Msg
    }
}
