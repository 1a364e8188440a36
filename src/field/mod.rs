//! Single-line text input used as the query field of the autocomplete.
//!
//! The field carries the usual text-input options: kind of value, submit
//! action, alignment, a length limit, input formatters and a submit callback.
//!
//! ```rust
//! use bubbletea_autocomplete::field::{format::allow, new, InputAction};
//!
//! let mut field = new();
//! field.set_action(InputAction::Search);
//! field.add_formatter(allow(|c| c.is_alphanumeric() || c == ' '));
//! field.set_on_submitted(|value| println!("searching for {value}"));
//! ```

pub mod editing;
pub mod format;
pub mod keymap;
pub mod model;
pub mod types;
pub mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{new, paste, FieldStyles, Model};
pub use types::{
    Align, InputAction, InputKind, PasteErrMsg, PasteMsg, SubmitFunc, SubmittedMsg,
};
