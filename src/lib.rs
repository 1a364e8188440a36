#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-autocomplete/")]

//! # bubbletea-autocomplete
//!
//! An autocomplete text input for [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs)
//! applications: a single-line field with a popup of suggestions that follows
//! what the user types.
//!
//! ## Overview
//!
//! - Focusing the field opens the popup and fetches suggestions for the
//!   current text.
//! - Typing restarts a debounce timer; when the user pauses, suggestions are
//!   fetched again for the latest text. Results of superseded fetches are
//!   dropped.
//! - Choosing a suggestion writes its display value into the field, closes
//!   the popup and releases focus.
//! - A failed or timed-out fetch shows an error row instead of suggestions.
//!
//! Every component follows the Elm Architecture used by bubbletea-rs: state
//! changes happen in `update()`, side effects are returned as commands and
//! `view()` renders a string.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`autocomplete`] | The field and popup wired together |
//! | [`field`] | Single-line text input with kinds, actions and formatters |
//! | [`source`] | Suggestion sources: async closures and a fuzzy in-memory list |
//! | [`menu`] | Suggestion rows, highlight and scrolling |
//! | [`overlay`] | Popup placement relative to the field |
//! | [`debounce`] | Cancel-and-restart timer |
//! | [`cursor`] | Blinking caret |
//! | [`key`] | Key bindings |
//!
//! ## Quick start
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     fruit: Autocomplete<String>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut fruit = autocomplete_new(fuzzy(["Apple", "Grape", "Banana"]))
//!             .with_on_loading("Loading...");
//!         let cmd = fruit.focus();
//!         (Self { fruit }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.fruit.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Fruit:\n{}", self.fruit.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Components emit [`tracing`](https://docs.rs/tracing) events at `debug` and
//! `trace` level: popup transitions, fetches, stale results and selections.
//! Install any subscriber to see them.

pub mod autocomplete;
pub mod cursor;
pub mod debounce;
pub mod field;
pub mod key;
pub mod menu;
pub mod overlay;
pub mod source;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Lets an application move keyboard focus between components without
/// knowing their concrete types.
///
/// - `focus()` sets the focused state and may return a command, such as a
///   caret blink timer or a suggestion fetch.
/// - `blur()` clears the focused state and releases focus-bound resources.
/// - `focused()` reports the current state.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// fn toggle<C: Component>(c: &mut C) {
///     if c.focused() {
///         c.blur();
///     } else {
///         let _ = c.focus();
///     }
/// }
///
/// let mut input = field_new();
/// toggle(&mut input);
/// assert!(input.focused());
/// toggle(&mut input);
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. The returned command, if any,
    /// must be handed to the runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use autocomplete::{
    new as autocomplete_new, with_builders as autocomplete_with_builders,
    KeyMap as AutocompleteKeyMap, Model as Autocomplete, Options as AutocompleteOptions,
    PopupState, SelectedMsg, SuggestionsMsg,
};
pub use cursor::Model as Cursor;
pub use debounce::{DebounceMsg, Debouncer};
pub use field::{
    new as field_new, Align, FieldStyles, InputAction, InputKind, KeyMap as FieldKeyMap,
    Model as Field, PasteErrMsg, PasteMsg, SubmittedMsg,
};
pub use key::{matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding, KeyPress};
pub use menu::{Menu, MenuStatus, MenuStyles};
pub use overlay::{Layer, MenuConstraints, Offset, Overlay, Placement, Rect};
pub use source::{from_fn, fuzzy, FetchError, FnSource, FuzzySource, SuggestionSource};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// let input: Autocomplete<String> = autocomplete_new(fuzzy(["one", "two"]))
///     .with_placement(Placement::Above);
/// assert!(!input.focused());
/// ```
pub mod prelude {
    pub use crate::autocomplete::{
        new as autocomplete_new, with_builders as autocomplete_with_builders,
        KeyMap as AutocompleteKeyMap, Model as Autocomplete, Options as AutocompleteOptions,
        PopupState, SelectedMsg,
    };
    pub use crate::field::{
        new as field_new, Align, InputAction, InputKind, Model as Field, SubmittedMsg,
    };
    pub use crate::key::{matches_binding, Binding, KeyMap};
    pub use crate::menu::{MenuStatus, MenuStyles};
    pub use crate::overlay::{MenuConstraints, Offset, Overlay, Placement, Rect};
    pub use crate::source::{from_fn, fuzzy, FetchError, SuggestionSource};
    pub use crate::Component;
}
