//! Text field with a suggestion popup.
//!
//! Focusing the field opens a popup next to it and fetches suggestions for the
//! current text from a [`SuggestionSource`](crate::source::SuggestionSource).
//! Typing restarts a debounce timer, and every timer that runs out fetches
//! again for the latest text. Results of superseded fetches are dropped.
//! Choosing a suggestion (arrow keys then enter, or [`Model::select`]) writes
//! its display value into the field, closes the popup and releases focus.
//!
//! ## Wiring into an application
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{self, SelectedMsg};
//! use bubbletea_autocomplete::source::fuzzy;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     fruit: autocomplete::Model<String>,
//!     chosen: Option<String>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut fruit = autocomplete::new(fuzzy(["Apple", "Grape", "Banana"]))
//!             .with_on_loading("Loading...");
//!         let cmd = fruit.focus();
//!         (Self { fruit, chosen: None }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(selected) = msg.downcast_ref::<SelectedMsg>() {
//!             self.chosen = Some(selected.value.clone());
//!             return None;
//!         }
//!         self.fruit.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.fruit.view()
//!     }
//! }
//! ```
//!
//! ## Custom items
//!
//! Items need not be strings. Supply a row builder and a mapping from item to
//! field text:
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete;
//! use bubbletea_autocomplete::source::from_fn;
//!
//! #[derive(Clone)]
//! struct City {
//!     name: &'static str,
//!     country: &'static str,
//! }
//!
//! let cities = from_fn(|query: String| async move {
//!     let all = [City { name: "Lyon", country: "FR" }, City { name: "Lima", country: "PE" }];
//!     Ok(all
//!         .into_iter()
//!         .filter(|c| c.name.to_lowercase().starts_with(&query.to_lowercase()))
//!         .collect())
//! });
//!
//! let input = autocomplete::with_builders(
//!     cities,
//!     |c: &City| format!("{} ({})", c.name, c.country),
//!     |c: &City| c.name.to_string(),
//! );
//! # let _ = input;
//! ```

pub mod keymap;
pub mod model;
pub mod types;
pub mod update;
pub mod view;

#[cfg(test)]
mod tests;

pub use keymap::{default_key_map, KeyMap};
pub use model::{new, with_builders, Model};
pub use types::{ItemViewFunc, Options, PopupState, SelectFunc, SelectedMsg, SuggestionsMsg};
