//! Key bindings for navigating the suggestion menu.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Menu bindings. Keys not bound here go to the field.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the next suggestion.
    pub next: Binding,
    /// Highlight the previous suggestion.
    pub prev: Binding,
    /// Choose the highlighted suggestion.
    pub accept: Binding,
    /// Close the popup and release focus.
    pub dismiss: Binding,
}

/// Default menu bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next: new_binding(vec![
            with_keys_str(&["down", "ctrl+n"]),
            with_help("↓/ctrl+n", "next"),
        ]),
        prev: new_binding(vec![
            with_keys_str(&["up", "ctrl+p"]),
            with_help("↑/ctrl+p", "previous"),
        ]),
        accept: new_binding(vec![
            with_keys_str(&["enter", "tab"]),
            with_help("enter/tab", "choose"),
        ]),
        dismiss: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "close")]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.prev, &self.accept, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.next, &self.prev], vec![&self.accept, &self.dismiss]]
    }
}
