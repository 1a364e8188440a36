//! Messages, state and options of the autocomplete component.

use crate::debounce::DEFAULT_DELAY;
use crate::menu::Menu;
use crate::overlay::{MenuConstraints, Offset, Placement};
use crate::source::FetchError;
use std::time::Duration;

/// Renders one suggestion row.
pub type ItemViewFunc<T> = Box<dyn Fn(&T) -> String + Send>;

/// Maps the chosen suggestion to the text written into the field.
pub type SelectFunc<T> = Box<dyn Fn(&T) -> String + Send>;

/// Result of a suggestion fetch.
#[derive(Debug)]
pub struct SuggestionsMsg<T> {
    /// Widget that issued the fetch.
    pub id: usize,
    /// Fetch generation; only the latest one is applied.
    pub generation: u64,
    /// Query the fetch ran with.
    pub query: String,
    /// Items or the reason there are none.
    pub result: Result<Vec<T>, FetchError>,
}

/// Sent after a suggestion was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMsg {
    /// Widget the suggestion was chosen in.
    pub id: usize,
    /// Index of the chosen suggestion in the menu.
    pub index: usize,
    /// Text written into the field.
    pub value: String,
}

/// Whether the popup exists.
#[derive(Debug)]
pub enum PopupState<T> {
    /// No popup.
    Closed,
    /// The popup is up with this menu.
    Open(Menu<T>),
}

impl<T> PopupState<T> {
    /// Whether the popup is up.
    pub fn is_open(&self) -> bool {
        matches!(self, PopupState::Open(_))
    }

    /// The menu of an open popup.
    pub fn menu(&self) -> Option<&Menu<T>> {
        match self {
            PopupState::Open(menu) => Some(menu),
            PopupState::Closed => None,
        }
    }

    pub(super) fn menu_mut(&mut self) -> Option<&mut Menu<T>> {
        match self {
            PopupState::Open(menu) => Some(menu),
            PopupState::Closed => None,
        }
    }
}

/// Behaviour and layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Quiet time after the last edit before a fetch is issued.
    pub debounce: Duration,
    /// Upper bound on a fetch; `None` waits forever.
    pub fetch_timeout: Option<Duration>,
    /// Side of the field the popup opens on.
    pub placement: Placement,
    /// Distance between field and popup.
    pub offset: Offset,
    /// Size bounds of the menu.
    pub constraints: MenuConstraints,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DELAY,
            fetch_timeout: None,
            placement: Placement::Below,
            offset: Offset::default(),
            constraints: MenuConstraints::default(),
        }
    }
}
