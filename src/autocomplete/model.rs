//! Construction and configuration of the autocomplete component.

use super::keymap::{default_key_map, KeyMap};
use super::types::{ItemViewFunc, Options, PopupState, SelectFunc};
use crate::debounce::Debouncer;
use crate::field;
use crate::menu::MenuStyles;
use crate::overlay::{Layer, MenuConstraints, Offset, Overlay, Placement, Rect};
use crate::source::SuggestionSource;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// A text field with a debounced, asynchronously filled suggestion popup.
///
/// Focusing the field opens the popup and fetches suggestions for the current
/// text. Edits restart a debounce timer; when it elapses the suggestions are
/// fetched again for the latest text. Choosing a suggestion writes its
/// display value into the field, closes the popup and releases focus.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete;
/// use bubbletea_autocomplete::overlay::{MenuConstraints, Placement};
/// use bubbletea_autocomplete::source::fuzzy;
/// use std::time::Duration;
///
/// let search = autocomplete::new(fuzzy(["Apple", "Grape", "Banana"]))
///     .with_debounce(Duration::from_millis(150))
///     .with_placement(Placement::Below)
///     .with_constraints(MenuConstraints { min_width: 12, max_width: 30, max_height: 5 })
///     .with_on_loading("Searching...");
/// assert!(!search.is_open());
/// ```
pub struct Model<T> {
    /// Menu key bindings.
    pub key_map: KeyMap,
    /// Menu styles.
    pub styles: MenuStyles,

    pub(super) field: field::Model,
    pub(super) source: Arc<dyn SuggestionSource<T>>,
    pub(super) item_view: ItemViewFunc<T>,
    pub(super) on_selected: SelectFunc<T>,
    pub(super) on_loading: Option<String>,
    pub(super) options: Options,
    pub(super) overlay: Box<dyn Overlay>,
    pub(super) popup: PopupState<T>,
    pub(super) debouncer: Debouncer,
    pub(super) generation: u64,
    pub(super) disposed: bool,
}

/// Creates an autocomplete whose rows and selected values use the items'
/// `Display` output.
pub fn new<T, S>(source: S) -> Model<T>
where
    T: Display + Send + 'static,
    S: SuggestionSource<T> + 'static,
{
    with_builders(source, |item: &T| item.to_string(), |item: &T| item.to_string())
}

/// Creates an autocomplete with explicit row rendering and selection mapping.
pub fn with_builders<T, S>(
    source: S,
    item_view: impl Fn(&T) -> String + Send + 'static,
    on_selected: impl Fn(&T) -> String + Send + 'static,
) -> Model<T>
where
    T: Send + 'static,
    S: SuggestionSource<T> + 'static,
{
    let field = field::new();
    let options = Options::default();
    let mut overlay = Layer::new();
    overlay.position(options.placement, options.offset);

    Model {
        key_map: default_key_map(),
        styles: MenuStyles::default(),
        debouncer: Debouncer::new(field.id(), options.debounce),
        field,
        source: Arc::new(source),
        item_view: Box::new(item_view),
        on_selected: Box::new(on_selected),
        on_loading: None,
        options,
        overlay: Box::new(overlay),
        popup: PopupState::Closed,
        generation: 0,
        disposed: false,
    }
}

impl<T: Send + 'static> Model<T> {
    /// Replaces the row renderer.
    pub fn with_item_view(mut self, f: impl Fn(&T) -> String + Send + 'static) -> Self {
        self.item_view = Box::new(f);
        self
    }

    /// Replaces the mapping from chosen item to field text.
    pub fn with_on_selected(mut self, f: impl Fn(&T) -> String + Send + 'static) -> Self {
        self.on_selected = Box::new(f);
        self
    }

    /// Shows `view` in the popup while a fetch is pending.
    pub fn with_on_loading(mut self, view: impl Into<String>) -> Self {
        self.on_loading = Some(view.into());
        self
    }

    /// Applies a full set of options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.debouncer.set_delay(options.debounce);
        self.overlay.position(options.placement, options.offset);
        self.options = options;
        self
    }

    /// Sets the debounce delay.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.options.debounce = delay;
        self.debouncer.set_delay(delay);
        self
    }

    /// Bounds every fetch; a fetch that takes longer fails with
    /// `FetchError::TimedOut`.
    pub fn with_fetch_timeout(mut self, limit: Duration) -> Self {
        self.options.fetch_timeout = Some(limit);
        self
    }

    /// Opens the popup above or below the field.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.options.placement = placement;
        self.overlay.position(placement, self.options.offset);
        self
    }

    /// Moves the popup away from the field.
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.options.offset = offset;
        self.overlay.position(self.options.placement, offset);
        self
    }

    /// Sets the menu size bounds.
    pub fn with_constraints(mut self, constraints: MenuConstraints) -> Self {
        self.options.constraints = constraints;
        self
    }

    /// Sets the menu styles.
    pub fn with_styles(mut self, styles: MenuStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the popup layer.
    pub fn with_overlay(mut self, overlay: impl Overlay + 'static) -> Self {
        let mut overlay: Box<dyn Overlay> = Box::new(overlay);
        overlay.position(self.options.placement, self.options.offset);
        self.overlay = overlay;
        self
    }

    /// Configures the field in place.
    pub fn with_field(mut self, configure: impl FnOnce(&mut field::Model)) -> Self {
        configure(&mut self.field);
        self
    }

    /// Identifier carried by every message this widget emits.
    pub fn id(&self) -> usize {
        self.field.id()
    }

    /// The text field.
    pub fn field(&self) -> &field::Model {
        &self.field
    }

    /// The text field, for passthrough settings.
    pub fn field_mut(&mut self) -> &mut field::Model {
        &mut self.field
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current query text.
    pub fn value(&self) -> String {
        self.field.value()
    }

    /// Replaces the query text without scheduling a fetch.
    pub fn set_value(&mut self, value: &str) {
        self.field.set_value(value);
    }

    /// Popup state.
    pub fn popup(&self) -> &PopupState<T> {
        &self.popup
    }

    /// Whether the popup is up.
    pub fn is_open(&self) -> bool {
        self.popup.is_open()
    }

    /// Whether a debounce timer is pending.
    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether [`Model::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Tells the popup layer where the field sits on screen.
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.overlay.anchor_to(anchor);
    }

    /// Screen rectangle of the popup, if shown.
    pub fn popup_area(&self) -> Option<Rect> {
        self.overlay.area()
    }
}
