//! Popup state machine.
//!
//! `Closed -> Open` on focus, `Open -> Closed` on blur, selection, submit,
//! dismissal or disposal. While open, edits restart the debounce timer and
//! each elapsed timer issues a fetch for the latest text. Fetch results are
//! applied only if they belong to the newest fetch of an open popup.

use super::model::Model;
use super::types::{PopupState, SelectedMsg, SuggestionsMsg};
use crate::debounce::DebounceMsg;
use crate::key::matches_binding;
use crate::menu::{Menu, MenuStatus};
use crate::source::FetchError;
use crate::Component;
use bubbletea_rs::{batch, Cmd, KeyMsg, Msg};

fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
    match (a, b) {
        (Some(a), Some(b)) => Some(batch(vec![a, b])),
        (a, None) => a,
        (None, b) => b,
    }
}

impl<T: Send + 'static> Model<T> {
    /// Focuses the field and opens the popup with a fetch for the current
    /// text. Focusing an already open widget opens nothing new.
    pub fn focus(&mut self) -> Option<Cmd> {
        if self.disposed {
            return None;
        }
        let blink = self.field.focus();
        let fetch = self.open_popup();
        merge(blink, fetch)
    }

    /// Releases focus and closes the popup.
    pub fn blur(&mut self) {
        self.field.blur();
        self.close_popup();
    }

    /// Whether the field has focus.
    pub fn focused(&self) -> bool {
        self.field.focused()
    }

    /// Cancels the pending timer and closes the popup for good. Every later
    /// message is ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.blur();
        self.disposed = true;
        tracing::debug!(id = self.id(), "autocomplete disposed");
    }

    /// Chooses suggestion `index`: writes its display value into the field,
    /// closes the popup and releases focus. The returned command yields
    /// [`SelectedMsg`]. Returns `None` when the popup is closed or the index
    /// is out of range.
    pub fn select(&mut self, index: usize) -> Option<Cmd> {
        if self.disposed {
            return None;
        }
        let item = self.popup.menu()?.items().get(index)?;
        let value = (self.on_selected)(item);

        self.field.set_value(&value);
        self.blur();
        tracing::debug!(id = self.id(), index, "suggestion selected");

        let id = self.id();
        Some(Box::pin(async move {
            Some(Box::new(SelectedMsg { id, index, value }) as Msg)
        }))
    }

    /// Handles debounce timers, fetch results, keys and everything the field
    /// understands.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.disposed {
            return None;
        }

        if let Some(debounce) = msg.downcast_ref::<DebounceMsg>() {
            return self.on_debounce(debounce);
        }

        if msg.is::<SuggestionsMsg<T>>() {
            if let Ok(suggestions) = msg.downcast::<SuggestionsMsg<T>>() {
                self.apply_suggestions(*suggestions);
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.field.focused() {
                if let Some(cmd) = self.handle_menu_keys(key_msg) {
                    return cmd;
                }
            }
        }

        let was_focused = self.field.focused();
        let before = self.field.value();
        let cmd = self.field.update(msg);

        if was_focused && !self.field.focused() {
            // Submitted with a focus-releasing action.
            self.close_popup();
            return cmd;
        }
        if self.field.value() != before {
            let debounce = self.debouncer.schedule();
            return merge(cmd, Some(debounce));
        }
        cmd
    }

    fn on_debounce(&mut self, msg: &DebounceMsg) -> Option<Cmd> {
        if !self.debouncer.accept(msg) {
            return None;
        }
        if !self.popup.is_open() {
            return None;
        }
        tracing::debug!(id = self.id(), "debounce elapsed");
        let cmd = self.fetch();
        self.refresh_overlay();
        Some(cmd)
    }

    fn handle_menu_keys(&mut self, key_msg: &KeyMsg) -> Option<Option<Cmd>> {
        if matches_binding(key_msg, &self.key_map.dismiss) {
            self.blur();
            return Some(None);
        }

        // The loading row replaces the rows, so they cannot be navigated.
        let rows_hidden = self.on_loading.is_some();
        let menu = self.popup.menu_mut()?;
        if rows_hidden && *menu.status() == MenuStatus::Loading {
            return None;
        }
        if matches_binding(key_msg, &self.key_map.next) {
            menu.next();
        } else if matches_binding(key_msg, &self.key_map.prev) {
            menu.prev();
        } else if matches_binding(key_msg, &self.key_map.accept) {
            let index = menu.selected()?;
            return Some(self.select(index));
        } else {
            return None;
        }

        self.refresh_overlay();
        Some(None)
    }

    fn open_popup(&mut self) -> Option<Cmd> {
        if self.popup.is_open() {
            return None;
        }
        self.popup = PopupState::Open(Menu::loading(self.options.constraints.max_height));
        tracing::debug!(id = self.id(), "popup opened");
        let cmd = self.fetch();
        self.refresh_overlay();
        Some(cmd)
    }

    fn close_popup(&mut self) {
        self.debouncer.cancel();
        if let PopupState::Open(_) = std::mem::replace(&mut self.popup, PopupState::Closed) {
            self.overlay.hide();
            tracing::debug!(id = self.id(), "popup closed");
        }
    }

    /// Starts a fetch for the current text under a new generation.
    fn fetch(&mut self) -> Cmd {
        self.generation += 1;
        if let Some(menu) = self.popup.menu_mut() {
            menu.set_loading();
        }

        let id = self.id();
        let generation = self.generation;
        let query = self.field.value();
        let limit = self.options.fetch_timeout;
        let pending = self.source.fetch(query.clone());
        tracing::debug!(id, generation, query = %query, "fetching suggestions");

        Box::pin(async move {
            let result = match limit {
                Some(limit) => tokio::time::timeout(limit, pending)
                    .await
                    .unwrap_or_else(|_| Err(FetchError::TimedOut(limit))),
                None => pending.await,
            };
            Some(Box::new(SuggestionsMsg {
                id,
                generation,
                query,
                result,
            }) as Msg)
        })
    }

    fn apply_suggestions(&mut self, msg: SuggestionsMsg<T>) {
        if msg.id != self.id() {
            return;
        }
        if msg.generation != self.generation {
            tracing::trace!(
                id = msg.id,
                generation = msg.generation,
                current = self.generation,
                "stale suggestions dropped"
            );
            return;
        }
        let Some(menu) = self.popup.menu_mut() else {
            tracing::trace!(id = msg.id, "suggestions for closed popup dropped");
            return;
        };

        match msg.result {
            Ok(items) => {
                tracing::debug!(id = msg.id, query = %msg.query, count = items.len(), "suggestions ready");
                menu.set_items(items);
            }
            Err(err) => {
                tracing::warn!(id = msg.id, query = %msg.query, error = %err, "suggestion fetch failed");
                menu.set_failed(err);
            }
        }
        self.refresh_overlay();
    }

    /// Pushes the current menu into the popup layer.
    fn refresh_overlay(&mut self) {
        let PopupState::Open(menu) = &self.popup else {
            return;
        };
        let content = menu.view(
            self.item_view.as_ref(),
            &self.styles,
            &self.options.constraints,
            self.on_loading.as_deref(),
        );
        self.overlay.show(content);
    }
}

impl<T: Send + 'static> Component for Model<T> {
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
