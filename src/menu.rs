//! Suggestion list shown inside the popup.
//!
//! The menu owns the fetched items, the highlighted row and a scroll window.
//! Rows are rendered through the caller's item builder and fitted to the
//! popup's size bounds.

use crate::overlay::MenuConstraints;
use crate::source::FetchError;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Truncation marker for rows wider than the menu.
pub const ELLIPSIS: &str = "…";

/// Where the current fetch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStatus {
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed.
    Failed(FetchError),
}

/// Styles of the suggestion menu.
#[derive(Debug, Clone)]
pub struct MenuStyles {
    /// Regular rows.
    pub item: Style,
    /// The highlighted row.
    pub selected: Style,
    /// Marker drawn before the highlighted row.
    pub selected_marker: String,
    /// The loading row.
    pub loading: Style,
    /// The error row.
    pub error: Style,
}

impl Default for MenuStyles {
    fn default() -> Self {
        Self {
            item: Style::new().foreground(Color::from("#dddddd")),
            selected: Style::new().foreground(Color::from("#EE6FF8")).bold(true),
            selected_marker: "› ".to_string(),
            loading: Style::new().foreground(Color::from("240")).italic(true),
            error: Style::new().foreground(Color::from("#FF5F87")),
        }
    }
}

/// Items and highlight state of an open popup.
#[derive(Debug, Clone)]
pub struct Menu<T> {
    items: Vec<T>,
    status: MenuStatus,
    selected: Option<usize>,
    scroll: usize,
    page: usize,
}

impl<T> Menu<T> {
    /// An empty menu waiting for its first fetch. `page` is the number of
    /// visible rows, 0 for all.
    pub fn loading(page: usize) -> Self {
        Self {
            items: Vec::new(),
            status: MenuStatus::Loading,
            selected: None,
            scroll: 0,
            page,
        }
    }

    /// Fetch status.
    pub fn status(&self) -> &MenuStatus {
        &self.status
    }

    /// Items of the last successful fetch.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Index of the highlighted row.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The highlighted item.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// First visible row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Marks a new fetch as in flight. Current items stay until it lands.
    pub fn set_loading(&mut self) {
        self.status = MenuStatus::Loading;
    }

    /// Replaces the items with a fetch result and clears the highlight.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = MenuStatus::Ready;
        self.selected = None;
        self.scroll = 0;
    }

    /// Records a failed fetch; the stale items are dropped.
    pub fn set_failed(&mut self, err: FetchError) {
        self.items.clear();
        self.status = MenuStatus::Failed(err);
        self.selected = None;
        self.scroll = 0;
    }

    /// Highlights the next row, wrapping to the first.
    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.select(next);
    }

    /// Highlights the previous row, wrapping to the last.
    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let prev = match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.select(prev);
    }

    /// Highlights row `index` if it exists and scrolls it into view.
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.selected = Some(index);
        let page = self.visible_rows();
        if index < self.scroll {
            self.scroll = index;
        } else if page > 0 && index >= self.scroll + page {
            self.scroll = index + 1 - page;
        }
    }

    fn visible_rows(&self) -> usize {
        if self.page == 0 {
            self.items.len()
        } else {
            self.page.min(self.items.len())
        }
    }

    /// Renders the menu. Returns an empty string when there is nothing to
    /// show.
    pub fn view(
        &self,
        item_view: &dyn Fn(&T) -> String,
        styles: &MenuStyles,
        constraints: &MenuConstraints,
        loading: Option<&str>,
    ) -> String {
        let marker_width = lipgloss::width_visible(&styles.selected_marker);

        if let MenuStatus::Failed(err) = &self.status {
            let text = err.to_string();
            let width = constraints.clamp_width(lipgloss::width_visible(&text) + marker_width);
            return styles.error.render(&fit(&text, width));
        }

        if self.status == MenuStatus::Loading {
            if let Some(loading) = loading {
                let width =
                    constraints.clamp_width(lipgloss::width_visible(loading) + marker_width);
                return styles.loading.render(&fit(loading, width));
            }
        }

        let rows_shown = constraints.clamp_height(self.visible_rows());
        let end = (self.scroll + rows_shown).min(self.items.len());
        let rows: Vec<(usize, String)> = (self.scroll..end)
            .map(|i| (i, item_view(&self.items[i])))
            .collect();
        if rows.is_empty() {
            return String::new();
        }

        let natural = rows
            .iter()
            .map(|(_, r)| lipgloss::width_visible(r))
            .max()
            .unwrap_or(0)
            + marker_width;
        let width = constraints.clamp_width(natural);
        let text_width = width.saturating_sub(marker_width);
        let blank_marker = " ".repeat(marker_width);

        rows.iter()
            .map(|(i, row)| {
                let body = fit(row, text_width);
                if Some(*i) == self.selected {
                    styles
                        .selected
                        .render(&format!("{}{}", styles.selected_marker, body))
                } else {
                    styles.item.render(&format!("{}{}", blank_marker, body))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pads or truncates `s` to exactly `width` columns.
///
/// Styled text that fits is kept as is; text that has to be cut loses its
/// styling.
pub fn fit(s: &str, width: usize) -> String {
    let current = lipgloss::width_visible(s);
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let plain = lipgloss::strip_ansi(s);
    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in plain.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
