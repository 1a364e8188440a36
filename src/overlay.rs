//! Popup layer anchored to the field.
//!
//! The autocomplete state machine never draws the popup itself. It talks to an
//! [`Overlay`]: anchor it, position it, show content, hide it. [`Layer`] is the
//! default implementation for string-rendered terminal UIs. It can stack the
//! popup next to the field's own view, or paint it over a full screen at an
//! absolute position.
//!
//! ```rust
//! use bubbletea_autocomplete::overlay::{Layer, Offset, Overlay, Placement, Rect};
//!
//! let mut layer = Layer::new();
//! layer.anchor_to(Rect::new(2, 5, 20, 1));
//! layer.position(Placement::Below, Offset::new(1, 0));
//! layer.show("Apple\nGrape".to_string());
//!
//! assert_eq!(layer.area(), Some(Rect::new(3, 6, 5, 2)));
//! assert_eq!(layer.compose("> ap"), "> ap\n Apple\n Grape");
//! ```

use lipgloss_extras::lipgloss;
use unicode_width::UnicodeWidthChar;

/// A screen rectangle in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Row just below the rectangle.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

/// Which side of the anchor the popup opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Above the anchor, growing upwards.
    Above,
    /// Below the anchor.
    #[default]
    Below,
}

/// Distance between anchor and popup.
///
/// `x` shifts the popup right. `y` is the gap in rows away from the anchor,
/// whichever side the popup is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    /// Columns to the right of the anchor's left edge.
    pub x: u16,
    /// Blank rows between anchor and popup.
    pub y: u16,
}

impl Offset {
    /// Creates an offset.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Size bounds of the suggestion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuConstraints {
    /// Minimum width in columns.
    pub min_width: usize,
    /// Maximum width in columns; 0 means unbounded.
    pub max_width: usize,
    /// Maximum number of rows; 0 means unbounded.
    pub max_height: usize,
}

impl Default for MenuConstraints {
    fn default() -> Self {
        Self {
            min_width: 0,
            max_width: 0,
            max_height: 8,
        }
    }
}

impl MenuConstraints {
    /// Clamps a natural content width into the bounds.
    pub fn clamp_width(&self, natural: usize) -> usize {
        let w = natural.max(self.min_width);
        if self.max_width > 0 {
            w.min(self.max_width.max(self.min_width))
        } else {
            w
        }
    }

    /// Clamps a row count into the bounds.
    pub fn clamp_height(&self, rows: usize) -> usize {
        if self.max_height > 0 {
            rows.min(self.max_height)
        } else {
            rows
        }
    }
}

/// Capability the autocomplete needs from a popup layer.
pub trait Overlay: Send {
    /// Sets the anchor's screen rectangle.
    fn anchor_to(&mut self, anchor: Rect);
    /// Sets placement and offset relative to the anchor.
    fn position(&mut self, placement: Placement, offset: Offset);
    /// Shows `content`, replacing whatever was shown before.
    fn show(&mut self, content: String);
    /// Removes the popup.
    fn hide(&mut self);
    /// Whether the popup is currently shown.
    fn is_shown(&self) -> bool;
    /// Screen rectangle of the shown popup.
    fn area(&self) -> Option<Rect>;
    /// Combines the anchor's rendered view with the popup.
    fn compose(&self, anchor_view: &str) -> String;
    /// Draws the popup over a full-screen view at [`Overlay::area`].
    fn paint(&self, screen: &str) -> String;
}

/// Default [`Overlay`] for string-rendered views.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    anchor: Rect,
    placement: Placement,
    offset: Offset,
    content: Option<String>,
}

impl Layer {
    /// Creates a hidden layer anchored at the origin, opening below.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Current offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Shown content.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn indented_lines(&self, content: &str) -> Vec<String> {
        let indent = " ".repeat(self.offset.x as usize);
        content.lines().map(|l| format!("{indent}{l}")).collect()
    }
}

/// Replaces the cells of `base` starting at column `x` with `line`.
///
/// Columns are terminal cells. A wide character cut by either edge of
/// `line` is replaced by spaces for the cells left uncovered.
fn splice(base: &str, x: usize, line: &str) -> String {
    let plain = lipgloss::strip_ansi(base);
    let end = x + lipgloss::width_visible(line);

    let mut out = String::new();
    let mut col = 0;
    for c in plain.chars() {
        let w = c.width().unwrap_or(0);
        if col + w > x {
            break;
        }
        out.push(c);
        col += w;
    }
    out.push_str(&" ".repeat(x - col));
    out.push_str(line);

    let mut col = 0;
    for c in plain.chars() {
        let w = c.width().unwrap_or(0);
        if col >= end {
            out.push(c);
        } else if col + w > end {
            out.push_str(&" ".repeat(col + w - end));
        }
        col += w;
    }
    out
}

impl Overlay for Layer {
    fn anchor_to(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }

    fn position(&mut self, placement: Placement, offset: Offset) {
        self.placement = placement;
        self.offset = offset;
    }

    fn show(&mut self, content: String) {
        self.content = Some(content);
    }

    fn hide(&mut self) {
        self.content = None;
    }

    fn is_shown(&self) -> bool {
        self.content.is_some()
    }

    fn area(&self) -> Option<Rect> {
        let content = self.content.as_deref()?;
        let width = content
            .lines()
            .map(lipgloss::width_visible)
            .max()
            .unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(content.lines().count()).unwrap_or(u16::MAX);
        let x = self.anchor.x.saturating_add(self.offset.x);

        let area = match self.placement {
            Placement::Below => Rect::new(
                x,
                self.anchor.bottom().saturating_add(self.offset.y),
                width,
                height,
            ),
            Placement::Above => {
                // Clamped to the top edge: rows that do not fit are dropped.
                let room = self.anchor.y.saturating_sub(self.offset.y);
                let height = height.min(room);
                Rect::new(x, room - height, width, height)
            }
        };
        Some(area)
    }

    fn compose(&self, anchor_view: &str) -> String {
        let Some(content) = self.content.as_deref() else {
            return anchor_view.to_string();
        };
        if content.is_empty() {
            return anchor_view.to_string();
        }

        let popup = self.indented_lines(content);
        let gap = vec![String::new(); self.offset.y as usize];
        let mut rows: Vec<String> = Vec::new();
        match self.placement {
            Placement::Below => {
                rows.push(anchor_view.to_string());
                rows.extend(gap);
                rows.extend(popup);
            }
            Placement::Above => {
                rows.extend(popup);
                rows.extend(gap);
                rows.push(anchor_view.to_string());
            }
        }
        rows.join("\n")
    }

    /// Rows of `screen` the popup covers lose their styling; other rows are
    /// kept as they are. The screen grows when the popup reaches past it.
    fn paint(&self, screen: &str) -> String {
        let (Some(content), Some(area)) = (self.content.as_deref(), self.area()) else {
            return screen.to_string();
        };

        let lines: Vec<&str> = content.lines().collect();
        let skip = lines.len().saturating_sub(area.height as usize);
        let mut rows: Vec<String> = screen.lines().map(str::to_string).collect();
        for (i, line) in lines[skip..].iter().enumerate() {
            let row = area.y as usize + i;
            while rows.len() <= row {
                rows.push(String::new());
            }
            rows[row] = splice(&rows[row], area.x as usize, line);
        }
        rows.join("\n")
    }
}
