//! Caret for the autocomplete field.
//!
//! The caret is embedded in [`crate::field::Model`] and advanced by forwarding
//! messages to it. Each caret has its own id and every blink chain carries a
//! tag, so a blink scheduled before a refocus is ignored once a newer chain
//! has started.

use bubbletea_rs::{tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

const DEFAULT_BLINK_SPEED: Duration = Duration::from_millis(530);

/// Toggles the caret of the cursor `id` if `tag` is still its current chain.
#[derive(Debug, Clone)]
pub struct BlinkMsg {
    /// Caret this message belongs to.
    pub id: usize,
    /// Blink chain the message was scheduled under.
    pub tag: usize,
}

/// How the caret is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Alternates between block and plain character.
    Blink,
    /// Always drawn as a block.
    Static,
    /// Never drawn.
    Hide,
}

/// Caret state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between two blink phases.
    pub blink_speed: Duration,
    /// Style of the block when the caret is showing.
    pub style: Style,
    /// Style of the character under the caret when it is not showing.
    pub text_style: Style,

    char: String,
    id: usize,
    focus: bool,
    // true while the block is *not* drawn
    hidden: bool,
    blink_tag: usize,
    mode: Mode,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            blink_speed: DEFAULT_BLINK_SPEED,
            style: Style::new(),
            text_style: Style::new(),
            char: " ".to_string(),
            id: next_id(),
            focus: false,
            hidden: true,
            blink_tag: 0,
            mode: Mode::Blink,
        }
    }
}

impl Model {
    /// Creates an unfocused, blinking caret.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier used to route blink messages.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Advances the blink chain. Messages for other carets or older chains
    /// are ignored.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let blink = msg.downcast_ref::<BlinkMsg>()?;
        if self.mode != Mode::Blink || !self.focus {
            return None;
        }
        if blink.id != self.id || blink.tag != self.blink_tag {
            return None;
        }
        self.hidden = !self.hidden;
        self.blink_cmd()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Changes the mode. Switching to [`Mode::Blink`] while focused starts a
    /// new blink chain.
    pub fn set_mode(&mut self, mode: Mode) -> Option<Cmd> {
        self.mode = mode;
        self.hidden = mode == Mode::Hide || !self.focus;
        if mode == Mode::Blink && self.focus {
            return self.blink_cmd();
        }
        None
    }

    fn blink_cmd(&mut self) -> Option<Cmd> {
        if self.mode != Mode::Blink {
            return None;
        }
        self.blink_tag += 1;
        let id = self.id;
        let tag = self.blink_tag;
        Some(tick(self.blink_speed, move |_| {
            Box::new(BlinkMsg { id, tag }) as Msg
        }))
    }

    /// Shows the caret and, in blink mode, starts blinking.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.hidden = self.mode == Mode::Hide;
        if self.mode == Mode::Blink {
            return self.blink_cmd();
        }
        None
    }

    /// Hides the caret. Pending blinks become stale.
    pub fn blur(&mut self) {
        self.focus = false;
        self.hidden = true;
    }

    /// Whether the caret is focused.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Sets the character drawn under the caret.
    pub fn set_char(&mut self, s: &str) {
        self.char = s.to_string();
    }

    /// Renders the character under the caret.
    pub fn view(&self) -> String {
        if self.mode == Mode::Hide || self.hidden {
            return self.text_style.clone().inline(true).render(&self.char);
        }
        self.style
            .clone()
            .inline(true)
            .reverse(true)
            .render(&self.char)
    }
}

/// Creates a caret. Same as `Model::new()`.
pub fn new() -> Model {
    Model::new()
}
