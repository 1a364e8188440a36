//! Input formatters.
//!
//! A formatter sees the value before an edit and the candidate value after it
//! and returns the value the field should hold. Formatters run in the order
//! they were added, on every user edit. Programmatic `set_value` calls skip
//! them.
//!
//! ```rust
//! use bubbletea_autocomplete::field::format::{allow, InputFormatter, LengthLimit};
//!
//! let digits = allow(|c| c.is_ascii_digit());
//! assert_eq!(digits.format(&[], "a1b2".chars().collect()), vec!['1', '2']);
//!
//! let limit = LengthLimit(3);
//! assert_eq!(limit.format(&['a', 'b'], "abcd".chars().collect()), vec!['a', 'b', 'c']);
//! ```

/// Rewrites a candidate value after an edit.
pub trait InputFormatter: Send {
    /// Returns the value to keep given the previous value `old` and the
    /// edited candidate `new`.
    fn format(&self, old: &[char], new: Vec<char>) -> Vec<char>;
}

/// Keeps or drops characters by predicate.
pub struct Filter {
    pred: Box<dyn Fn(char) -> bool + Send>,
    allow: bool,
}

impl InputFormatter for Filter {
    fn format(&self, _old: &[char], new: Vec<char>) -> Vec<char> {
        new.into_iter().filter(|c| (self.pred)(*c) == self.allow).collect()
    }
}

/// Only characters matching `pred` survive.
pub fn allow(pred: impl Fn(char) -> bool + Send + 'static) -> Filter {
    Filter {
        pred: Box::new(pred),
        allow: true,
    }
}

/// Characters matching `pred` are removed.
pub fn deny(pred: impl Fn(char) -> bool + Send + 'static) -> Filter {
    Filter {
        pred: Box::new(pred),
        allow: false,
    }
}

/// Caps the value at a number of characters.
///
/// A value that is already over the limit (set programmatically) is not cut
/// by the next keystroke. Edits that would grow it are rejected; edits that
/// shorten it go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthLimit(pub usize);

impl InputFormatter for LengthLimit {
    fn format(&self, old: &[char], mut new: Vec<char>) -> Vec<char> {
        if new.len() <= self.0 || new.len() < old.len() {
            return new;
        }
        if old.len() > self.0 {
            return old.to_vec();
        }
        new.truncate(self.0);
        new
    }
}

/// Folds line breaks and tabs into spaces and drops other control
/// characters. Every field runs this before its own formatters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLine;

impl InputFormatter for SingleLine {
    fn format(&self, _old: &[char], new: Vec<char>) -> Vec<char> {
        new.into_iter()
            .filter_map(|c| match c {
                '\r' | '\n' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect()
    }
}
