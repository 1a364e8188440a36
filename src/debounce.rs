//! Cancel-and-restart timer for coalescing keystrokes.
//!
//! A [`Debouncer`] holds at most one pending timer. Scheduling replaces it and
//! cancelling drops it; either way the replaced timer's command finishes
//! immediately without producing a message. A timer that does fire yields a
//! [`DebounceMsg`], which the owner hands back to [`Debouncer::accept`] to
//! confirm that it belongs to the current timer.
//!
//! ```rust
//! use bubbletea_autocomplete::debounce::{Debouncer, DebounceMsg};
//! use std::time::Duration;
//!
//! # async fn run() {
//! let mut debouncer = Debouncer::new(1, Duration::from_millis(5));
//! let first = debouncer.schedule();
//! let second = debouncer.schedule();
//!
//! assert!(first.await.is_none());
//! let msg = second.await.expect("timer fired");
//! assert!(debouncer.accept(msg.downcast_ref::<DebounceMsg>().unwrap()));
//! # }
//! ```

use bubbletea_rs::{Cmd, Msg};
use std::time::Duration;
use tokio::sync::oneshot;

/// Default delay between the last keystroke and the fetch it triggers.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Yielded by a debounce timer that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceMsg {
    /// Owner of the debouncer.
    pub id: usize,
    /// Timer generation.
    pub tag: u64,
}

/// Holds the single pending timer of one widget.
#[derive(Debug)]
pub struct Debouncer {
    id: usize,
    delay: Duration,
    tag: u64,
    // Dropping the sender wakes the sleeping command and ends it.
    pending: Option<oneshot::Sender<()>>,
}

impl Debouncer {
    /// Creates a debouncer whose messages carry `id`.
    pub fn new(id: usize, delay: Duration) -> Self {
        Self {
            id,
            delay,
            tag: 0,
            pending: None,
        }
    }

    /// Delay applied after the last schedule.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay of future timers.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Whether a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels the pending timer, if any, and starts a new one.
    pub fn schedule(&mut self) -> Cmd {
        self.cancel();
        self.tag += 1;

        let (tx, rx) = oneshot::channel::<()>();
        self.pending = Some(tx);

        let id = self.id;
        let tag = self.tag;
        let delay = self.delay;
        tracing::trace!(id, tag, ?delay, "debounce scheduled");

        Box::pin(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => Some(Box::new(DebounceMsg { id, tag }) as Msg),
                _ = rx => None,
            }
        })
    }

    /// Cancels the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consumes `msg` if it comes from the current pending timer.
    ///
    /// Messages from replaced or cancelled timers, and from other
    /// debouncers, are rejected.
    pub fn accept(&mut self, msg: &DebounceMsg) -> bool {
        if msg.id != self.id || msg.tag != self.tag || self.pending.is_none() {
            tracing::trace!(id = self.id, tag = msg.tag, "stale debounce ignored");
            return false;
        }
        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Debouncer {
        Debouncer::new(7, Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_fires_after_delay() {
        let mut d = short();
        let msg = d.schedule().await.expect("fired");
        let msg = msg.downcast_ref::<DebounceMsg>().unwrap();
        assert_eq!(msg.id, 7);
        assert!(d.accept(msg));
        assert!(!d.is_pending());
    }

    #[tokio::test]
    async fn test_reschedule_cancels_previous_timer() {
        let mut d = short();
        let first = d.schedule();
        let second = d.schedule();
        assert!(first.await.is_none());
        assert!(second.await.is_some());
    }

    #[tokio::test]
    async fn test_cancel_ends_timer_without_message() {
        let mut d = Debouncer::new(1, Duration::from_secs(3600));
        let cmd = d.schedule();
        assert!(d.cancel());
        assert!(cmd.await.is_none());
        assert!(!d.cancel());
    }

    #[tokio::test]
    async fn test_drop_ends_timer_without_message() {
        let mut d = Debouncer::new(1, Duration::from_secs(3600));
        let cmd = d.schedule();
        drop(d);
        assert!(cmd.await.is_none());
    }

    #[test]
    fn test_accept_rejects_stale_tag() {
        let mut d = short();
        let _a = d.schedule();
        let _b = d.schedule();
        assert!(!d.accept(&DebounceMsg { id: 7, tag: 1 }));
        assert!(d.accept(&DebounceMsg { id: 7, tag: 2 }));
    }

    #[test]
    fn test_accept_rejects_other_owner() {
        let mut d = short();
        let _a = d.schedule();
        assert!(!d.accept(&DebounceMsg { id: 8, tag: 1 }));
    }

    #[test]
    fn test_accept_rejects_after_cancel() {
        let mut d = short();
        let _a = d.schedule();
        d.cancel();
        assert!(!d.accept(&DebounceMsg { id: 7, tag: 1 }));
    }

    #[test]
    fn test_accept_consumes_timer_once() {
        let mut d = short();
        let _a = d.schedule();
        let msg = DebounceMsg { id: 7, tag: 1 };
        assert!(d.accept(&msg));
        assert!(!d.accept(&msg));
    }
}
