//! Tests for the autocomplete state machine.

use super::*;
use crate::cursor::Mode;
use crate::field::SubmittedMsg;
use crate::menu::MenuStatus;
use crate::overlay::{MenuConstraints, Offset, Overlay, Placement, Rect};
use crate::source::{from_fn, FetchError, SuggestionSource};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::strip_ansi;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn ch(c: char) -> Msg {
    key(KeyCode::Char(c))
}

/// Source that returns `items` for every query and records each query.
fn recording(
    items: &'static [&'static str],
) -> (impl SuggestionSource<String>, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let source = from_fn(move |query: String| {
        seen.lock().unwrap().push(query);
        async move { Ok(items.iter().map(|s| s.to_string()).collect()) }
    });
    (source, calls)
}

/// Source that answers every query with `"<query>!"`.
fn echo() -> impl SuggestionSource<String> {
    from_fn(|query: String| async move { Ok(vec![format!("{query}!")]) })
}

fn widget(source: impl SuggestionSource<String> + 'static) -> Model<String> {
    let mut m = new(source).with_debounce(Duration::from_millis(10));
    // A static caret keeps focus from returning a blink command.
    let _ = m.field_mut().cursor.set_mode(Mode::Static);
    m
}

/// Runs `cmd` and feeds its message back into the widget.
async fn deliver(m: &mut Model<String>, cmd: Cmd) -> Option<Cmd> {
    let msg = cmd.await?;
    m.update(msg)
}

/// Focuses the widget and lands its first fetch.
async fn opened(m: &mut Model<String>) {
    let cmd = m.focus().expect("initial fetch");
    assert!(deliver(m, cmd).await.is_none());
}

fn items(m: &Model<String>) -> Vec<String> {
    m.popup().menu().expect("open").items().to_vec()
}

fn status(m: &Model<String>) -> MenuStatus {
    m.popup().menu().expect("open").status().clone()
}

#[derive(Debug, Default)]
struct Record {
    opened: usize,
    hidden: usize,
    last: Option<String>,
}

#[derive(Default)]
struct RecordingOverlay {
    record: Arc<Mutex<Record>>,
    shown: bool,
}

impl Overlay for RecordingOverlay {
    fn anchor_to(&mut self, _anchor: Rect) {}

    fn position(&mut self, _placement: Placement, _offset: Offset) {}

    fn show(&mut self, content: String) {
        let mut r = self.record.lock().unwrap();
        if !self.shown {
            r.opened += 1;
        }
        r.last = Some(content);
        self.shown = true;
    }

    fn hide(&mut self) {
        if self.shown {
            self.record.lock().unwrap().hidden += 1;
        }
        self.shown = false;
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn area(&self) -> Option<Rect> {
        None
    }

    fn compose(&self, anchor_view: &str) -> String {
        anchor_view.to_string()
    }

    fn paint(&self, screen: &str) -> String {
        screen.to_string()
    }
}

fn recorded(m: Model<String>) -> (Model<String>, Arc<Mutex<Record>>) {
    let overlay = RecordingOverlay::default();
    let record = overlay.record.clone();
    (m.with_overlay(overlay), record)
}

#[test]
fn test_new_widget_is_closed_and_blurred() {
    let (source, calls) = recording(&["Apple"]);
    let m = widget(source);
    assert!(!m.is_open());
    assert!(!m.focused());
    assert!(!m.debounce_pending());
    assert!(!m.is_disposed());
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(m.options().debounce, Duration::from_millis(10));
}

#[tokio::test]
async fn test_focus_opens_popup_and_fetches_current_text() {
    let (source, calls) = recording(&["Apple", "Grape"]);
    let mut m = widget(source);
    m.set_value("ap");

    let cmd = m.focus().expect("fetch");
    assert!(m.is_open());
    assert!(m.focused());
    assert_eq!(status(&m), MenuStatus::Loading);
    assert_eq!(*calls.lock().unwrap(), vec!["ap".to_string()]);

    assert!(deliver(&mut m, cmd).await.is_none());
    assert_eq!(status(&m), MenuStatus::Ready);
    assert_eq!(items(&m), vec!["Apple".to_string(), "Grape".to_string()]);
}

#[tokio::test]
async fn test_focus_twice_opens_once() {
    let (source, calls) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;

    assert!(m.focus().is_none());
    assert!(Component::focus(&mut m).is_none());
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(record.lock().unwrap().opened, 1);
}

#[tokio::test]
async fn test_selecting_writes_display_value_and_closes() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;

    let done = m.select(1).expect("selected");
    assert_eq!(m.value(), "Grape");
    assert!(!m.is_open());
    assert!(!m.focused());
    assert_eq!(record.lock().unwrap().hidden, 1);

    let msg = done.await.expect("selected msg");
    let selected = msg.downcast_ref::<SelectedMsg>().expect("SelectedMsg");
    assert_eq!(
        selected,
        &SelectedMsg {
            id: m.id(),
            index: 1,
            value: "Grape".to_string(),
        }
    );
}

#[tokio::test]
async fn test_select_out_of_range_keeps_popup_open() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source);
    opened(&mut m).await;

    assert!(m.select(3).is_none());
    assert!(m.is_open());
    assert_eq!(m.value(), "");
}

#[test]
fn test_select_while_closed_does_nothing() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source);
    assert!(m.select(0).is_none());
}

#[tokio::test]
async fn test_custom_builders_map_items() {
    let source = from_fn(|_q: String| async move {
        Ok(vec![(1u32, "Lyon".to_string()), (2, "Lima".to_string())])
    });
    let mut m = with_builders(
        source,
        |c: &(u32, String)| format!("#{} {}", c.0, c.1),
        |c: &(u32, String)| c.1.to_uppercase(),
    );
    let _ = m.field_mut().cursor.set_mode(Mode::Static);

    let cmd = m.focus().expect("fetch");
    let msg = cmd.await.expect("suggestions");
    assert!(m.update(msg).is_none());
    assert!(strip_ansi(&m.view()).contains("#2 Lima"));

    let _ = m.select(1).expect("selected");
    assert_eq!(m.value(), "LIMA");
}

#[tokio::test]
async fn test_keystrokes_coalesce_into_one_fetch() {
    let (source, calls) = recording(&["abc"]);
    let mut m = widget(source);
    opened(&mut m).await;

    let first = m.update(ch('a')).expect("debounce");
    let second = m.update(ch('b')).expect("debounce");
    let third = m.update(ch('c')).expect("debounce");
    assert!(m.debounce_pending());

    assert!(first.await.is_none());
    assert!(second.await.is_none());
    let fetch = deliver(&mut m, third).await.expect("fetch");
    assert!(!m.debounce_pending());
    assert_eq!(status(&m), MenuStatus::Loading);
    assert_eq!(*calls.lock().unwrap(), vec!["".to_string(), "abc".to_string()]);

    assert!(deliver(&mut m, fetch).await.is_none());
    assert_eq!(status(&m), MenuStatus::Ready);
}

#[tokio::test]
async fn test_set_value_does_not_schedule_fetch() {
    let (source, calls) = recording(&["x"]);
    let mut m = widget(source);
    opened(&mut m).await;

    m.set_value("hello");
    assert!(!m.debounce_pending());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stale_results_are_dropped() {
    let mut m = widget(echo());
    let first = m.focus().expect("fetch");

    let debounce = m.update(ch('x')).expect("debounce");
    let second = deliver(&mut m, debounce).await.expect("fetch");

    assert!(deliver(&mut m, first).await.is_none());
    assert_eq!(status(&m), MenuStatus::Loading);
    assert!(items(&m).is_empty());

    assert!(deliver(&mut m, second).await.is_none());
    assert_eq!(items(&m), vec!["x!".to_string()]);
}

#[tokio::test]
async fn test_results_after_blur_are_dropped() {
    let (source, _) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    let cmd = m.focus().expect("fetch");
    m.blur();

    assert!(deliver(&mut m, cmd).await.is_none());
    assert!(!m.is_open());
    assert_eq!(record.lock().unwrap().opened, 1);
    assert_eq!(record.lock().unwrap().hidden, 1);
}

#[tokio::test]
async fn test_results_for_other_widget_are_ignored() {
    let mut a = widget(echo());
    let mut b = widget(echo());
    let _ = a.focus();
    let from_b = b.focus().expect("fetch");

    let msg = from_b.await.expect("suggestions");
    assert!(a.update(msg).is_none());
    assert_eq!(status(&a), MenuStatus::Loading);
}

#[tokio::test]
async fn test_fetch_error_is_shown() {
    let source = from_fn(|_q: String| async move {
        Err::<Vec<String>, _>(FetchError::failed("backend offline"))
    });
    let mut m = widget(source);
    opened(&mut m).await;

    assert_eq!(
        status(&m),
        MenuStatus::Failed(FetchError::Failed("backend offline".to_string()))
    );
    assert!(strip_ansi(&m.view()).contains("backend offline"));
}

#[tokio::test]
async fn test_slow_fetch_times_out() {
    let source = from_fn(|_q: String| async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(vec!["late".to_string()])
    });
    let mut m = widget(source).with_fetch_timeout(Duration::from_millis(10));
    opened(&mut m).await;

    assert_eq!(
        status(&m),
        MenuStatus::Failed(FetchError::TimedOut(Duration::from_millis(10)))
    );
}

#[tokio::test]
async fn test_error_is_replaced_by_next_success() {
    let source = from_fn(|q: String| async move {
        if q.is_empty() {
            Err(FetchError::failed("empty"))
        } else {
            Ok(vec![q])
        }
    });
    let mut m = widget(source);
    opened(&mut m).await;
    assert!(matches!(status(&m), MenuStatus::Failed(_)));

    let debounce = m.update(ch('z')).expect("debounce");
    let fetch = deliver(&mut m, debounce).await.expect("fetch");
    deliver(&mut m, fetch).await;
    assert_eq!(items(&m), vec!["z".to_string()]);
}

#[tokio::test]
async fn test_dispose_cancels_pending_debounce() {
    let (source, calls) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;

    let debounce = m.update(ch('a')).expect("debounce");
    m.dispose();
    assert!(m.is_disposed());
    assert!(!m.debounce_pending());
    assert!(!m.is_open());
    assert_eq!(record.lock().unwrap().hidden, 1);

    assert!(debounce.await.is_none());
    assert!(m.update(ch('b')).is_none());
    assert!(m.focus().is_none());
    assert_eq!(m.value(), "a");
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dispose_is_idempotent() {
    let (source, _) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;
    m.dispose();
    m.dispose();
    assert_eq!(record.lock().unwrap().hidden, 1);
}

#[tokio::test]
async fn test_arrow_keys_and_enter_choose_highlighted_row() {
    let (source, _) = recording(&["Apple", "Grape", "Melon"]);
    let mut m = widget(source);
    opened(&mut m).await;

    assert!(m.update(key(KeyCode::Down)).is_none());
    assert!(m.update(key(KeyCode::Down)).is_none());
    assert_eq!(m.popup().menu().unwrap().selected(), Some(1));
    assert!(m.update(key(KeyCode::Up)).is_none());
    assert!(m.update(key(KeyCode::Up)).is_none());
    assert_eq!(m.popup().menu().unwrap().selected(), Some(2));

    let done = m.update(key(KeyCode::Enter)).expect("selected");
    assert_eq!(m.value(), "Melon");
    assert!(!m.is_open());

    let msg = done.await.expect("selected msg");
    assert_eq!(msg.downcast_ref::<SelectedMsg>().unwrap().index, 2);
}

#[tokio::test]
async fn test_tab_accepts_highlighted_row() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let mut m = widget(source);
    opened(&mut m).await;

    m.update(key(KeyCode::Down));
    assert!(m.update(key(KeyCode::Tab)).is_some());
    assert_eq!(m.value(), "Apple");
}

#[tokio::test]
async fn test_navigation_keys_do_not_edit_field() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source);
    opened(&mut m).await;
    m.update(ch('q'));

    m.update(key(KeyCode::Down));
    assert_eq!(m.value(), "q");
    assert_eq!(m.field().position(), 1);
}

#[tokio::test]
async fn test_enter_without_highlight_submits_field() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source);
    opened(&mut m).await;
    m.update(ch('a'));

    let cmd = m.update(key(KeyCode::Enter)).expect("submit");
    assert!(!m.is_open());
    assert!(!m.focused());
    assert!(!m.debounce_pending());

    let msg = cmd.await.expect("submitted msg");
    assert_eq!(msg.downcast_ref::<SubmittedMsg>().unwrap().value, "a");
}

#[tokio::test]
async fn test_escape_dismisses() {
    let (source, _) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;

    assert!(m.update(key(KeyCode::Esc)).is_none());
    assert!(!m.is_open());
    assert!(!m.focused());
    assert_eq!(record.lock().unwrap().hidden, 1);
}

#[tokio::test]
async fn test_refocus_after_dismiss_fetches_again() {
    let (source, calls) = recording(&["Apple"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;
    m.blur();
    opened(&mut m).await;

    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(record.lock().unwrap().opened, 2);
    assert!(m.is_open());
}

#[tokio::test]
async fn test_debounce_after_close_is_ignored() {
    let (source, calls) = recording(&["Apple"]);
    let mut m = widget(source);
    opened(&mut m).await;
    let debounce = m.update(ch('a')).expect("debounce");
    m.blur();

    assert!(debounce.await.is_none());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlay_receives_rendered_menu() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let (mut m, record) = recorded(widget(source));
    opened(&mut m).await;

    let last = record.lock().unwrap().last.clone().expect("shown");
    let plain = strip_ansi(&last);
    assert!(plain.contains("Apple"));
    assert!(plain.contains("Grape"));
}

#[tokio::test]
async fn test_loading_view_while_fetching() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source).with_on_loading("Loading...");
    let cmd = m.focus().expect("fetch");
    assert!(strip_ansi(&m.view()).contains("Loading..."));

    deliver(&mut m, cmd).await;
    let view = strip_ansi(&m.view());
    assert!(!view.contains("Loading..."));
    assert!(view.contains("Apple"));
}

#[tokio::test]
async fn test_without_loading_view_stale_rows_stay() {
    let mut m = widget(echo());
    opened(&mut m).await;
    assert!(strip_ansi(&m.view()).contains("!"));

    let debounce = m.update(ch('k')).expect("debounce");
    let _fetch = deliver(&mut m, debounce).await.expect("fetch");
    assert_eq!(status(&m), MenuStatus::Loading);
    assert_eq!(items(&m), vec!["!".to_string()]);
}

#[tokio::test]
async fn test_view_below_field() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let mut m = widget(source);
    opened(&mut m).await;

    let view = strip_ansi(&m.view());
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("> "));
    assert!(lines[1].contains("Apple"));
    assert!(lines[2].contains("Grape"));
}

#[tokio::test]
async fn test_view_above_field_with_gap() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let mut m = widget(source)
        .with_placement(Placement::Above)
        .with_offset(Offset::new(0, 1));
    opened(&mut m).await;

    let view = strip_ansi(&m.view());
    let lines: Vec<&str> = view.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Apple"));
    assert_eq!(lines[2], "");
    assert!(lines[3].starts_with("> "));
}

#[tokio::test]
async fn test_closed_view_is_just_the_field() {
    let (source, _) = recording(&["Apple"]);
    let mut m = widget(source);
    opened(&mut m).await;
    m.blur();
    assert_eq!(m.view(), m.field_view());
}

#[tokio::test]
async fn test_constraints_limit_rows() {
    let (source, _) = recording(&["a", "b", "c", "d", "e"]);
    let mut m = widget(source).with_constraints(MenuConstraints {
        min_width: 0,
        max_width: 0,
        max_height: 2,
    });
    opened(&mut m).await;
    assert_eq!(strip_ansi(&m.view()).lines().count(), 3);

    for _ in 0..5 {
        m.update(key(KeyCode::Down));
    }
    let view = strip_ansi(&m.view());
    assert!(view.contains('d'));
    assert!(view.contains('e'));
    assert!(!view.contains("  a"));
}

#[tokio::test]
async fn test_popup_area_follows_anchor() {
    let (source, _) = recording(&["Apple", "Grape"]);
    let mut m = widget(source);
    m.set_anchor(Rect::new(3, 4, 20, 1));
    assert_eq!(m.popup_area(), None);

    opened(&mut m).await;
    let area = m.popup_area().expect("shown");
    assert_eq!((area.x, area.y, area.height), (3, 5, 2));

    let painted = strip_ansi(&m.paint_over("title\n> \n\n\n\n\n"));
    let lines: Vec<&str> = painted.lines().collect();
    assert!(lines[5].contains("Apple"));
    assert!(lines[6].contains("Grape"));

    m.blur();
    assert_eq!(m.popup_area(), None);
}

#[tokio::test]
async fn test_typed_query_then_select_first_row() {
    let (source, calls) = recording(&["Apple", "Grape"]);
    let mut m = widget(source);
    opened(&mut m).await;

    let _ = m.update(ch('a'));
    let debounce = m.update(ch('p')).expect("debounce");
    let fetch = deliver(&mut m, debounce).await.expect("fetch");
    deliver(&mut m, fetch).await;
    assert_eq!(calls.lock().unwrap().last().map(String::as_str), Some("ap"));

    let view = strip_ansi(&m.view());
    assert_eq!(view.lines().count(), 3);

    let _ = m.select(0).expect("selected");
    assert_eq!(m.value(), "Apple");
    assert!(!m.is_open());
}

#[tokio::test]
async fn test_hidden_rows_cannot_be_chosen_while_loading() {
    let mut m = widget(echo()).with_on_loading("Loading...");
    opened(&mut m).await;

    let debounce = m.update(ch('k')).expect("debounce");
    let _fetch = deliver(&mut m, debounce).await.expect("fetch");
    let view = strip_ansi(&m.view());
    assert_eq!(view.lines().nth(1).map(str::trim_end), Some("Loading..."));

    assert!(m.update(key(KeyCode::Down)).is_none());
    assert_eq!(m.popup().menu().unwrap().selected(), None);

    let cmd = m.update(key(KeyCode::Enter)).expect("submit");
    assert_eq!(m.value(), "k");
    let msg = cmd.await.expect("submitted msg");
    assert!(msg.downcast_ref::<SelectedMsg>().is_none());
    assert_eq!(msg.downcast_ref::<SubmittedMsg>().unwrap().value, "k");
}
