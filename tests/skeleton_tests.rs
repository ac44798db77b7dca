//! End-to-end tests for the skeleton through its public API
//!
//! Drives a skeleton the way the host loop does (resize, keys, refresh) and
//! checks the composed frame.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parking_lot::Mutex;
use ratatui::text::Text;

use skeleton::compositor::{PLACEHOLDER_HEADERS, PLACEHOLDER_INITIALIZING, PLACEHOLDER_WIDGETS};
use skeleton::text::{line_width, plain};
use skeleton::{Command, Message, Page, Skeleton, SkeletonConfig, SkeletonError};

/// Page whose body is a shared string and which records the messages it sees
struct Shared {
    body: Arc<Mutex<String>>,
    seen: Arc<Mutex<Vec<&'static str>>>,
}

impl Shared {
    fn new(body: &str) -> (Self, Arc<Mutex<Vec<&'static str>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let page = Self {
            body: Arc::new(Mutex::new(body.to_string())),
            seen: Arc::clone(&seen),
        };
        (page, seen)
    }
}

impl Page for Shared {
    fn init(&mut self) -> Vec<Command> {
        self.seen.lock().push("init");
        Vec::new()
    }

    fn update(&mut self, msg: &Message) -> Vec<Command> {
        self.seen.lock().push(msg.kind());
        Vec::new()
    }

    fn render(&self) -> Text<'static> {
        Text::from(self.body.lock().clone())
    }
}

fn ctrl(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::CONTROL))
}

fn resize(width: u16, height: u16) -> Message {
    Message::Resize { width, height }
}

/// Await the refresh listener armed in `cmds`
async fn next_bus_message(cmds: Vec<Command>) -> Message {
    let listener = cmds
        .into_iter()
        .find_map(|c| match c {
            Command::Future(fut) => Some(fut),
            _ => None,
        })
        .expect("refresh listener armed");
    tokio::time::timeout(Duration::from_secs(1), listener)
        .await
        .unwrap()
}

fn two_pages() -> Skeleton {
    let mut s = Skeleton::new();
    s.add_page("a", "Home", Shared::new("home body").0)
        .add_page("b", "Logs", Shared::new("logs body").0);
    s
}

// ============================================================================
// Frame composition
// ============================================================================

#[test]
fn test_frame_is_exact_viewport_size() {
    let mut s = two_pages();
    s.update(resize(40, 12));

    let frame = s.render();
    assert_eq!(frame.lines.len(), 12);
    for line in &frame.lines {
        assert_eq!(line_width(line), 40);
    }

    let text = plain(&frame);
    assert!(text.contains("Home"));
    assert!(text.contains("Logs"));
    assert!(text.contains("home body"));
    assert!(!text.contains("logs body"));
    // No widgets: a single closing row
    assert!(text.lines().last().unwrap().starts_with('╰'));
}

#[test]
fn test_frame_with_widgets() {
    let mut s = two_pages();
    s.update_widget("time", "10:00").update_widget("mode", "NORMAL");
    s.update(resize(40, 12));

    assert_eq!(s.content_height(), 6);
    let frame = s.render();
    assert_eq!(frame.lines.len(), 12);
    for line in &frame.lines {
        assert_eq!(line_width(line), 40);
    }

    let text = plain(&frame);
    let footer: Vec<&str> = text.lines().skip(9).collect();
    assert!(footer[1].contains("10:00"));
    assert!(footer[1].find("10:00") < footer[1].find("NORMAL"));
    assert!(!text.contains("time"));
}

#[test]
fn test_active_tab_is_double_bordered() {
    let mut s = two_pages();
    s.update(resize(40, 12));
    let first = plain(&s.render());
    let top = first.lines().next().unwrap();
    assert!(top.trim_start().starts_with('╔'));

    s.update(ctrl(KeyCode::Right));
    let second = plain(&s.render());
    let top = second.lines().next().unwrap();
    assert!(top.trim_start().starts_with('╭'));
    assert!(top.contains('╔'));
    assert!(second.contains("logs body"));
}

#[test]
fn test_placeholders_and_recovery() {
    let mut s = two_pages();
    assert_eq!(plain(&s.render()), PLACEHOLDER_INITIALIZING);

    // Header needs (4 + 6) * 2 + 2 = 22 columns
    s.update(resize(21, 12));
    assert_eq!(plain(&s.render()), PLACEHOLDER_HEADERS);

    s.update(resize(22, 12));
    s.update_widget("status", "a value far too wide for this");
    assert_eq!(plain(&s.render()), PLACEHOLDER_WIDGETS);

    s.update(resize(80, 12));
    assert!(plain(&s.render()).contains("a value far too wide for this"));
}

#[test]
fn test_long_body_is_clipped_to_content_area() {
    let mut s = Skeleton::new();
    let lines: Vec<String> = (0..50).map(|i| format!("line {i} {}", "x".repeat(60))).collect();
    s.add_page("a", "A", Shared::new(&lines.join("\n")).0);
    s.update(resize(30, 10));

    let frame = s.render();
    assert_eq!(frame.lines.len(), 10);
    for line in &frame.lines {
        assert_eq!(line_width(line), 30);
    }
    let text = plain(&frame);
    assert!(text.contains("line 0"));
    assert!(!text.contains("line 6 "));
}

// ============================================================================
// Navigation and locks
// ============================================================================

#[test]
fn test_navigation_scenario() {
    let mut s = Skeleton::new();
    s.add_page("a", "Home", Shared::new("").0);
    s.add_page("b", "Logs", Shared::new("").0);
    s.add_page("a", "Dup", Shared::new("").0);
    assert_eq!(s.page_count(), 2);

    s.set_active_page("b");
    s.update(ctrl(KeyCode::Left));
    assert_eq!(s.active_page(), Some("a"));

    s.set_active_page("b");
    s.lock_tab("a");
    s.update(ctrl(KeyCode::Right));
    s.update(ctrl(KeyCode::Left));
    assert_eq!(s.active_page(), Some("b"));

    s.unlock_tab("a");
    s.update(ctrl(KeyCode::Left));
    assert_eq!(s.active_page(), Some("a"));
}

#[test]
fn test_locked_tab_is_skipped() {
    let mut s = Skeleton::new();
    for key in ["a", "b", "c"] {
        s.add_page(key, key.to_uppercase(), Shared::new(key).0);
    }
    s.lock_tab("b");
    s.update(ctrl(KeyCode::Right));
    assert_eq!(s.active_page(), Some("c"));
}

#[test]
fn test_unlock_all_clears_individual_locks() {
    let mut s = two_pages();
    s.lock_tabs();
    s.lock_tab("a");
    s.lock_tab("b");
    s.unlock_tabs();
    assert!(!s.is_tab_locked("a"));
    assert!(!s.is_tab_locked("b"));
    assert!(!s.is_tabs_locked());
}

#[test]
fn test_unknown_keys_are_no_ops() {
    let mut s = two_pages();
    s.delete_page("missing")
        .lock_tab("missing")
        .set_active_page("missing")
        .update_page_title("missing", "X")
        .delete_widget("missing");
    assert_eq!(s.page_count(), 2);
    assert_eq!(s.active_page(), Some("a"));
    assert!(!s.is_tab_locked("missing"));
}

#[test]
fn test_last_page_survives_delete() {
    let mut s = Skeleton::new();
    s.add_page("only", "Only", Shared::new("").0);
    s.delete_page("only");
    assert_eq!(s.page_keys(), vec!["only".to_string()]);
}

// ============================================================================
// Host loop contract
// ============================================================================

#[test]
fn test_init_requires_a_page() {
    let mut s = Skeleton::new();
    let err = s.init().unwrap_err();
    assert!(matches!(err, SkeletonError::NoPages));
}

#[test]
fn test_messages_reach_active_page_only() {
    let (home, home_seen) = Shared::new("home");
    let (logs, logs_seen) = Shared::new("logs");
    let mut s = Skeleton::new();
    s.add_page("a", "Home", home).add_page("b", "Logs", logs);

    s.update(resize(40, 12));
    s.update(Message::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    s.update(ctrl(KeyCode::Right));
    s.update(Message::ActivePage);
    s.update(Message::custom("payload"));

    assert_eq!(*home_seen.lock(), vec!["resize", "key"]);
    assert_eq!(*logs_seen.lock(), vec!["active-page", "custom"]);
}

#[test]
fn test_quit_key_from_config() {
    let config = SkeletonConfig::from_yaml_str("keys:\n  quit: [\"q\"]\n").unwrap();
    let mut s = Skeleton::with_config(&config).unwrap();
    s.add_page("a", "A", Shared::new("").0);

    let cmds = s.update(ctrl(KeyCode::Char('c')));
    assert!(cmds.iter().all(|c| !c.is_quit()));

    let cmds = s.update(Message::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(cmds[0].is_quit());
}

// ============================================================================
// Refresh bus and background producers
// ============================================================================

#[tokio::test]
async fn test_page_added_behind_saturated_bus_is_initialized() {
    let (home, home_seen) = Shared::new("home");
    let mut s = Skeleton::new();
    s.add_page("a", "Home", home);
    let mut cmds = s.init().unwrap();

    let ctx = s.context();
    let bus = ctx.bus().clone();
    for i in 0..300 {
        ctx.set_widget("tick", i.to_string());
    }
    let (late, late_seen) = Shared::new("late");
    ctx.add_page("late", "Late", late);
    assert_eq!(bus.pending(), bus.capacity());

    let mut delivered = 0;
    while delivered == 0 || bus.pending() > 0 {
        let msg = next_bus_message(cmds).await;
        cmds = s.update(msg);
        delivered += 1;
        assert!(delivered <= 2 * bus.capacity(), "bus never drained");
    }

    assert_eq!(s.page_count(), 2);
    assert_eq!(s.widget_value("tick"), Some("299"));
    assert_eq!(*late_seen.lock(), vec!["init"]);
    assert_eq!(home_seen.lock().first(), Some(&"init"));
    assert!(bus.is_listening());
}

#[tokio::test]
async fn test_background_thread_updates_widget() {
    let mut s = two_pages();
    let cmds = s.init().unwrap();
    let ctx = s.context();

    let worker = thread::spawn(move || {
        for i in 0..100 {
            ctx.set_widget("progress", format!("{i}%"));
        }
    });
    worker.join().unwrap();

    let msg = next_bus_message(cmds).await;
    s.update(msg);

    assert_eq!(s.widget_value("progress"), Some("99%"));
    assert_eq!(s.widgets().len(), 1);
    assert_eq!(s.context().pending_ops(), 0);
    assert!(s.context().bus().is_listening());
}
