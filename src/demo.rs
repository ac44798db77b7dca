//! Demo pages used by the `skeleton run` binary
//!
//! Three small pages exercising the page contract: an uptime clock redrawn on
//! refresh, a counter driven by keys, and a log of every message the active
//! page receives. [`spawn_ticker`] feeds a footer widget from a background
//! task through the [`Context`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tokio::task::JoinHandle;

use crate::context::Context;
use crate::message::{Command, Message};
use crate::page::Page;

/// Widget key written by [`spawn_ticker`]
pub const TICKER_WIDGET: &str = "uptime";

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Shows how long the program has been running
#[derive(Debug)]
pub struct ClockPage {
    started: Instant,
    refreshes: u64,
}

impl ClockPage {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            refreshes: 0,
        }
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl Default for ClockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ClockPage {
    fn update(&mut self, msg: &Message) -> Vec<Command> {
        if matches!(msg, Message::Refresh) {
            self.refreshes += 1;
        }
        Vec::new()
    }

    fn render(&self) -> Text<'static> {
        Text::from(vec![
            Line::from(Span::styled(
                format_elapsed(self.started.elapsed()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} refreshes", self.refreshes),
                Style::default().fg(Color::DarkGray),
            )),
        ])
    }
}

/// Counter changed with the arrow keys, `r` resets
#[derive(Debug, Default)]
pub struct CounterPage {
    value: i64,
}

impl CounterPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('+') => self.value += 1,
            KeyCode::Down | KeyCode::Char('-') => self.value -= 1,
            KeyCode::Char('r') => self.value = 0,
            _ => {}
        }
    }
}

impl Page for CounterPage {
    fn update(&mut self, msg: &Message) -> Vec<Command> {
        if let Message::Key(key) = msg {
            self.handle_key(key);
        }
        Vec::new()
    }

    fn render(&self) -> Text<'static> {
        Text::from(vec![
            Line::from(format!("count: {}", self.value)),
            Line::from(""),
            Line::from(Span::styled(
                "↑/+ increment  ↓/- decrement  r reset",
                Style::default().fg(Color::DarkGray),
            )),
        ])
    }
}

/// Most recent messages seen while active, newest last
#[derive(Debug)]
pub struct EventLogPage {
    entries: VecDeque<String>,
    capacity: usize,
}

impl EventLogPage {
    pub const DEFAULT_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn describe(msg: &Message) -> String {
        match msg {
            Message::Key(key) => format!("key {:?} {:?}", key.code, key.modifiers),
            Message::Resize { width, height } => format!("resize {}x{}", width, height),
            other => other.kind().to_string(),
        }
    }
}

impl Default for EventLogPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for EventLogPage {
    fn update(&mut self, msg: &Message) -> Vec<Command> {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Self::describe(msg));
        Vec::new()
    }

    fn render(&self) -> Text<'static> {
        if self.entries.is_empty() {
            return Text::from("no events yet");
        }
        self.entries
            .iter()
            .map(|entry| Line::from(entry.clone()))
            .collect::<Vec<_>>()
            .into()
    }
}

/// Update the uptime widget every `period` until the task is aborted
pub fn spawn_ticker(ctx: Context, period: Duration) -> JoinHandle<()> {
    let started = Instant::now();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            ctx.set_widget(TICKER_WIDGET, format_elapsed(started.elapsed()));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::Skeleton;
    use crate::text::plain;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_counter_keys() {
        let mut page = CounterPage::new();
        page.update(&press(KeyCode::Up));
        page.update(&press(KeyCode::Char('+')));
        page.update(&press(KeyCode::Down));
        assert_eq!(page.value(), 1);
        page.update(&press(KeyCode::Char('r')));
        assert_eq!(page.value(), 0);
        assert!(plain(&page.render()).starts_with("count: 0"));
    }

    #[test]
    fn test_clock_counts_refreshes_only() {
        let mut page = ClockPage::new();
        page.update(&Message::Refresh);
        page.update(&press(KeyCode::Up));
        assert_eq!(page.refreshes(), 1);
        assert!(plain(&page.render()).contains("1 refreshes"));
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut page = EventLogPage::with_capacity(2);
        assert_eq!(plain(&page.render()), "no events yet");

        page.update(&Message::Refresh);
        page.update(&Message::Resize {
            width: 10,
            height: 5,
        });
        page.update(&Message::ActivePage);
        let entries: Vec<&str> = page.entries().collect();
        assert_eq!(entries, vec!["resize 10x5", "active-page"]);
    }

    #[tokio::test]
    async fn test_ticker_updates_widget_through_context() {
        let mut skeleton = Skeleton::new();
        skeleton.add_page("clock", "Clock", ClockPage::new());
        let handle = spawn_ticker(skeleton.context(), Duration::from_millis(10));

        let ctx = skeleton.context();
        tokio::time::timeout(Duration::from_secs(2), async {
            while ctx.pending_ops() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        handle.abort();

        skeleton.update(Message::Refresh);
        assert!(skeleton.widget_value(TICKER_WIDGET).is_some());
    }
}
