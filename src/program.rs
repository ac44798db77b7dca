//! Program - host event loop driving a skeleton on a real terminal
//!
//! Owns the terminal (raw mode + alternate screen), converts crossterm
//! input into messages, executes the commands the skeleton returns and
//! redraws after every message.

use std::io::{self, Stdout};

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::sync::mpsc;

use crate::context::Context;
use crate::error::{Result, SkeletonError};
use crate::message::{Command, Message};
use crate::skeleton::Skeleton;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Whether the loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs a skeleton until a quit command
pub struct Program {
    skeleton: Skeleton,
}

impl Program {
    pub fn new(skeleton: Skeleton) -> Self {
        Self { skeleton }
    }

    pub fn context(&self) -> Context {
        self.skeleton.context()
    }

    /// Run the program.
    ///
    /// Fails before touching the terminal when the skeleton has no pages.
    /// The terminal is restored even when the loop fails.
    pub async fn run(mut self) -> Result<()> {
        let startup = self.skeleton.init()?;

        let mut terminal = init_terminal()?;
        tracing::info!("program started");

        let result = self.main_loop(&mut terminal, startup).await;

        restore_terminal(&mut terminal)?;
        tracing::info!("program stopped");
        result
    }

    async fn main_loop(&mut self, terminal: &mut Term, startup: Vec<Command>) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let mut input = EventStream::new();

        if execute_commands(startup, &tx) == Flow::Quit {
            return Ok(());
        }

        let (width, height) = crossterm::terminal::size().map_err(terminal_error)?;
        if self.dispatch(Message::Resize { width, height }, &tx) == Flow::Quit {
            return Ok(());
        }

        loop {
            self.draw(terminal)?;

            let msg = tokio::select! {
                event = input.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => Message::Key(key),
                    Some(Ok(Event::Resize(width, height))) => Message::Resize { width, height },
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(terminal_error(e)),
                    None => return Ok(()),
                },
                Some(msg) = rx.recv() => msg,
            };

            if self.dispatch(msg, &tx) == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, msg: Message, tx: &mpsc::UnboundedSender<Message>) -> Flow {
        tracing::trace!(kind = msg.kind(), "dispatch");
        let cmds = self.skeleton.update(msg);
        execute_commands(cmds, tx)
    }

    fn draw(&self, terminal: &mut Term) -> Result<()> {
        let text = self.skeleton.render();
        terminal
            .draw(|frame| frame.render_widget(Paragraph::new(text), frame.area()))
            .map_err(terminal_error)?;
        Ok(())
    }
}

/// Queue emitted messages and spawn futures whose results come back as messages
fn execute_commands(cmds: Vec<Command>, tx: &mpsc::UnboundedSender<Message>) -> Flow {
    for cmd in cmds {
        match cmd {
            Command::Quit => return Flow::Quit,
            Command::Emit(msg) => {
                let _ = tx.send(msg);
            }
            Command::Future(fut) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
            }
        }
    }
    Flow::Continue
}

fn terminal_error(e: io::Error) -> SkeletonError {
    SkeletonError::Terminal {
        reason: e.to_string(),
    }
}

/// Enter raw mode and the alternate screen
fn init_terminal() -> Result<Term> {
    enable_raw_mode().map_err(|e| SkeletonError::Terminal {
        reason: format!("Failed to enable raw mode: {}", e),
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| abort_setup("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        abort_setup("Failed to create terminal", e)
    })
}

/// Leave raw mode after a failed setup step and describe the failure
fn abort_setup(step: &str, e: io::Error) -> SkeletonError {
    let reason = match disable_raw_mode() {
        Ok(()) => format!("{}: {}", step, e),
        Err(restore) => format!("{}: {} (raw mode not restored: {})", step, e, restore),
    };
    SkeletonError::Terminal { reason }
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_quit_stops_execution() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let flow = execute_commands(
            vec![Command::Quit, Command::Emit(Message::Refresh)],
            &tx,
        );
        assert_eq!(flow, Flow::Quit);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_emit_and_future_feed_back() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let flow = execute_commands(
            vec![
                Command::Emit(Message::ActivePage),
                Command::future(async { Message::Refresh }),
            ],
            &tx,
        );
        assert_eq!(flow, Flow::Continue);

        let first = rx.recv().await.unwrap();
        assert!(matches!(first, Message::ActivePage));
        let second = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(second, Message::Refresh));
    }

    #[test]
    fn test_abort_setup_reports_failed_step() {
        let err = abort_setup(
            "Failed to enter alternate screen",
            io::Error::new(io::ErrorKind::Other, "no tty"),
        );
        match err {
            SkeletonError::Terminal { reason } => {
                assert!(reason.starts_with("Failed to enter alternate screen: no tty"));
            }
            other => panic!("expected terminal error, got {:?}", other),
        }
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[tokio::test]
    async fn test_run_without_pages_fails_before_terminal_setup() {
        let program = Program::new(Skeleton::new());
        let err = program.run().await.unwrap_err();
        assert!(matches!(err, SkeletonError::NoPages));
    }

    #[tokio::test]
    async fn test_bus_listener_feeds_loop() {
        let mut skeleton = Skeleton::new();
        skeleton.add_page("a", "A", crate::demo::CounterPage::new());
        let bus = skeleton.context().bus().clone();
        let startup = skeleton.init().unwrap();

        // The listener resolves with the queued PageAdded first
        let (tx, mut rx) = mpsc::unbounded_channel();
        execute_commands(startup, &tx);
        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(msg, Message::PageAdded { .. }));

        let cmds = skeleton.update(msg);
        assert!(bus.is_listening());
        execute_commands(cmds, &tx);

        bus.signal();
        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(msg, Message::Refresh));
    }
}
