//! Refresh Bus - lets any producer ask the render loop for a redraw
//!
//! A bounded multi-producer channel with coalescing semantics: sends never
//! block, and when the channel is full the signal is dropped because at
//! least one refresh is already pending. A single-listener guard makes sure
//! at most one `subscribe()` future drains the channel at a time.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::message::{Command, Message};

/// Default number of pending refresh entries
pub const DEFAULT_CAPACITY: usize = 256;

/// Cloneable handle to the refresh channel
#[derive(Clone)]
pub struct RefreshBus {
    inner: Arc<Inner>,
}

struct Inner {
    tx: mpsc::Sender<Message>,
    rx: tokio::sync::Mutex<mpsc::Receiver<Message>>,
    listening: Mutex<bool>,
    capacity: usize,
}

/// Releases the listener flag when the subscription completes or is dropped
struct ListenGuard {
    inner: Arc<Inner>,
}

impl Drop for ListenGuard {
    fn drop(&mut self) {
        *self.inner.listening.lock() = false;
    }
}

impl RefreshBus {
    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus holding at most `capacity` pending entries (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            inner: Arc::new(Inner {
                tx,
                rx: tokio::sync::Mutex::new(rx),
                listening: Mutex::new(false),
                capacity,
            }),
        }
    }

    /// Request a refresh. Never blocks; dropped if the channel is full.
    pub fn signal(&self) {
        self.send(Message::Refresh);
    }

    /// Request a refresh carrying a message for the skeleton and pages
    pub fn signal_with(&self, msg: Message) {
        self.send(msg);
    }

    fn send(&self, msg: Message) {
        match self.inner.tx.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(msg)) => {
                tracing::trace!(kind = msg.kind(), "refresh channel full, signal coalesced");
            }
            Err(TrySendError::Closed(msg)) => {
                tracing::trace!(kind = msg.kind(), "refresh channel closed, signal dropped");
            }
        }
    }

    /// Wait for the next signal.
    ///
    /// Returns `None` while another subscription is outstanding. The flag is
    /// released once the returned future resolves (or is dropped).
    pub fn subscribe(&self) -> Option<BoxFuture<'static, Message>> {
        {
            let mut listening = self.inner.listening.lock();
            if *listening {
                return None;
            }
            *listening = true;
        }

        let guard = ListenGuard {
            inner: Arc::clone(&self.inner),
        };

        Some(
            async move {
                let msg = {
                    let mut rx = guard.inner.rx.lock().await;
                    // The sender lives in `Inner`, so the channel cannot close here.
                    rx.recv().await.unwrap_or(Message::Refresh)
                };
                drop(guard);
                msg
            }
            .boxed(),
        )
    }

    /// `subscribe()` wrapped as a host command
    pub fn listen(&self) -> Option<Command> {
        self.subscribe().map(Command::Future)
    }

    /// Whether a subscription is outstanding
    pub fn is_listening(&self) -> bool {
        *self.inner.listening.lock()
    }

    /// Number of queued entries
    pub fn pending(&self) -> usize {
        self.inner.capacity - self.inner.tx.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RefreshBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshBus")
            .field("capacity", &self.inner.capacity)
            .field("pending", &self.pending())
            .field("listening", &self.is_listening())
            .finish()
    }
}
