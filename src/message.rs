//! Messages and Commands - what flows between the host loop, the skeleton and pages

use std::any::Any;
use std::fmt;

use crossterm::event::KeyEvent;
use futures::future::BoxFuture;
use futures::FutureExt;

/// Everything the skeleton and its pages can receive
pub enum Message {
    /// Key press from the terminal
    Key(KeyEvent),
    /// Terminal resized
    Resize { width: u16, height: u16 },
    /// Bare refresh signal: visible state may have changed
    Refresh,
    /// Sent after tab navigation so the newly active page can react
    ActivePage,
    /// A page was registered and needs its initialization commands run
    PageAdded { key: String },
    /// Application payload, opaque to the skeleton
    Custom(Box<dyn Any + Send>),
}

impl Message {
    /// Wrap an application payload
    pub fn custom<T: Any + Send>(payload: T) -> Self {
        Self::Custom(Box::new(payload))
    }

    /// Borrow the application payload if it has type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Short description for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Resize { .. } => "resize",
            Self::Refresh => "refresh",
            Self::ActivePage => "active-page",
            Self::PageAdded { .. } => "page-added",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::Refresh => write!(f, "Refresh"),
            Self::ActivePage => write!(f, "ActivePage"),
            Self::PageAdded { key } => f.debug_struct("PageAdded").field("key", key).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Deferred side effect handed back to the host loop
pub enum Command {
    /// Stop the program
    Quit,
    /// Deliver a message on the next loop iteration
    Emit(Message),
    /// Run asynchronously and deliver the resulting message
    Future(BoxFuture<'static, Message>),
}

impl Command {
    /// Wrap a future producing a message
    pub fn future<F>(fut: F) -> Self
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        Self::Future(fut.boxed())
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::Emit(msg) => f.debug_tuple("Emit").field(msg).finish(),
            Self::Future(_) => write!(f, "Future(..)"),
        }
    }
}
