//! Skeleton - multi-tab terminal application shell
//!
//! A [`Skeleton`] owns a row of tabs (each backed by a [`Page`]), a footer
//! of key/value widgets and a bordered frame around the active page. A
//! [`Program`] drives it on a real terminal; background tasks talk to it
//! through a cloneable [`Context`].

pub mod compositor;
pub mod config;
pub mod context;
pub mod demo;
pub mod error;
pub mod keymap;
pub mod message;
pub mod page;
pub mod program;
pub mod refresh;
pub mod skeleton;
pub mod tabs;
pub mod text;
pub mod theme;
pub mod viewport;
pub mod widgets;

pub use config::SkeletonConfig;
pub use context::Context;
pub use error::{FixSuggestion, Result, SkeletonError};
pub use keymap::{KeyBinding, KeyMap};
pub use message::{Command, Message};
pub use page::Page;
pub use program::Program;
pub use refresh::RefreshBus;
pub use skeleton::Skeleton;
pub use theme::Theme;
pub use viewport::ViewportSize;
