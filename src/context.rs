//! Context - the handle shared between a skeleton, its pages and background tasks
//!
//! Holds the refresh bus, the viewport and a queue of pending mutations.
//! Background producers never touch skeleton state directly: they enqueue
//! an operation and signal the bus, and the skeleton applies queued
//! operations on the loop thread when it handles the refresh.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use ratatui::style::Color;

use crate::page::Page;
use crate::refresh::RefreshBus;
use crate::skeleton::Skeleton;
use crate::viewport::Viewport;

/// A deferred mutation applied on the loop thread
pub type Op = Box<dyn FnOnce(&mut Skeleton) + Send>;

/// Cloneable handle to a skeleton's shared state
#[derive(Clone)]
pub struct Context {
    bus: RefreshBus,
    viewport: Viewport,
    ops: Arc<Mutex<VecDeque<Op>>>,
}

impl Context {
    pub fn new(bus: RefreshBus) -> Self {
        Self {
            bus,
            viewport: Viewport::new(),
            ops: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn bus(&self) -> &RefreshBus {
        &self.bus
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Ask for a redraw
    pub fn signal(&self) {
        self.bus.signal();
    }

    pub fn terminal_width(&self) -> u16 {
        self.viewport.width()
    }

    pub fn terminal_height(&self) -> u16 {
        self.viewport.height()
    }

    /// Queue a mutation and wake the loop. Queued operations are never dropped,
    /// even when the refresh signal itself is coalesced.
    pub fn apply<F>(&self, op: F)
    where
        F: FnOnce(&mut Skeleton) + Send + 'static,
    {
        self.ops.lock().push_back(Box::new(op));
        self.bus.signal();
    }

    pub(crate) fn take_ops(&self) -> Vec<Op> {
        self.ops.lock().drain(..).collect()
    }

    pub fn pending_ops(&self) -> usize {
        self.ops.lock().len()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Convenience mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or update a footer widget
    pub fn set_widget(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.apply(move |s| {
            s.update_widget(key, value);
        });
    }

    pub fn remove_widget(&self, key: impl Into<String>) {
        let key = key.into();
        self.apply(move |s| {
            s.delete_widget(&key);
        });
    }

    pub fn add_page<P: Page + 'static>(
        &self,
        key: impl Into<String>,
        title: impl Into<String>,
        page: P,
    ) {
        let (key, title) = (key.into(), title.into());
        self.apply(move |s| {
            s.add_page(key, title, page);
        });
    }

    pub fn remove_page(&self, key: impl Into<String>) {
        let key = key.into();
        self.apply(move |s| {
            s.delete_page(&key);
        });
    }

    pub fn set_page_title(&self, key: impl Into<String>, title: impl Into<String>) {
        let (key, title) = (key.into(), title.into());
        self.apply(move |s| {
            s.update_page_title(&key, title);
        });
    }

    pub fn set_active_page(&self, key: impl Into<String>) {
        let key = key.into();
        self.apply(move |s| {
            s.set_active_page(&key);
        });
    }

    pub fn lock_tabs(&self) {
        self.apply(|s| {
            s.lock_tabs();
        });
    }

    pub fn unlock_tabs(&self) {
        self.apply(|s| {
            s.unlock_tabs();
        });
    }

    pub fn lock_tab(&self, key: impl Into<String>) {
        let key = key.into();
        self.apply(move |s| {
            s.lock_tab(&key);
        });
    }

    pub fn unlock_tab(&self, key: impl Into<String>) {
        let key = key.into();
        self.apply(move |s| {
            s.unlock_tab(&key);
        });
    }

    pub fn set_border_color(&self, color: Color) {
        self.apply(move |s| {
            s.set_border_color(color);
        });
    }

    pub fn set_active_tab_border_color(&self, color: Color) {
        self.apply(move |s| {
            s.set_active_tab_border_color(color);
        });
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("bus", &self.bus)
            .field("viewport", &self.viewport)
            .field("pending_ops", &self.pending_ops())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_queues_and_signals() {
        let ctx = Context::new(RefreshBus::with_capacity(2));
        ctx.set_widget("time", "10:00");
        ctx.remove_widget("time");
        assert_eq!(ctx.pending_ops(), 2);
        assert_eq!(ctx.bus().pending(), 2);
    }

    #[test]
    fn test_ops_survive_saturated_bus() {
        let ctx = Context::new(RefreshBus::with_capacity(1));
        for i in 0..10 {
            ctx.set_widget("n", i.to_string());
        }
        assert_eq!(ctx.bus().pending(), 1);
        assert_eq!(ctx.pending_ops(), 10);
        assert_eq!(ctx.take_ops().len(), 10);
        assert_eq!(ctx.pending_ops(), 0);
    }

    #[test]
    fn test_ops_from_other_threads() {
        let ctx = Context::new(RefreshBus::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctx = ctx.clone();
                std::thread::spawn(move || ctx.set_widget(format!("w{}", i), "x"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ctx.pending_ops(), 4);
    }
}
