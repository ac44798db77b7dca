//! Tab Registry - ordered tabs, lock state and navigation
//!
//! Each slot pairs a tab (key + title) with the page it shows. The registry
//! never drops below one tab once populated, and navigation only lands on
//! tabs that are not effectively locked.

use std::collections::HashSet;

/// Header entry of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Global lock flag plus individually locked keys
#[derive(Debug, Clone, Default)]
pub struct LockState {
    pub all: bool,
    pub tabs: HashSet<String>,
}

impl LockState {
    /// Locked via the global flag or individually
    pub fn is_locked(&self, key: &str) -> bool {
        self.all || self.tabs.contains(key)
    }
}

#[derive(Debug)]
struct Slot<P> {
    tab: Tab,
    page: P,
}

/// Ordered collection of tabs with their pages
#[derive(Debug)]
pub struct TabRegistry<P> {
    slots: Vec<Slot<P>>,
    current: usize,
    locks: LockState,
}

impl<P> Default for TabRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TabRegistry<P> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            current: 0,
            locks: LockState::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────

    /// Append a tab. Returns false (and keeps the registry unchanged) if
    /// the key already exists.
    pub fn add_tab(&mut self, key: impl Into<String>, title: impl Into<String>, page: P) -> bool {
        let key = key.into();
        if self.position(&key).is_some() {
            tracing::debug!(key = %key, "tab already exists, ignoring add");
            return false;
        }
        self.slots.push(Slot {
            tab: Tab {
                key,
                title: title.into(),
            },
            page,
        });
        true
    }

    /// Rename a tab. Unknown keys are ignored.
    pub fn update_title(&mut self, key: &str, title: impl Into<String>) -> bool {
        match self.position(key) {
            Some(i) => {
                self.slots[i].tab.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Remove a tab and hand back its page.
    ///
    /// The last remaining tab is never removed. Removing the active tab
    /// makes the first tab active.
    pub fn remove_tab(&mut self, key: &str) -> Option<P> {
        if self.slots.len() <= 1 {
            return None;
        }
        let index = self.position(key)?;

        if index == self.current {
            self.current = 0;
        } else if index < self.current {
            self.current -= 1;
        }

        self.locks.tabs.remove(key);
        let slot = self.slots.remove(index);
        tracing::debug!(key = %slot.tab.key, remaining = self.slots.len(), "tab removed");
        Some(slot.page)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Tabs in display order
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.slots.iter().map(|slot| &slot.tab)
    }

    pub fn page_mut(&mut self, key: &str) -> Option<&mut P> {
        let index = self.position(key)?;
        Some(&mut self.slots[index].page)
    }

    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.slots.iter_mut().map(|slot| &mut slot.page)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tab.key == key)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Active tab
    // ─────────────────────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Key of the active tab, `None` only before any tab was added
    pub fn current_key(&self) -> Option<&str> {
        self.slots.get(self.current).map(|slot| slot.tab.key.as_str())
    }

    pub fn active_page(&self) -> Option<&P> {
        self.slots.get(self.current).map(|slot| &slot.page)
    }

    pub fn active_page_mut(&mut self) -> Option<&mut P> {
        self.slots.get_mut(self.current).map(|slot| &mut slot.page)
    }

    /// Activate the tab with `key`. Unknown keys are ignored.
    pub fn set_active(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(i) => {
                self.current = i;
                true
            }
            None => false,
        }
    }

    /// Move to the nearest unlocked tab on the left, without wrapping.
    /// Returns true if the active tab changed.
    pub fn navigate_left(&mut self) -> bool {
        if self.locks.all {
            return false;
        }
        let target = (0..self.current).rev().find(|&i| !self.is_index_locked(i));
        self.move_to(target)
    }

    /// Move to the nearest unlocked tab on the right, without wrapping.
    /// Returns true if the active tab changed.
    pub fn navigate_right(&mut self) -> bool {
        if self.locks.all {
            return false;
        }
        let target = (self.current + 1..self.slots.len()).find(|&i| !self.is_index_locked(i));
        self.move_to(target)
    }

    fn move_to(&mut self, target: Option<usize>) -> bool {
        match target {
            Some(i) => {
                self.current = i;
                tracing::debug!(key = %self.slots[i].tab.key, "active tab changed");
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Locks
    // ─────────────────────────────────────────────────────────────────────

    pub fn lock_all(&mut self) {
        self.locks.all = true;
    }

    /// Clears the global flag and every individual lock
    pub fn unlock_all(&mut self) {
        self.locks.all = false;
        self.locks.tabs.clear();
    }

    pub fn lock_tab(&mut self, key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.locks.tabs.insert(key.to_string());
        true
    }

    pub fn unlock_tab(&mut self, key: &str) -> bool {
        self.locks.tabs.remove(key)
    }

    /// Lock every tab left of the active one
    pub fn lock_tabs_left_of_current(&mut self) {
        let keys = self.keys_in(0..self.current);
        self.locks.tabs.extend(keys);
    }

    /// Lock every tab right of the active one
    pub fn lock_tabs_right_of_current(&mut self) {
        let keys = self.keys_in(self.current + 1..self.slots.len());
        self.locks.tabs.extend(keys);
    }

    pub fn unlock_tabs_left_of_current(&mut self) {
        for key in self.keys_in(0..self.current) {
            self.locks.tabs.remove(&key);
        }
    }

    pub fn unlock_tabs_right_of_current(&mut self) {
        for key in self.keys_in(self.current + 1..self.slots.len()) {
            self.locks.tabs.remove(&key);
        }
    }

    fn keys_in(&self, range: std::ops::Range<usize>) -> Vec<String> {
        self.slots
            .get(range)
            .into_iter()
            .flatten()
            .map(|slot| slot.tab.key.clone())
            .collect()
    }

    pub fn is_all_locked(&self) -> bool {
        self.locks.all
    }

    pub fn is_effectively_locked(&self, key: &str) -> bool {
        self.locks.is_locked(key)
    }

    fn is_index_locked(&self, index: usize) -> bool {
        self.locks.is_locked(&self.slots[index].tab.key)
    }

    pub fn locks(&self) -> &LockState {
        &self.locks
    }
}
