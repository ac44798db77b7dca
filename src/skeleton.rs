//! Skeleton - the controller owning tabs, widgets and layout
//!
//! Receives every message from the host loop, handles tab navigation and
//! quitting itself, forwards the rest to the active page, and re-arms the
//! refresh subscription after every bus delivery so exactly one listener
//! is outstanding.
//!
//! One skeleton per terminal: its [`Context`] carries the viewport that
//! pages read, and two skeletons drawing to the same terminal would fight
//! over it. Independent skeletons with their own contexts are fine.

use ratatui::layout::Alignment;
use ratatui::style::Color;
use ratatui::text::Text;

use crate::compositor::{header_required_width, Compositor};
use crate::context::Context;
use crate::error::{Result, SkeletonError};
use crate::keymap::{KeyAction, KeyMap};
use crate::message::{Command, Message};
use crate::page::Page;
use crate::refresh::RefreshBus;
use crate::tabs::TabRegistry;
use crate::theme::Theme;
use crate::widgets::WidgetBar;

/// A page plus whether its `init` has run
struct PageSlot {
    page: Box<dyn Page>,
    initialized: bool,
}

impl PageSlot {
    fn init(&mut self) -> Vec<Command> {
        if self.initialized {
            return Vec::new();
        }
        self.initialized = true;
        self.page.init()
    }
}

impl std::fmt::Debug for PageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSlot")
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

/// Multi-tab application shell
#[derive(Debug)]
pub struct Skeleton {
    ctx: Context,
    tabs: TabRegistry<PageSlot>,
    widgets: WidgetBar,
    compositor: Compositor,
    theme: Theme,
    keymap: KeyMap,
    started: bool,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl Skeleton {
    pub fn new() -> Self {
        Self::with_bus(RefreshBus::new())
    }

    pub fn with_bus(bus: RefreshBus) -> Self {
        let ctx = Context::new(bus);
        let compositor = Compositor::new(ctx.viewport().clone());
        Self {
            ctx,
            tabs: TabRegistry::new(),
            widgets: WidgetBar::new(),
            compositor,
            theme: Theme::default(),
            keymap: KeyMap::default(),
            started: false,
        }
    }

    /// Handle for pages and background tasks
    pub fn context(&self) -> Context {
        self.ctx.clone()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> &mut Self {
        self.theme = theme;
        self.changed()
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn set_keymap(&mut self, keymap: KeyMap) -> &mut Self {
        self.keymap = keymap;
        self
    }

    /// Recompute layout and ask for a redraw
    fn changed(&mut self) -> &mut Self {
        self.relayout();
        self.ctx.signal();
        self
    }

    fn relayout(&mut self) {
        let header = header_required_width(&self.tabs, &self.theme);
        let widgets = self.widgets.required_width(&self.theme);
        self.compositor.relayout(header, widgets);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────

    /// Register a page. Ignored if `key` is already taken.
    pub fn add_page(
        &mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        page: impl Page + 'static,
    ) -> &mut Self {
        let key = key.into();
        let slot = PageSlot {
            page: Box::new(page),
            initialized: false,
        };
        if !self.tabs.add_tab(key.clone(), title, slot) {
            return self;
        }
        tracing::debug!(key = %key, pages = self.tabs.len(), "page added");
        self.relayout();
        self.ctx.bus().signal_with(Message::PageAdded { key });
        self
    }

    pub fn update_page_title(&mut self, key: &str, title: impl Into<String>) -> &mut Self {
        self.tabs.update_title(key, title);
        self.changed()
    }

    /// Remove a page. The last page is never removed.
    pub fn delete_page(&mut self, key: &str) -> &mut Self {
        self.tabs.remove_tab(key);
        self.changed()
    }

    pub fn set_active_page(&mut self, key: &str) -> &mut Self {
        self.tabs.set_active(key);
        self.changed()
    }

    /// Key of the active page, `None` before any page was added
    pub fn active_page(&self) -> Option<&str> {
        self.tabs.current_key()
    }

    pub fn page_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn page_keys(&self) -> Vec<String> {
        self.tabs.tabs().map(|tab| tab.key.clone()).collect()
    }

    pub fn page_title(&self, key: &str) -> Option<&str> {
        self.tabs
            .tabs()
            .find(|tab| tab.key == key)
            .map(|tab| tab.title.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Widgets
    // ─────────────────────────────────────────────────────────────────────

    /// Insert or update a footer widget
    pub fn update_widget(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.widgets.put(key, value);
        self.changed()
    }

    /// Same as [`update_widget`](Self::update_widget)
    pub fn add_widget(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.update_widget(key, value)
    }

    pub fn delete_widget(&mut self, key: &str) -> &mut Self {
        self.widgets.remove(key);
        self.changed()
    }

    pub fn delete_all_widgets(&mut self) -> &mut Self {
        self.widgets.clear();
        self.changed()
    }

    pub fn widget_value(&self, key: &str) -> Option<&str> {
        self.widgets.get(key).map(|w| w.value.as_str())
    }

    pub fn widgets(&self) -> &WidgetBar {
        &self.widgets
    }

    // ─────────────────────────────────────────────────────────────────────
    // Locks
    // ─────────────────────────────────────────────────────────────────────

    /// Lock every tab: navigation keys become no-ops
    pub fn lock_tabs(&mut self) -> &mut Self {
        self.tabs.lock_all();
        self.changed()
    }

    /// Clear the global lock and every individual tab lock
    pub fn unlock_tabs(&mut self) -> &mut Self {
        self.tabs.unlock_all();
        self.changed()
    }

    pub fn is_tabs_locked(&self) -> bool {
        self.tabs.is_all_locked()
    }

    pub fn lock_tab(&mut self, key: &str) -> &mut Self {
        self.tabs.lock_tab(key);
        self.changed()
    }

    pub fn unlock_tab(&mut self, key: &str) -> &mut Self {
        self.tabs.unlock_tab(key);
        self.changed()
    }

    /// Locked globally or individually
    pub fn is_tab_locked(&self, key: &str) -> bool {
        self.tabs.is_effectively_locked(key)
    }

    pub fn lock_tabs_to_left(&mut self) -> &mut Self {
        self.tabs.lock_tabs_left_of_current();
        self.changed()
    }

    pub fn lock_tabs_to_right(&mut self) -> &mut Self {
        self.tabs.lock_tabs_right_of_current();
        self.changed()
    }

    pub fn unlock_tabs_to_left(&mut self) -> &mut Self {
        self.tabs.unlock_tabs_left_of_current();
        self.changed()
    }

    pub fn unlock_tabs_to_right(&mut self) -> &mut Self {
        self.tabs.unlock_tabs_right_of_current();
        self.changed()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styling
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_border_color(&mut self, color: Color) -> &mut Self {
        self.theme.border_color = color;
        self.changed()
    }

    pub fn border_color(&self) -> Color {
        self.theme.border_color
    }

    pub fn set_widget_border_color(&mut self, color: Color) -> &mut Self {
        self.theme.widget_border_color = Some(color);
        self.changed()
    }

    pub fn widget_border_color(&self) -> Color {
        self.theme.widget_border_color.unwrap_or(self.theme.border_color)
    }

    pub fn set_active_tab_border_color(&mut self, color: Color) -> &mut Self {
        self.theme.active_tab_border = color;
        self.changed()
    }

    pub fn set_active_tab_text_color(&mut self, color: Color) -> &mut Self {
        self.theme.active_tab_text = Some(color);
        self.changed()
    }

    pub fn set_inactive_tab_border_color(&mut self, color: Color) -> &mut Self {
        self.theme.inactive_tab_border = color;
        self.changed()
    }

    pub fn set_inactive_tab_text_color(&mut self, color: Color) -> &mut Self {
        self.theme.inactive_tab_text = Some(color);
        self.changed()
    }

    pub fn set_page_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.theme.page_alignment = alignment;
        self.changed()
    }

    pub fn page_alignment(&self) -> Alignment {
        self.theme.page_alignment
    }

    pub fn set_tab_left_padding(&mut self, padding: u16) -> &mut Self {
        self.theme.tab_padding_left = padding;
        self.changed()
    }

    pub fn set_tab_right_padding(&mut self, padding: u16) -> &mut Self {
        self.theme.tab_padding_right = padding;
        self.changed()
    }

    pub fn set_widget_left_padding(&mut self, padding: u16) -> &mut Self {
        self.theme.widget_padding_left = padding;
        self.changed()
    }

    pub fn set_widget_right_padding(&mut self, padding: u16) -> &mut Self {
        self.theme.widget_padding_right = padding;
        self.changed()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Viewport queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn terminal_width(&self) -> u16 {
        self.ctx.terminal_width()
    }

    pub fn terminal_height(&self) -> u16 {
        self.ctx.terminal_height()
    }

    /// Terminal width minus the side borders
    pub fn content_width(&self) -> u16 {
        self.compositor.content_width()
    }

    /// Terminal height minus header and footer
    pub fn content_height(&self) -> u16 {
        self.compositor.content_height(&self.widgets)
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    // ─────────────────────────────────────────────────────────────────────
    // Host loop
    // ─────────────────────────────────────────────────────────────────────

    /// Start: subscribe to the refresh bus and initialize every page.
    ///
    /// Fails with [`SkeletonError::NoPages`] when no page was added.
    pub fn init(&mut self) -> Result<Vec<Command>> {
        if self.tabs.is_empty() {
            return Err(SkeletonError::NoPages);
        }
        tracing::info!(pages = self.tabs.len(), "skeleton starting");
        self.started = true;

        let mut cmds: Vec<Command> = self.ctx.bus().listen().into_iter().collect();
        cmds.extend(self.init_pending_pages());
        Ok(cmds)
    }

    /// Handle one message and return the commands it produced
    pub fn update(&mut self, msg: Message) -> Vec<Command> {
        self.apply_pending_ops();

        let mut cmds = Vec::new();
        match msg {
            Message::Resize { width, height } => {
                self.compositor.measure(width, height);
                self.relayout();
                cmds.extend(self.forward(&msg));
            }
            Message::Key(key) => match self.keymap.action(&key) {
                KeyAction::Quit => return vec![Command::Quit],
                KeyAction::SwitchTabLeft => {
                    if self.tabs.navigate_left() {
                        cmds.push(Command::Emit(Message::ActivePage));
                    }
                }
                KeyAction::SwitchTabRight => {
                    if self.tabs.navigate_right() {
                        cmds.push(Command::Emit(Message::ActivePage));
                    }
                }
                KeyAction::Forward => cmds.extend(self.forward(&msg)),
            },
            Message::PageAdded { .. } => {
                cmds.extend(self.init_pending_pages());
                cmds.extend(self.ctx.bus().listen());
            }
            Message::Refresh | Message::ActivePage | Message::Custom(_) => {
                // The PageAdded signal is lossy; catch pages whose signal was dropped
                cmds.extend(self.init_pending_pages());
                cmds.extend(self.forward(&msg));
                cmds.extend(self.ctx.bus().listen());
            }
        }
        cmds
    }

    /// Run `init` of every page added since the last call. No-op before start.
    fn init_pending_pages(&mut self) -> Vec<Command> {
        if !self.started {
            return Vec::new();
        }
        self.tabs.pages_mut().flat_map(PageSlot::init).collect()
    }

    fn forward(&mut self, msg: &Message) -> Vec<Command> {
        match self.tabs.active_page_mut() {
            Some(slot) => slot.page.update(msg),
            None => Vec::new(),
        }
    }

    fn apply_pending_ops(&mut self) {
        for op in self.ctx.take_ops() {
            op(self);
        }
    }

    /// Draw header, active page and widgets, or a placeholder
    pub fn render(&self) -> Text<'static> {
        let body = self
            .tabs
            .active_page()
            .map(|slot| slot.page.render())
            .unwrap_or_default();
        self.compositor
            .render(&self.tabs, &self.widgets, body, &self.theme)
    }
}
