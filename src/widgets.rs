//! Widget Bar - key/value status entries shown in the footer
//!
//! Entries keep insertion order; updating a value never moves an entry.
//! Only values are drawn, keys are identities.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::text::{display_width, repeat};
use crate::theme::{glyphs, Theme};

/// One status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub key: String,
    pub value: String,
}

/// Ordered status entries
#[derive(Debug, Clone, Default)]
pub struct WidgetBar {
    widgets: Vec<Widget>,
}

/// Rows taken by a non-empty bar
pub const WIDGET_BAR_HEIGHT: u16 = 3;

impl WidgetBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update. New keys go to the end, existing keys keep their slot.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.widgets.iter_mut().find(|w| w.key == key) {
            Some(widget) => widget.value = value,
            None => self.widgets.push(Widget { key, value }),
        }
    }

    /// Remove by key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.key != key);
        self.widgets.len() != before
    }

    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Rows the bar occupies: zero when empty
    pub fn height(&self) -> u16 {
        if self.widgets.is_empty() {
            0
        } else {
            WIDGET_BAR_HEIGHT
        }
    }

    /// Columns needed to draw every entry plus the two frame corners
    pub fn required_width(&self, theme: &Theme) -> usize {
        let entries: usize = self
            .widgets
            .iter()
            .map(|w| display_width(&w.value) + theme.widget_decoration())
            .sum();
        entries + 2
    }

    /// Draw the bar as the bottom edge of the frame, entries right-aligned.
    ///
    /// Callers check `required_width` first; a too-narrow width yields an
    /// empty filler rather than a panic.
    pub fn lines(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        if self.widgets.is_empty() {
            return Vec::new();
        }

        let fill = width.saturating_sub(self.required_width(theme));
        let border = theme.border();
        let boxed = theme.widget_border();
        let b = glyphs::ROUNDED;

        let mut top = vec![
            Span::styled(glyphs::VERTICAL, border),
            Span::raw(" ".repeat(fill)),
        ];
        let mut middle = vec![
            Span::styled(b.bottom_left, border),
            repeat(b.horizontal, fill, border),
        ];
        let mut bottom = vec![Span::raw(" ".repeat(fill + 1))];

        for widget in &self.widgets {
            let inner = display_width(&widget.value)
                + (theme.widget_padding_left + theme.widget_padding_right) as usize;

            top.push(Span::styled(b.top_left, boxed));
            top.push(repeat(b.horizontal, inner, boxed));
            top.push(Span::styled(b.top_right, boxed));

            middle.push(Span::styled(glyphs::TAB_LEFT, boxed));
            middle.push(Span::raw(" ".repeat(theme.widget_padding_left as usize)));
            middle.push(Span::styled(widget.value.clone(), Style::default()));
            middle.push(Span::raw(" ".repeat(theme.widget_padding_right as usize)));
            middle.push(Span::styled(glyphs::TAB_RIGHT, boxed));

            bottom.push(Span::styled(b.bottom_left, boxed));
            bottom.push(repeat(b.horizontal, inner, boxed));
            bottom.push(Span::styled(b.bottom_right, boxed));
        }

        top.push(Span::styled(glyphs::VERTICAL, border));
        middle.push(Span::styled(b.bottom_right, border));
        bottom.push(Span::raw(" "));

        vec![Line::from(top), Line::from(middle), Line::from(bottom)]
    }
}
