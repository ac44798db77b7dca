//! Compositor - viewport-aware layout of header, page body and widget bar
//!
//! ```text
//!  ╔══════════╗╭──────────╮
//! ╭┤  Active  ├┤  Other   ├──────────────╮   header (3 rows)
//! │╚══════════╝╰──────────╯              │
//! │              page body               │   content rows
//! │                     ╭───────╮╭─────╮ │
//! ╰─────────────────────┤ value ├┤ ... ├─╯   widget bar (3 rows)
//!                       ╰───────╯╰─────╯
//! ```
//!
//! Without widgets the frame is closed by a single `╰──╯` row.

use ratatui::text::{Line, Span, Text};

use crate::tabs::TabRegistry;
use crate::text::{display_width, fit_line, repeat};
use crate::theme::{glyphs, BoxGlyphs, Theme};
use crate::viewport::Viewport;
use crate::widgets::WidgetBar;

pub const HEADER_HEIGHT: u16 = 3;

pub const PLACEHOLDER_INITIALIZING: &str = "setting up terminal...";
pub const PLACEHOLDER_HEADERS: &str = "terminal size is not enough to show headers";
pub const PLACEHOLDER_WIDGETS: &str = "terminal size is not enough to show widgets";

/// Whether a part of the chrome fits the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    /// No usable viewport seen yet; treated as not fitting
    #[default]
    Unmeasured,
    Fits,
    TooSmall,
}

impl Fit {
    fn of(available: usize, required: usize) -> Self {
        if available >= required {
            Self::Fits
        } else {
            Self::TooSmall
        }
    }

    pub fn fits(self) -> bool {
        self == Self::Fits
    }
}

/// Layout state derived from the viewport
#[derive(Debug, Clone)]
pub struct Compositor {
    viewport: Viewport,
    ready: bool,
    header_fit: Fit,
    widgets_fit: Fit,
}

impl Compositor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ready: false,
            header_fit: Fit::Unmeasured,
            widgets_fit: Fit::Unmeasured,
        }
    }

    /// Store a new terminal size. The layout becomes ready with the first
    /// non-zero size and stays ready afterwards.
    pub fn measure(&mut self, width: u16, height: u16) {
        if width > 0 && height > 0 && !self.ready {
            tracing::debug!(width, height, "terminal ready");
            self.ready = true;
        }
        self.viewport.set(width, height);
    }

    /// Recompute both fit flags against the current width
    pub fn relayout(&mut self, header_required: usize, widgets_required: usize) {
        if !self.ready {
            return;
        }
        let width = self.viewport.width() as usize;
        self.header_fit = Fit::of(width, header_required);
        self.widgets_fit = Fit::of(width, widgets_required);
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn header_fit(&self) -> Fit {
        self.header_fit
    }

    pub fn widgets_fit(&self) -> Fit {
        self.widgets_fit
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Width inside the side borders
    pub fn content_width(&self) -> u16 {
        self.viewport.width().saturating_sub(2)
    }

    /// Rows left for the page once header and footer are drawn
    pub fn content_height(&self, widgets: &WidgetBar) -> u16 {
        self.viewport
            .height()
            .saturating_sub(HEADER_HEIGHT)
            .saturating_sub(footer_height(widgets))
    }

    /// Compose the whole screen, or a placeholder when it cannot be drawn
    pub fn render<P>(
        &self,
        tabs: &TabRegistry<P>,
        widgets: &WidgetBar,
        body: Text<'static>,
        theme: &Theme,
    ) -> Text<'static> {
        if !self.ready {
            return Text::from(PLACEHOLDER_INITIALIZING);
        }
        if !self.header_fit.fits() {
            return Text::from(PLACEHOLDER_HEADERS);
        }
        if !self.widgets_fit.fits() {
            return Text::from(PLACEHOLDER_WIDGETS);
        }

        let width = self.viewport.width() as usize;
        let mut lines = header_lines(tabs, width, theme);
        lines.extend(self.body_lines(body, self.content_height(widgets) as usize, theme));
        if widgets.is_empty() {
            lines.push(closing_line(width, theme));
        } else {
            lines.extend(widgets.lines(width, theme));
        }
        Text::from(lines)
    }

    fn body_lines(&self, body: Text<'static>, rows: usize, theme: &Theme) -> Vec<Line<'static>> {
        let inner = self.content_width() as usize;
        let border = theme.border();

        let mut content: Vec<Line<'static>> = body.lines.into_iter().take(rows).collect();
        content.resize(rows, Line::default());

        content
            .into_iter()
            .map(|line| {
                let mut spans = vec![Span::styled(glyphs::VERTICAL, border)];
                spans.extend(fit_line(line, inner, theme.page_alignment).spans);
                spans.push(Span::styled(glyphs::VERTICAL, border));
                Line::from(spans)
            })
            .collect()
    }
}

fn footer_height(widgets: &WidgetBar) -> u16 {
    if widgets.is_empty() {
        1
    } else {
        widgets.height()
    }
}

/// Columns the header needs: every tab with its decoration, plus two corners
pub fn header_required_width<P>(tabs: &TabRegistry<P>, theme: &Theme) -> usize {
    let titles: usize = tabs
        .tabs()
        .map(|tab| display_width(&tab.title) + theme.tab_decoration())
        .sum();
    titles + 2
}

fn header_lines<P>(tabs: &TabRegistry<P>, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let border = theme.border();
    let filler = width.saturating_sub(header_required_width(tabs, theme));
    let current = tabs.current_index();

    let mut top = vec![Span::raw(" ")];
    let mut middle = vec![Span::styled(glyphs::ROUNDED.top_left, border)];
    let mut bottom = vec![Span::styled(glyphs::VERTICAL, border)];

    for (i, tab) in tabs.tabs().enumerate() {
        let (b, frame, title): (BoxGlyphs, _, _) = if i == current {
            (
                glyphs::DOUBLE,
                theme.active_tab_border_style(),
                theme.active_tab_title(),
            )
        } else if tabs.is_effectively_locked(&tab.key) {
            (
                glyphs::ROUNDED,
                theme.disabled_tab_style(),
                theme.disabled_tab_style(),
            )
        } else {
            (
                glyphs::ROUNDED,
                theme.inactive_tab_border_style(),
                theme.inactive_tab_title(),
            )
        };

        let inner = display_width(&tab.title)
            + (theme.tab_padding_left + theme.tab_padding_right) as usize;

        top.push(Span::styled(b.top_left, frame));
        top.push(repeat(b.horizontal, inner, frame));
        top.push(Span::styled(b.top_right, frame));

        middle.push(Span::styled(glyphs::TAB_LEFT, frame));
        middle.push(Span::raw(" ".repeat(theme.tab_padding_left as usize)));
        middle.push(Span::styled(tab.title.clone(), title));
        middle.push(Span::raw(" ".repeat(theme.tab_padding_right as usize)));
        middle.push(Span::styled(glyphs::TAB_RIGHT, frame));

        bottom.push(Span::styled(b.bottom_left, frame));
        bottom.push(repeat(b.horizontal, inner, frame));
        bottom.push(Span::styled(b.bottom_right, frame));
    }

    top.push(Span::raw(" ".repeat(filler + 1)));
    middle.push(repeat(glyphs::ROUNDED.horizontal, filler, border));
    middle.push(Span::styled(glyphs::ROUNDED.top_right, border));
    bottom.push(Span::raw(" ".repeat(filler)));
    bottom.push(Span::styled(glyphs::VERTICAL, border));

    vec![Line::from(top), Line::from(middle), Line::from(bottom)]
}

fn closing_line(width: usize, theme: &Theme) -> Line<'static> {
    let border = theme.border();
    let b = glyphs::ROUNDED;
    Line::from(vec![
        Span::styled(b.bottom_left, border),
        repeat(b.horizontal, width.saturating_sub(2), border),
        Span::styled(b.bottom_right, border),
    ])
}
