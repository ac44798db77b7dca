//! Theme - colors, paddings and border glyphs of the skeleton chrome

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};

/// Visual settings of header, frame and widget bar
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Frame
    pub border_color: Color,
    pub page_alignment: Alignment,

    // Tabs
    pub active_tab_border: Color,
    pub active_tab_text: Option<Color>,
    pub inactive_tab_border: Color,
    pub inactive_tab_text: Option<Color>,
    pub disabled_tab: Color,
    pub tab_padding_left: u16,
    pub tab_padding_right: u16,

    // Widgets (follows the border color until set explicitly)
    pub widget_border_color: Option<Color>,
    pub widget_padding_left: u16,
    pub widget_padding_right: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_color: Color::Indexed(39),
            page_alignment: Alignment::Center,

            active_tab_border: Color::Indexed(205),
            active_tab_text: None,
            inactive_tab_border: Color::Indexed(255),
            inactive_tab_text: None,
            disabled_tab: Color::Indexed(240),
            tab_padding_left: 2,
            tab_padding_right: 2,

            widget_border_color: None,
            widget_padding_left: 1,
            widget_padding_right: 1,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    /// Outer frame, header filler and corners
    pub fn border(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    pub fn widget_border(&self) -> Style {
        Style::default().fg(self.widget_border_color.unwrap_or(self.border_color))
    }

    pub fn active_tab_border_style(&self) -> Style {
        Style::default().fg(self.active_tab_border)
    }

    pub fn active_tab_title(&self) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        match self.active_tab_text {
            Some(color) => style.fg(color),
            None => style,
        }
    }

    pub fn inactive_tab_border_style(&self) -> Style {
        Style::default().fg(self.inactive_tab_border)
    }

    pub fn inactive_tab_title(&self) -> Style {
        match self.inactive_tab_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    /// Locked inactive tabs: border and title share the dimmed color
    pub fn disabled_tab_style(&self) -> Style {
        Style::default().fg(self.disabled_tab)
    }

    /// Horizontal space a tab adds around its title, borders included
    pub fn tab_decoration(&self) -> usize {
        (self.tab_padding_left + self.tab_padding_right) as usize + 2
    }

    /// Horizontal space a widget adds around its value, borders included
    pub fn widget_decoration(&self) -> usize {
        (self.widget_padding_left + self.widget_padding_right) as usize + 2
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Border glyphs
// ─────────────────────────────────────────────────────────────────────────────

/// A box border: corners and straight segments
#[derive(Debug, Clone, Copy)]
pub struct BoxGlyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
}

pub mod glyphs {
    use super::BoxGlyphs;

    pub const ROUNDED: BoxGlyphs = BoxGlyphs {
        top_left: "╭",
        top_right: "╮",
        bottom_left: "╰",
        bottom_right: "╯",
        horizontal: "─",
    };

    pub const DOUBLE: BoxGlyphs = BoxGlyphs {
        top_left: "╔",
        top_right: "╗",
        bottom_left: "╚",
        bottom_right: "╝",
        horizontal: "═",
    };

    /// Tab sides, joining the tab to the frame line
    pub const TAB_LEFT: &str = "┤";
    pub const TAB_RIGHT: &str = "├";

    pub const VERTICAL: &str = "│";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::new();
        assert_eq!(theme.border_color, Color::Indexed(39));
        assert_eq!(theme.active_tab_border, Color::Indexed(205));
        assert_eq!(theme.page_alignment, Alignment::Center);
        assert_eq!(theme.tab_decoration(), 6);
        assert_eq!(theme.widget_decoration(), 4);
    }

    #[test]
    fn test_widget_border_follows_border_color() {
        let mut theme = Theme::new();
        theme.border_color = Color::Indexed(27);
        assert_eq!(theme.widget_border().fg, Some(Color::Indexed(27)));

        theme.widget_border_color = Some(Color::Indexed(142));
        theme.border_color = Color::Indexed(1);
        assert_eq!(theme.widget_border().fg, Some(Color::Indexed(142)));
    }
}
