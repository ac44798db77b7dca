//! Text helpers - display width, padding and truncation of styled lines

use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns taken by `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Terminal columns taken by a styled line
pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|span| display_width(&span.content)).sum()
}

/// `glyph` repeated `count` times as a styled span
pub fn repeat(glyph: &str, count: usize, style: Style) -> Span<'static> {
    Span::styled(glyph.repeat(count), style)
}

/// Pad or truncate `line` to exactly `width` columns
pub fn fit_line(line: Line<'static>, width: usize, alignment: Alignment) -> Line<'static> {
    let current = line_width(&line);
    if current > width {
        return truncate_line(line, width);
    }

    let style = line.style;
    let slack = width - current;
    let (left, right) = match alignment {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack / 2, slack - slack / 2),
    };

    let mut spans = Vec::with_capacity(line.spans.len() + 2);
    if left > 0 {
        spans.push(Span::raw(" ".repeat(left)));
    }
    spans.extend(line.spans);
    if right > 0 {
        spans.push(Span::raw(" ".repeat(right)));
    }
    Line::from(spans).style(style)
}

fn truncate_line(line: Line<'static>, width: usize) -> Line<'static> {
    let style = line.style;
    let mut remaining = width;
    let mut spans = Vec::new();

    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let mut kept = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if w > remaining {
                remaining = 0;
                break;
            }
            remaining -= w;
            kept.push(c);
        }
        spans.push(Span::styled(kept, span.style));
    }

    // A wide glyph cut at the edge leaves a hole; fill it.
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::raw(" ".repeat(width - used)));
    }
    Line::from(spans).style(style)
}

/// Unstyled content of a text block, one `\n` per line
pub fn plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
