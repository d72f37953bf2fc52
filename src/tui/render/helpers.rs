use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Collects the spans of one fixed-width cell. Text past the width is cut with `…`.
pub(super) struct CellSpans {
    spans: Vec<Span<'static>>,
    remaining: usize,
}

impl CellSpans {
    pub(super) fn new(width: usize) -> Self {
        CellSpans {
            spans: Vec::new(),
            remaining: width,
        }
    }

    pub(super) fn remaining(&self) -> usize {
        self.remaining
    }

    pub(super) fn push(&mut self, text: &str, style: Style) {
        if self.remaining == 0 || text.is_empty() {
            return;
        }
        let w = unicode::display_width(text);
        if w <= self.remaining {
            self.spans.push(Span::styled(text.to_string(), style));
            self.remaining -= w;
        } else {
            let cut = unicode::truncate_to_width(text, self.remaining);
            self.spans.push(Span::styled(cut, style));
            self.remaining = 0;
        }
    }

    /// Pad to the full width and hand back the spans
    pub(super) fn finish(mut self, pad_style: Style) -> Vec<Span<'static>> {
        if self.remaining > 0 {
            self.spans
                .push(Span::styled(" ".repeat(self.remaining), pad_style));
        }
        self.spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_spans_pad_to_width() {
        let mut cell = CellSpans::new(8);
        cell.push("ab", Style::default());
        cell.push("cd", Style::default());
        assert_eq!(cell.remaining(), 4);
        let spans = cell.finish(Style::default());
        assert_eq!(spans_width(&spans), 8);
    }

    #[test]
    fn cell_spans_truncate_overflow() {
        let mut cell = CellSpans::new(5);
        cell.push("Webinar", Style::default());
        cell.push("ignored", Style::default());
        let spans = cell.finish(Style::default());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Webi\u{2026}");
    }

    #[test]
    fn zero_width_cell_is_empty() {
        let mut cell = CellSpans::new(0);
        cell.push("x", Style::default());
        assert!(cell.finish(Style::default()).is_empty());
    }
}
