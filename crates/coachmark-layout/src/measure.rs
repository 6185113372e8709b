#![forbid(unsafe_code)]

//! Text measurement capability and a built-in monospace measurer.

use coachmark_core::font::FontSpec;
use coachmark_core::geometry::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Bounding size of `text` set in `font`, wrapped at `max_width`.
///
/// Implementations wrap onto as many lines as needed; the returned width
/// should not exceed `max_width` unless a single glyph is wider.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, max_width: f64) -> Size;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontSpec, f64) -> Size,
{
    fn measure(&self, text: &str, font: &FontSpec, max_width: f64) -> Size {
        self(text, font, max_width)
    }
}

/// Fixed-advance measurer for monospace and cell-grid hosts.
///
/// Each display column is `advance_em * font.size` wide and each line is
/// `line_height_em * font.size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_em: f64,
    pub line_height_em: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl MonospaceMeasurer {
    /// One point per column and per line, for terminal cell grids where
    /// `font.size` is 1.
    #[must_use]
    pub const fn cells() -> Self {
        Self {
            advance_em: 1.0,
            line_height_em: 1.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, max_width: f64) -> Size {
        let advance = self.advance_em * font.size;
        if advance <= 0.0 {
            return Size::ZERO;
        }
        let columns = (max_width.max(0.0) / advance).floor() as usize;
        let lines = wrap_text(text, columns.max(1));
        let widest = lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);
        Size::new(
            widest as f64 * advance,
            lines.len() as f64 * self.line_height_em * font.size,
        )
    }
}

/// Greedy word wrap by display width.
///
/// Words wider than `max_width` are split at grapheme boundaries. Blank
/// paragraphs are kept as empty lines; an empty input yields no lines.
#[must_use]
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width: usize = 0;

        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            if word_width > max_width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                for grapheme in word.graphemes(true) {
                    let w = UnicodeWidthStr::width(grapheme);
                    if current_width + w > max_width && current_width > 0 {
                        lines.push(std::mem::take(&mut current_line));
                        current_width = 0;
                    }
                    current_line.push_str(grapheme);
                    current_width += w;
                }
            } else if current_width == 0 {
                current_line = word.to_string();
                current_width = word_width;
            } else if current_width + 1 + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
                current_width = word_width;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}
