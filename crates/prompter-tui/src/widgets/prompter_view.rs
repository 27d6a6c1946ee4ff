//! Prompter body widget
//!
//! Word-wraps the display text to the available width and shows it from the
//! row selected by the scroll offset. In mirrored mode each row is reversed
//! and right-aligned, so the text reads correctly through a beam splitter.

use prompter_core::DisplayState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

/// Scroll offset units per rendered row
pub const UNITS_PER_ROW: u32 = 50;

/// Blank columns kept on each side of the text
const SIDE_MARGIN: u16 = 2;

/// Wrapped rows kept between frames
///
/// Rows are rebuilt only when the text revision or the wrap width changes.
#[derive(Debug, Default)]
pub struct PrompterViewState {
    key: Option<(u64, usize)>,
    rows: Vec<String>,
}

impl PrompterViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for `text` at `width`, rewrapping only on a new key
    fn rows(&mut self, text: &str, revision: u64, width: usize) -> &[String] {
        let key = (revision, width);
        if self.key != Some(key) {
            self.rows = wrap_text(text, width);
            self.key = Some(key);
        }
        &self.rows
    }
}

pub struct PrompterView<'a> {
    display: &'a DisplayState,
    text_revision: u64,
}

impl<'a> PrompterView<'a> {
    /// `text_revision` must change whenever `display.text` does
    pub fn new(display: &'a DisplayState, text_revision: u64) -> Self {
        Self {
            display,
            text_revision,
        }
    }
}

impl StatefulWidget for PrompterView<'_> {
    type State = PrompterViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let text_area = if area.width > SIDE_MARGIN * 4 {
            Rect {
                x: area.x + SIDE_MARGIN,
                width: area.width - SIDE_MARGIN * 2,
                ..area
            }
        } else {
            area
        };

        if text_area.width == 0 || text_area.height == 0 {
            return;
        }

        let rows = state.rows(
            &self.display.text,
            self.text_revision,
            text_area.width as usize,
        );
        let first = first_visible_row(self.display.scroll_offset, rows.len());
        let style = styles::text_primary();

        for (y, row) in (text_area.y..text_area.bottom()).zip(rows.iter().skip(first)) {
            if self.display.mirrored {
                let mirrored = mirror_row(row);
                let row_width = (mirrored.width() as u16).min(text_area.width);
                let x = text_area.right() - row_width;
                buf.set_stringn(x, y, &mirrored, row_width as usize, style);
            } else {
                buf.set_stringn(text_area.x, y, row, text_area.width as usize, style);
            }
        }
    }
}

impl Widget for PrompterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = PrompterViewState::new();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

/// Row shown at the top for `scroll_offset`, never past the last row
pub fn first_visible_row(scroll_offset: u32, row_count: usize) -> usize {
    let row = (scroll_offset / UNITS_PER_ROW) as usize;
    row.min(row_count.saturating_sub(1))
}

/// Reverse a row for mirrored display
pub fn mirror_row(row: &str) -> String {
    row.chars().rev().collect()
}

/// Greedy word wrap to `width` columns.
///
/// Line breaks in the text are kept; an empty line stays an empty row.
/// Words wider than a row are split across rows.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    if width == 0 {
        return rows;
    }

    for line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in line.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }

            if current_width > 0 {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                let mut pieces = split_word(word, width);
                if let Some(last) = pieces.pop() {
                    rows.extend(pieces);
                    current_width = last.width();
                    current = last;
                }
            }
        }

        rows.push(current);
    }

    rows
}

/// Break a single word into pieces no wider than `width`
fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
