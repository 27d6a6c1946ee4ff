//! Helpers for drawing a modal above the prompter.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::palette;

/// A `width` x `height` rect centered in `area`, shrunk to fit if needed
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Mute everything already drawn in `area`
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    for position in area.positions() {
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_style(dim_style);
        }
    }
}

/// One-cell shadow along the right and bottom edges of `modal`
pub fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right = modal.right();
    let bottom = modal.bottom();
    let right_edge = (modal.y.saturating_add(1)..=bottom).map(|y| (right, y));
    let bottom_edge = (modal.x.saturating_add(1)..right).map(|x| (x, bottom));

    for position in right_edge.chain(bottom_edge) {
        // Cells past the buffer edge are skipped
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 30, 6);
        assert_eq!(centered_rect(40, 10, area), area);
    }

    #[test]
    fn test_dim_background_only_touches_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        dim_background(&mut buf, Rect::new(5, 3, 10, 5));

        assert_eq!(buf[(5, 3)].fg, palette::TEXT_MUTED);
        assert_eq!(buf[(14, 7)].fg, palette::TEXT_MUTED);
        assert_ne!(buf[(4, 3)].fg, palette::TEXT_MUTED);
        assert_ne!(buf[(15, 8)].fg, palette::TEXT_MUTED);
    }

    #[test]
    fn test_render_shadow_edges() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        render_shadow(&mut buf, Rect::new(5, 2, 10, 6));

        assert_eq!(buf[(15, 3)].bg, palette::SHADOW); // right edge
        assert_eq!(buf[(6, 8)].bg, palette::SHADOW); // bottom edge
    }

    #[test]
    fn test_render_shadow_at_buffer_edge() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        // Shadow would fall outside the buffer; must not panic
        render_shadow(&mut buf, Rect::new(8, 8, 2, 2));
    }
}
