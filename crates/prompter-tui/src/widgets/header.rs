//! Header bar widget
//!
//! Shows the server state badge, the control URL and the mirror/autoscroll
//! indicators.

use prompter_app::state::{AppState, PairingAddress};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Status dot, app name and server state
    fn title_line(&self) -> Line<'static> {
        let (icon, label, style) = styles::server_indicator(self.state.server_state);
        Line::from(vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled("prompter", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(label, style),
        ])
    }

    fn address_line(&self) -> Option<Line<'static>> {
        let span = match &self.state.pairing {
            PairingAddress::Unknown => return None,
            PairingAddress::Resolving => Span::styled("resolving address…", styles::text_muted()),
            PairingAddress::Resolved(url) => Span::styled(url.clone(), styles::text_secondary()),
            PairingAddress::Failed(_) => Span::styled("address unavailable", styles::status_red()),
        };
        Some(Line::from(span))
    }

    fn indicators_line(&self) -> Line<'static> {
        let display = &self.state.display;
        let indicator = |active: bool, text: &'static str| {
            let style = if active {
                styles::accent()
            } else {
                styles::text_muted()
            };
            Span::styled(text, style)
        };

        Line::from(vec![
            indicator(display.mirrored, "⇄ Mirror"),
            Span::raw("  "),
            indicator(display.autoscroll_enabled, "▼ Autoscroll"),
            Span::raw(" "),
        ])
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = self.title_line();
        let title_width = title.width() as u16;
        buf.set_line(inner.x, inner.y, &title, inner.width);

        let mut used = title_width;

        if let Some(address) = self.address_line() {
            let address_x = inner.x + used + 2;
            let address_width = address.width() as u16;
            if used + 2 + address_width <= inner.width {
                buf.set_line(address_x, inner.y, &address, address_width);
                used += 2 + address_width;
            }
        }

        // Right-aligned, only when there is room to spare
        let indicators = self.indicators_line();
        let indicators_width = indicators.width() as u16;
        if used + 2 + indicators_width <= inner.width {
            let x = inner.right() - indicators_width;
            buf.set_line(x, inner.y, &indicators, indicators_width);
        }
    }
}
