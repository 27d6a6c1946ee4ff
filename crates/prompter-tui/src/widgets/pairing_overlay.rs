//! Pairing overlay
//!
//! Modal shown after the control server starts, telling the user which
//! address to open on the controlling device. It stays up until a client
//! loads the control page or the user dismisses it.

use prompter_app::state::PairingAddress;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal;
use crate::theme::{palette, styles};

const MIN_WIDTH: u16 = 36;
const HEIGHT: u16 = 8;

pub struct PairingOverlay<'a> {
    pairing: &'a PairingAddress,
}

impl<'a> PairingOverlay<'a> {
    pub fn new(pairing: &'a PairingAddress) -> Self {
        Self { pairing }
    }

    fn address_line(&self) -> Line<'a> {
        match self.pairing {
            PairingAddress::Resolved(url) => {
                Line::from(Span::styled(url.as_str(), styles::accent_bold()))
            }
            PairingAddress::Failed(error) => {
                Line::from(Span::styled(error.as_str(), styles::status_red()))
            }
            PairingAddress::Resolving | PairingAddress::Unknown => {
                Line::from(Span::styled("resolving address…", styles::text_muted()))
            }
        }
    }
}

impl Widget for PairingOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        modal::dim_background(buf, area);

        let address = self.address_line();
        let width = (address.width() as u16 + 6).max(MIN_WIDTH);
        let rect = modal::centered_rect(width, HEIGHT, area);

        Clear.render(rect, buf);
        modal::render_shadow(buf, rect);

        let block = styles::glass_block(true)
            .title(" Remote control ")
            .style(Style::default().bg(palette::POPUP_BG));

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Please use server at", styles::text_secondary())),
            Line::from(""),
            address,
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" dismiss", styles::text_muted()),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(rect, buf);
    }
}
