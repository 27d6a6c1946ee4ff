//! Widget components for the TUI

mod header;
pub mod modal;
mod pairing_overlay;
mod prompter_view;
mod status_bar;

pub use header::MainHeader;
pub use pairing_overlay::PairingOverlay;
pub use prompter_view::{
    first_visible_row, mirror_row, wrap_text, PrompterView, PrompterViewState, UNITS_PER_ROW,
};
pub use status_bar::StatusBar;
