//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Header background
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Pairing overlay

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White; // Prompter text
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // Running
pub const STATUS_RED: Color = Color::Red; // Stopped / errors
pub const STATUS_YELLOW: Color = Color::Yellow; // Loading, key hints

// --- Effects ---
pub const SHADOW: Color = Color::Black;
