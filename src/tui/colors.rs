//! Semantic color constants for consistent TUI styling.

use ratatui::prelude::*;

pub const FOCUS_COLOR: Color = Color::Cyan;
pub const HEADER_COLOR: Color = Color::White;
pub const HELP_TEXT: Color = Color::DarkGray;
pub const CHIP_COLOR: Color = Color::Blue;
pub const SELECTED_COLOR: Color = Color::Yellow;
pub const SUCCESS_COLOR: Color = Color::Green;
pub const ERROR_COLOR: Color = Color::Red;
pub const WARNING_COLOR: Color = Color::Yellow;
pub const MUTED_COLOR: Color = Color::Gray;
pub const STATUS_BAR_BG: Color = Color::DarkGray;
pub const STATUS_BAR_FG: Color = Color::White;

/// Color for a status value, shared by content and website lists
pub fn status_color(status: &str) -> Color {
    match status {
        "published" | "active" => SUCCESS_COLOR,
        "ready" => FOCUS_COLOR,
        "archived" | "inactive" => WARNING_COLOR,
        "error" => ERROR_COLOR,
        _ => MUTED_COLOR,
    }
}

/// A removable filter chip: `1 Status: Draft`
pub fn styled_chip(index: usize, label: &str) -> Vec<Span<'_>> {
    vec![
        Span::styled(format!("{}", index), Style::default().fg(HELP_TEXT)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(CHIP_COLOR).add_modifier(Modifier::BOLD)),
    ]
}
