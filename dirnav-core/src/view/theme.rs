//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Colors are from the Catppuccin Mocha palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn pane_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

/// Border of a pane; the focused pane is highlighted.
pub fn pane_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PURPLE)
    } else {
        Style::default().fg(COMMENT)
    }
}

pub fn pane_title_style() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn directory_style() -> Style {
    Style::default().fg(CYAN)
}

pub fn parent_row_style() -> Style {
    Style::default().fg(ORANGE)
}

pub fn hidden_directory_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn drive_style() -> Style {
    Style::default().fg(GREEN)
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(CURRENT_LINE)
        .add_modifier(Modifier::BOLD)
}

pub fn status_style() -> Style {
    Style::default().fg(FOREGROUND).bg(BACKGROUND)
}

pub fn status_error_style() -> Style {
    Style::default().fg(RED).bg(BACKGROUND)
}

pub fn status_busy_style() -> Style {
    Style::default().fg(YELLOW).bg(BACKGROUND)
}
