//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── hero ───────────────────────────────────────────────────
    pub fn sketch_color() -> Color {
        Color::White
    }

    pub fn accent_sketch_color() -> Color {
        Color::Rgb(201, 168, 106)
    }

    pub fn logo_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(201, 168, 106))
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── sections ───────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Rgb(201, 168, 106))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn stat_value_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_style(depth: u8) -> Style {
        match depth {
            70.. => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            50..=69 => Style::default().fg(Color::Gray),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn header_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn switch_style() -> Style {
        Style::default().bg(Color::Gray).fg(Color::Black)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
