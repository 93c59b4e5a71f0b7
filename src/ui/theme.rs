use crate::table::column::Tone;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT_TEAL: Color = Color::Rgb(64, 196, 196);
    pub const BG_SURFACE: Color = Color::Rgb(28, 30, 36);
    pub const BORDER_DIM: Color = Color::Rgb(70, 74, 84);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Thick
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn system_message() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn header_row() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_row() -> Style {
        Style::default().bg(Color::Rgb(44, 58, 72)).add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn page_current() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn page_other() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn field_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn badge(tone: Tone) -> Style {
        let fg = match tone {
            Tone::Info => Color::LightBlue,
            Tone::Primary => Color::Blue,
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Light => Color::Gray,
        };
        Style::default().fg(fg)
    }
}
