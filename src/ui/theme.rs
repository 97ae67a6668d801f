use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(0xda, 0x77, 0x56);
pub const BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const MUTED: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const STATUS_OK: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const STATUS_WARN: Color = Color::Rgb(0xea, 0xb3, 0x08);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const FOCUS_HIGHLIGHT: Color = Color::Rgb(0x26, 0x26, 0x26);

pub fn control() -> Style {
    Style::default().fg(TEXT)
}

pub fn disabled() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::DIM)
}

pub fn invalid() -> Style {
    Style::default().fg(STATUS_ERROR)
}

pub fn focused(style: Style) -> Style {
    style
        .bg(FOCUS_HIGHLIGHT)
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}
