use iced::border::Radius;
use iced::{Border, Color};
use iced_widget::{button, container};

use neon_draw::notify::NoticeKind;
use neon_draw::timer::Urgency;

pub const BG: Color          = Color { r: 0.05, g: 0.04, b: 0.10, a: 1.0 };
pub const INK_SOFT: Color    = Color { r: 0.11, g: 0.10, b: 0.19, a: 1.0 };
pub const TEXT: Color        = Color { r: 0.93, g: 0.92, b: 0.97, a: 1.0 };
pub const MUTED: Color       = Color { r: 0.60, g: 0.58, b: 0.70, a: 1.0 };
pub const NEON_PINK: Color   = Color { r: 1.00, g: 0.18, b: 0.62, a: 1.0 };
pub const NEON_CYAN: Color   = Color { r: 0.20, g: 0.95, b: 0.98, a: 1.0 };
pub const PURPLE: Color      = Color { r: 0.66, g: 0.33, b: 0.97, a: 1.0 };
pub const YELLOW: Color      = Color { r: 0.98, g: 0.80, b: 0.08, a: 1.0 };
pub const RED: Color         = Color { r: 0.94, g: 0.27, b: 0.27, a: 1.0 };
pub const GREEN: Color       = Color { r: 0.13, g: 0.77, b: 0.37, a: 1.0 };

pub fn plate() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(INK_SOFT)),
        border: Border { color: Color { a: 0.45, ..PURPLE }, width: 1.0, radius: Radius::from(10.0) },
        text_color: Some(TEXT),
        ..Default::default()
    }
}

/// Same plate with a glowing edge in `accent`.
pub fn outlined(accent: Color) -> container::Style {
    container::Style {
        border: Border { color: accent, width: 2.0, radius: Radius::from(10.0) },
        ..plate()
    }
}

pub fn backdrop() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(BG)),
        text_color: Some(TEXT),
        ..Default::default()
    }
}

pub fn neon_button(accent: Color) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let (bg, fg) = match status {
            button::Status::Hovered | button::Status::Pressed => (accent, BG),
            button::Status::Disabled => (Color { a: 0.15, ..accent }, MUTED),
            button::Status::Active => (Color { a: 0.25, ..accent }, TEXT),
        };
        button::Style {
            background: Some(iced::Background::Color(bg)),
            text_color: fg,
            border: Border { color: accent, width: 1.0, radius: Radius::from(8.0) },
            ..Default::default()
        }
    }
}

/// `#rgb` or `#rrggbb`; anything else is `None`.
pub fn hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb8(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => {
            let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
            Some(Color::from_rgb8(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => NEON_CYAN,
        NoticeKind::Success => GREEN,
        NoticeKind::Warning => YELLOW,
        NoticeKind::Error => RED,
    }
}

pub fn urgency_color(urgency: Urgency) -> Color {
    match urgency {
        Urgency::Normal => PURPLE,
        Urgency::Warning => YELLOW,
        Urgency::Critical => RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_color("#ff0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(hex_color("#666"), Some(Color::from_rgb8(102, 102, 102)));
        assert_eq!(hex_color("red"), None);
        assert_eq!(hex_color("#12345"), None);
    }
}
