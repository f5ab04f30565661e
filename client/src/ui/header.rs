use iced::{Alignment, Element, Length};
use iced_widget::{button, container, row, text, Space};

use neon_draw::room::RoomInfo;
use neon_draw::timer::TimerDisplay;

use super::theme::{neon_button, plate, urgency_color, GREEN, MUTED, NEON_CYAN, NEON_PINK, RED, TEXT};
use crate::messages::Msg;

pub struct HeaderData {
    pub info: RoomInfo,
    pub timer: TimerDisplay,
    pub drawer_text: Option<String>,
    pub word_hint: String,
    pub connected: bool,
    pub muted: bool,
}

pub fn header_view(h: HeaderData) -> Element<'static, Msg> {
    let status = if h.connected {
        text("● Connected").size(13).color(GREEN)
    } else {
        text("● Disconnected").size(13).color(RED)
    };

    let timer_size: u16 = if h.timer.pulsing { 28 } else { 24 };
    let timer = text(h.timer.text).size(timer_size).color(urgency_color(h.timer.urgency));

    // the hint can be right-to-left script
    let hint = text(h.word_hint)
        .size(24)
        .color(NEON_CYAN)
        .shaping(text::Shaping::Advanced);

    let drawer = text(h.drawer_text.unwrap_or_default()).size(15).color(NEON_PINK);

    let room = row![
        text(h.info.room_label).size(15).color(TEXT),
        text(format!("Round {}", h.info.round_text)).size(14).color(MUTED),
        text(h.info.state_text).size(14).color(MUTED),
        text(format!("{} players", h.info.player_count)).size(14).color(MUTED),
    ]
    .spacing(14)
    .align_y(Alignment::Center);

    let sound = button(text(if h.muted { "🔇" } else { "🔊" }).size(16))
        .on_press(Msg::ToggleSound)
        .style(neon_button(NEON_CYAN))
        .padding([4, 10]);

    container(
        row![
            room,
            Space::with_width(Length::Fill),
            drawer,
            Space::with_width(Length::Fixed(16.0)),
            hint,
            Space::with_width(Length::Fixed(16.0)),
            timer,
            Space::with_width(Length::Fill),
            status,
            sound,
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([8, 12])
    .style(|_| plate())
    .into()
}
