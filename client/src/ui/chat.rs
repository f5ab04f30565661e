use iced::{Alignment, Color, Element, Length};
use iced_widget::{button, column, container, row, scrollable, text, text_input};

use neon_draw::chat::{ChatFilter, ChatLine, ChatLog};
use neon_draw_protocol::ChatKind;

use super::theme::{neon_button, plate, GREEN, MUTED, NEON_CYAN, PURPLE, TEXT, YELLOW};
use crate::messages::Msg;

pub fn chat_input_id() -> text_input::Id {
    text_input::Id::new("chat-input")
}

fn line_color(kind: ChatKind) -> Color {
    match kind {
        ChatKind::System => YELLOW,
        ChatKind::CorrectGuess => GREEN,
        ChatKind::Guess => NEON_CYAN,
        ChatKind::Message => TEXT,
    }
}

fn chat_line(line: &ChatLine) -> Element<'static, Msg> {
    let body = match &line.player {
        Some(p) if line.kind != ChatKind::System => format!("{p}: {}", line.message),
        _ => line.message.clone(),
    };
    row![
        text(line.timestamp.clone()).size(11).color(MUTED),
        text(body).size(14).color(line_color(line.kind)).shaping(text::Shaping::Advanced),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

pub fn chat_panel<'a>(log: &ChatLog, input: &'a str) -> Element<'a, Msg> {
    let current = log.filter();
    let filters = ChatFilter::ALL.iter().fold(row![].spacing(4), |r, f| {
        let accent = if *f == current { NEON_CYAN } else { PURPLE };
        r.push(
            button(text(f.label()).size(12))
                .on_press(Msg::FilterChat(*f))
                .style(neon_button(accent))
                .padding([2, 8]),
        )
    });

    let lines = log.visible().fold(column![].spacing(4), |col, l| col.push(chat_line(l)));

    let entry = row![
        text_input("Type your guess...", input)
            .id(chat_input_id())
            .on_input(Msg::ChatInputChanged)
            .on_submit(Msg::SendChat)
            .padding(8),
        button(text("Send")).on_press(Msg::SendChat).style(neon_button(NEON_CYAN)).padding([8, 14]),
    ]
    .spacing(6);

    container(
        column![
            text("Chat").size(18).color(NEON_CYAN),
            filters,
            scrollable(lines).height(Length::Fill),
            entry,
        ]
        .spacing(8),
    )
    .padding(10)
    .height(Length::Fill)
    .width(Length::Fixed(320.0))
    .style(|_| plate())
    .into()
}
