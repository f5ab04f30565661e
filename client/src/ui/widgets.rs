use iced::{Alignment, Color, Element, Length};
use iced_widget::{button, center, column, container, mouse_area, opaque, row, stack, text, Space};

use neon_draw::notify::Notice;
use neon_draw::room::GameOverSummary;

use super::players::leaderboard_view;
use super::theme::{neon_button, notice_color, outlined, plate, GREEN, MUTED, NEON_PINK, PURPLE, RED, TEXT, YELLOW};
use crate::messages::Msg;

pub fn pill(label: String) -> Element<'static, Msg> {
    container(text(label).size(14))
        .padding([4, 10])
        .width(Length::Shrink)
        .style(|_| plate())
        .into()
}

pub fn toasts(notices: &[Notice]) -> Element<'static, Msg> {
    let items = notices.iter().fold(column![].spacing(6), |col, n| {
        let accent = notice_color(n.kind);
        col.push(
            container(
                row![text(n.kind.icon()).color(accent), text(n.message.clone()).size(14)]
                    .spacing(8)
                    .align_y(Alignment::Center),
            )
            .padding([8, 12])
            .width(Length::Fixed(300.0))
            .style(move |_| outlined(accent)),
        )
    });
    container(items)
        .width(Length::Fill)
        .align_x(Alignment::End)
        .padding(16)
        .into()
}

/// Dim `base` and float `content` over it. Clicking the dimmed area sends
/// `on_blur`, if any.
pub fn modal<'a>(base: Element<'a, Msg>, content: Element<'a, Msg>, on_blur: Option<Msg>) -> Element<'a, Msg> {
    let mut backdrop = mouse_area(center(opaque(content)).style(|_| container::Style {
        background: Some(Color { a: 0.75, ..Color::BLACK }.into()),
        ..Default::default()
    }));
    if let Some(msg) = on_blur {
        backdrop = backdrop.on_press(msg);
    }
    stack![base, opaque(backdrop)].into()
}

pub fn confirm_leave_dialog() -> Element<'static, Msg> {
    container(
        column![
            text("Leave room?").size(22).color(TEXT),
            text("You will lose your place and score in this game.").size(14).color(MUTED),
            Space::with_height(Length::Fixed(8.0)),
            row![
                button(text("Stay")).on_press(Msg::CancelLeave).style(neon_button(PURPLE)).padding([8, 18]),
                button(text("Leave")).on_press(Msg::ConfirmLeave).style(neon_button(RED)).padding([8, 18]),
            ]
            .spacing(12),
        ]
        .spacing(10)
        .align_x(Alignment::Center),
    )
    .padding(24)
    .style(|_| outlined(NEON_PINK))
    .into()
}

pub fn game_over_overlay(summary: Option<GameOverSummary>) -> Element<'static, Msg> {
    let (winner, standings): (Element<Msg>, Element<Msg>) = match summary {
        Some(s) => (
            column![
                text(s.winner).size(26).color(YELLOW),
                text(format!("{} pts", s.winner_score)).size(16).color(MUTED),
            ]
            .align_x(Alignment::Center)
            .into(),
            leaderboard_view(&s.standings),
        ),
        None => (text("Game over").size(26).color(YELLOW).into(), Space::with_height(Length::Shrink).into()),
    };

    container(
        column![
            text("🏆 Game Over").size(30).color(NEON_PINK),
            winner,
            standings,
            row![
                button(text("Play Again")).on_press(Msg::PlayAgain).style(neon_button(GREEN)).padding([8, 18]),
                button(text("Back to Lobby")).on_press(Msg::BackToLobby).style(neon_button(PURPLE)).padding([8, 18]),
            ]
            .spacing(12),
        ]
        .spacing(14)
        .align_x(Alignment::Center),
    )
    .padding(28)
    .width(Length::Fixed(420.0))
    .style(|_| outlined(YELLOW))
    .into()
}
