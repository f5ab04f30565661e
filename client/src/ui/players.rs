use iced::border::Radius;
use iced::{Alignment, Border, Element, Length};
use iced_widget::{column, container, row, text, Space};

use neon_draw::room::{LeaderboardEntry, PlayerTile};

use super::theme::{hex_color, outlined, plate, MUTED, NEON_CYAN, NEON_PINK, PURPLE, TEXT, YELLOW};
use crate::messages::Msg;

fn avatar(initial: String, color: &str) -> Element<'static, Msg> {
    let bg = hex_color(color).unwrap_or(MUTED);
    container(text(initial).size(16).color(TEXT))
        .width(Length::Fixed(34.0))
        .height(Length::Fixed(34.0))
        .center_x(Length::Fixed(34.0))
        .center_y(Length::Fixed(34.0))
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(bg)),
            border: Border { radius: Radius::from(17.0), ..Default::default() },
            ..Default::default()
        })
        .into()
}

pub fn player_list(tiles: &[PlayerTile]) -> Element<'static, Msg> {
    let mut list = column![text("Players").size(18).color(NEON_CYAN)].spacing(8);
    for t in tiles {
        let mut name = row![text(t.username.clone()).size(15)].spacing(6).align_y(Alignment::Center);
        if t.is_you {
            name = name.push(text("You").size(12).color(NEON_CYAN));
        }
        if t.is_drawer {
            name = name.push(text("✏ Drawing").size(12).color(NEON_PINK));
        }
        let tile = row![
            avatar(t.initial.clone(), &t.avatar_color),
            column![name, text(format!("{} pts", t.score)).size(13).color(MUTED)].spacing(2),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let accent = if t.is_drawer { NEON_PINK } else { PURPLE };
        list = list.push(container(tile).padding(8).width(Length::Fill).style(move |_| outlined(accent)));
    }
    list.into()
}

pub fn leaderboard_view(entries: &[LeaderboardEntry]) -> Element<'static, Msg> {
    if entries.is_empty() {
        return container(text("Game not started").size(14).color(MUTED)).padding(8).into();
    }
    let rows = entries.iter().fold(column![].spacing(4), |col, e| {
        let rank_color = if e.is_podium() { YELLOW } else { MUTED };
        let mut line = row![
            text(format!("#{}", e.rank)).size(14).color(rank_color).width(Length::Fixed(32.0)),
            avatar(e.username.chars().take(1).collect::<String>().to_uppercase(), &e.avatar_color),
            text(e.username.clone()).size(14),
        ]
        .spacing(8)
        .align_y(Alignment::Center);
        if e.is_you {
            line = line.push(text("(you)").size(12).color(NEON_CYAN));
        }
        line = line.push(Space::with_width(Length::Fill)).push(text(format!("{} pts", e.score)).size(14));
        col.push(line)
    });
    container(rows).padding(8).width(Length::Fill).style(|_| plate()).into()
}
