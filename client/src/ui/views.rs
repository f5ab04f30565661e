use iced::{Alignment, Element, Length};
use iced_widget::{button, column, container, row, text, text_input, Space};

use neon_draw::lobby::{MAX_PLAYERS, MIN_PLAYERS};

use super::canvas::{empty_pad, sketchpad, PALETTE, WIDTHS};
use super::chat::chat_panel;
use super::header::{header_view, HeaderData};
use super::players::{leaderboard_view, player_list};
use super::theme::{hex_color, neon_button, outlined, plate, GREEN, MUTED, NEON_CYAN, NEON_PINK, PURPLE, RED, TEXT};
use super::widgets::{confirm_leave_dialog, game_over_overlay, modal, pill};
use crate::app::App;
use crate::messages::Msg;

fn connection_row(app: &App) -> Element<'_, Msg> {
    if app.gave_up {
        row![
            text("Could not reach the server").size(14).color(RED),
            button(text("Reconnect")).on_press(Msg::Reconnect).style(neon_button(RED)).padding([4, 12]),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    } else if app.controller.is_connected() {
        text(format!("● Connected to {}", app.config.server)).size(13).color(GREEN).into()
    } else {
        text("● Connecting...").size(13).color(MUTED).into()
    }
}

pub fn lobby_view(app: &App) -> Element<'_, Msg> {
    let connected = app.controller.is_connected();

    let create = container(
        column![
            text("Create Room").size(22).color(NEON_PINK),
            text_input("Your name", &app.create_name)
                .on_input(Msg::CreateNameChanged)
                .on_submit(Msg::CreateRoom)
                .padding(10),
            text(format!("Max players ({MIN_PLAYERS}-{MAX_PLAYERS})")).size(13).color(MUTED),
            text_input("8", &app.max_players)
                .on_input(Msg::MaxPlayersChanged)
                .padding(10),
            button(text("Create Room").size(16))
                .on_press_maybe(connected.then_some(Msg::CreateRoom))
                .style(neon_button(NEON_PINK))
                .padding([10, 20])
                .width(Length::Fill),
        ]
        .spacing(10),
    )
    .padding(20)
    .width(Length::Fixed(320.0))
    .style(|_| outlined(NEON_PINK));

    let join = container(
        column![
            text("Join Room").size(22).color(NEON_CYAN),
            text_input("Your name", &app.join_name)
                .on_input(Msg::JoinNameChanged)
                .padding(10),
            text("Room code").size(13).color(MUTED),
            text_input("ABC123", &app.join_code)
                .on_input(Msg::RoomCodeChanged)
                .on_submit(Msg::JoinRoom)
                .padding(10),
            button(text("Join Room").size(16))
                .on_press_maybe(connected.then_some(Msg::JoinRoom))
                .style(neon_button(NEON_CYAN))
                .padding([10, 20])
                .width(Length::Fill),
        ]
        .spacing(10),
    )
    .padding(20)
    .width(Length::Fixed(320.0))
    .style(|_| outlined(NEON_CYAN));

    container(
        column![
            text("NEON DRAW").size(48).color(NEON_PINK),
            text("Draw, guess and laugh with friends").size(16).color(MUTED),
            Space::with_height(Length::Fixed(30.0)),
            row![create, join].spacing(30),
            Space::with_height(Length::Fixed(20.0)),
            connection_row(app),
        ]
        .align_x(Alignment::Center)
        .spacing(10),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn tool_bar(app: &App) -> Element<'_, Msg> {
    let swatches = PALETTE.iter().fold(row![].spacing(4), |r, c| {
        let color = hex_color(c).unwrap_or(iced::Color::BLACK);
        let selected = app.brush.color == *c;
        r.push(
            button(Space::new(Length::Fixed(18.0), Length::Fixed(18.0)))
                .on_press(Msg::BrushColor(*c))
                .padding(2)
                .style(move |_, _| button::Style {
                    background: Some(iced::Background::Color(color)),
                    border: iced::Border {
                        color: if selected { NEON_CYAN } else { MUTED },
                        width: if selected { 3.0 } else { 1.0 },
                        radius: iced::border::Radius::from(4.0),
                    },
                    ..Default::default()
                }),
        )
    });
    let widths = WIDTHS.iter().fold(row![].spacing(4), |r, w| {
        let accent = if app.brush.width == *w { NEON_CYAN } else { PURPLE };
        r.push(
            button(text(format!("{w}px")).size(12))
                .on_press(Msg::BrushWidth(*w))
                .style(neon_button(accent))
                .padding([2, 8]),
        )
    });

    row![
        swatches,
        Space::with_width(Length::Fixed(12.0)),
        widths,
        Space::with_width(Length::Fill),
        button(text("Clear")).on_press(Msg::ClearCanvas).style(neon_button(RED)).padding([4, 12]),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .into()
}

fn side_panel(app: &App) -> Element<'_, Msg> {
    let c = &app.controller;
    let start = c.start_button();
    let controls = column![
        button(text(start.label))
            .on_press_maybe(start.enabled.then_some(Msg::StartGame))
            .style(neon_button(GREEN))
            .padding([8, 16])
            .width(Length::Fill),
        button(text("Copy Room Link"))
            .on_press(Msg::CopyLink)
            .style(neon_button(NEON_CYAN))
            .padding([8, 16])
            .width(Length::Fill),
        button(text("Leave Room"))
            .on_press(Msg::RequestLeave)
            .style(neon_button(RED))
            .padding([8, 16])
            .width(Length::Fill),
    ]
    .spacing(8);

    column![
        player_list(&c.player_tiles()),
        text("Leaderboard").size(18).color(NEON_CYAN),
        leaderboard_view(&c.leaderboard()),
        Space::with_height(Length::Fill),
        controls,
    ]
    .spacing(10)
    .width(Length::Fixed(260.0))
    .height(Length::Fill)
    .into()
}

pub fn game_view(app: &App) -> Element<'_, Msg> {
    let c = &app.controller;
    let header = header_view(HeaderData {
        info: c.room_info(),
        timer: c.timer(),
        drawer_text: c.drawer_text(),
        word_hint: c.word_hint().to_string(),
        connected: c.is_connected(),
        muted: c.is_muted(),
    });

    let mut board = column![].spacing(8);
    match c.surface() {
        Some(pad) => {
            board = board.push(sketchpad(pad, app.brush));
            if pad.can_draw() {
                board = board.push(tool_bar(app));
            } else {
                board = board.push(text("Watch the drawing and type your guess in the chat").size(13).color(MUTED));
            }
        }
        None => board = board.push(empty_pad()),
    }
    if let Some(session) = c.session() {
        board = board.push(row![pill(format!("Code: {}", session.room_id)), pill(session.username.clone())].spacing(8));
    }

    let body = row![
        side_panel(app),
        container(board).padding(10).width(Length::Fill).style(|_| plate()),
        chat_panel(c.chat(), &app.chat_input),
    ]
    .spacing(12)
    .height(Length::Fill);

    let screen: Element<Msg> = container(column![header, body].spacing(12))
        .padding(12)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| iced_widget::container::Style { text_color: Some(TEXT), ..Default::default() })
        .into();

    if c.confirm_leave_pending() {
        modal(screen, confirm_leave_dialog(), Some(Msg::CancelLeave))
    } else if c.game_over_visible() {
        modal(screen, game_over_overlay(c.game_over_summary()), None)
    } else {
        screen
    }
}
