use iced::{Element, Task};

use crate::messages::Msg;
use crate::App;

impl App {
    pub fn handle_lobby_msg(&mut self, msg: Msg) -> Task<Msg> {
        match msg {
            Msg::CreateNameChanged(s) => self.create_name = s,
            Msg::MaxPlayersChanged(s) => self.max_players = s,
            Msg::JoinNameChanged(s) => self.join_name = s,
            Msg::RoomCodeChanged(s) => self.join_code = s.to_uppercase(),
            Msg::CreateRoom => self.controller.create_room(&self.create_name, &self.max_players),
            Msg::JoinRoom => self.controller.join_room(&self.join_name, &self.join_code),
            other => tracing::debug!(msg = ?other, "ignored in lobby"),
        }
        Task::none()
    }

    pub fn lobby_view(&self) -> Element<'_, Msg> {
        crate::ui::views::lobby_view(self)
    }
}
