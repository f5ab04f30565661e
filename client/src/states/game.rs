use iced::widget::text_input;
use iced::{Element, Task};

use crate::messages::Msg;
use crate::ui::chat::chat_input_id;
use crate::App;

impl App {
    pub fn handle_game_msg(&mut self, msg: Msg) -> Task<Msg> {
        match msg {
            Msg::StartGame => self.controller.start_game(),
            Msg::ChatInputChanged(s) => self.chat_input = s,
            Msg::SendChat => {
                if self.controller.send_chat(&self.chat_input) {
                    self.chat_input.clear();
                    return text_input::focus(chat_input_id());
                }
            }
            Msg::FilterChat(filter) => self.controller.filter_chat(filter),
            Msg::Stroke(data) => self.controller.submit_stroke(data),
            Msg::ClearCanvas => self.controller.clear_canvas(),
            Msg::BrushColor(color) => self.brush.color = color,
            Msg::BrushWidth(width) => self.brush.width = width,
            Msg::CopyLink => {
                if let Some(link) = self.controller.copy_room_link() {
                    return iced::clipboard::write(link);
                }
            }
            Msg::PlayAgain => self.controller.play_again(),
            Msg::BackToLobby => self.controller.back_to_lobby(),
            Msg::RequestLeave => self.controller.request_leave(),
            Msg::CancelLeave => self.controller.cancel_leave(),
            Msg::ConfirmLeave => {
                self.controller.leave_room();
                self.chat_input.clear();
            }
            other => tracing::debug!(msg = ?other, "ignored in game"),
        }
        Task::none()
    }

    pub fn game_view(&self) -> Element<'_, Msg> {
        crate::ui::views::game_view(self)
    }
}
