// client/src/app.rs
use std::time::{Duration, Instant};

use iced::{Element, Subscription, Task};
use iced_widget::stack;

use neon_draw::config::ClientConfig;
use neon_draw::lobby::DEFAULT_MAX_PLAYERS;
use neon_draw::transport::TransportEvent;
use neon_draw::RoomController;

use crate::messages::Msg;
use crate::ui::canvas::{Brush, Sketchpad};
use crate::ui::widgets::toasts;
use crate::ui::ws::subscription;

pub use crate::states::AppState;

pub struct App {
    pub config: ClientConfig,
    pub controller: RoomController<Sketchpad>,

    // Lobby form
    pub create_name: String,
    pub max_players: String,
    pub join_name: String,
    pub join_code: String,

    pub chat_input: String,
    pub brush: Brush,

    /// Bumped to restart the socket subscription after it gave up.
    pub generation: u64,
    pub gave_up: bool,
}

impl App {
    pub fn new(config: ClientConfig) -> (Self, Task<Msg>) {
        let share_base = config.share_base().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot derive share url, using server url");
            config.server.clone()
        });
        let name = config.username.clone().unwrap_or_default();
        let app = Self {
            controller: RoomController::new(share_base),
            create_name: name.clone(),
            max_players: DEFAULT_MAX_PLAYERS.to_string(),
            join_name: name,
            join_code: String::new(),
            chat_input: String::new(),
            brush: Brush::default(),
            generation: 0,
            gave_up: false,
            config,
        };
        (app, Task::none())
    }

    fn handle_transport(&mut self, ev: TransportEvent) {
        match ev {
            TransportEvent::Connected(tx) => {
                self.gave_up = false;
                self.controller.on_connected(tx);
            }
            TransportEvent::Event(ev) => {
                self.controller.handle_event(ev);
                // no audio output, the cues were traced when played
                self.controller.take_sounds();
            }
            TransportEvent::Disconnected(reason) => self.controller.on_disconnected(&reason),
            TransportEvent::GaveUp => {
                self.gave_up = true;
                self.controller.on_gave_up();
            }
        }
    }

    pub(crate) fn update(&mut self, msg: Msg) -> Task<Msg> {
        match msg {
            Msg::Transport(ev) => {
                self.handle_transport(ev);
                Task::none()
            }
            Msg::Tick => {
                self.controller.tick();
                self.controller.prune_notifications(Instant::now());
                Task::none()
            }
            Msg::Reconnect => {
                tracing::info!("reconnecting");
                self.gave_up = false;
                self.generation += 1;
                Task::none()
            }
            Msg::ToggleSound => {
                self.controller.toggle_sound();
                Task::none()
            }
            other => match self.controller.screen() {
                AppState::Lobby => self.handle_lobby_msg(other),
                AppState::Game => self.handle_game_msg(other),
            },
        }
    }

    pub fn view(&self) -> Element<'_, Msg> {
        let screen = match self.controller.screen() {
            AppState::Lobby => self.lobby_view(),
            AppState::Game => self.game_view(),
        };
        let notices = self.controller.notifications().visible();
        let body: Element<Msg> = if notices.is_empty() {
            screen
        } else {
            stack![screen, toasts(notices)].into()
        };
        iced_widget::container(body)
            .width(iced::Length::Fill)
            .height(iced::Length::Fill)
            .style(|_| crate::ui::theme::backdrop())
            .into()
    }

    pub fn subscription(&self) -> Subscription<Msg> {
        let tick = iced::time::every(Duration::from_secs(1)).map(|_| Msg::Tick);
        let ws_sub = if self.gave_up {
            Subscription::none()
        } else {
            subscription(
                self.config.server.clone(),
                self.config.reconnect_attempts,
                self.config.reconnect_delay(),
                self.generation,
            )
        };
        Subscription::batch(vec![tick, ws_sub])
    }
}
