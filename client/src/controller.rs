use std::time::Instant;

use futures::channel::mpsc;
use neon_draw_protocol::{
    ChatKind, ChatPayload, ClientToServer, GameStarted, GameState, PlayerId, RoomAdmission, RoomSnapshot,
    ServerToClient, StrokeData,
};

use crate::chat::{ChatFilter, ChatLog};
use crate::error::{ClientError, Result};
use crate::lobby;
use crate::notify::{NoticeKind, Notifications};
use crate::room::{self, GameOverSummary, LeaderboardEntry, PlayerTile, RoomInfo, StartButton};
use crate::surface::DrawingSurface;
use crate::timer::{Countdown, TickOutcome, TimerDisplay};

pub type Outbox = mpsc::UnboundedSender<ClientToServer>;

/// Who this client is inside a room. Exists from create/join until leave.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub room_id: String,
    pub player_id: PlayerId,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Message,
    Correct,
    GameOver,
}

/// Mirrors what the server pushes and turns user intents into outbound
/// frames. It never decides anything about the game itself.
pub struct RoomController<S> {
    tx_out: Option<Outbox>,
    connected: bool,
    session: Option<Session>,
    room: RoomSnapshot,
    is_drawer: bool,
    drawer: Option<String>,
    word_hint: String,
    countdown: Countdown,
    surface: Option<S>,
    chat: ChatLog,
    notifications: Notifications,
    screen: Screen,
    game_over_visible: bool,
    confirm_leave: bool,
    muted: bool,
    cues: Vec<SoundCue>,
    share_base: String,
}

impl<S: DrawingSurface + Default> RoomController<S> {
    pub fn new<B: Into<String>>(share_base: B) -> Self {
        Self {
            tx_out: None,
            connected: false,
            session: None,
            room: RoomSnapshot::default(),
            is_drawer: false,
            drawer: None,
            word_hint: String::new(),
            countdown: Countdown::default(),
            surface: None,
            chat: ChatLog::default(),
            notifications: Notifications::default(),
            screen: Screen::Lobby,
            game_over_visible: false,
            confirm_leave: false,
            muted: false,
            cues: Vec::new(),
            share_base: share_base.into(),
        }
    }

    pub fn on_connected(&mut self, tx: Outbox) {
        tracing::info!("connected to server");
        self.tx_out = Some(tx);
        self.connected = true;
        // a fresh socket is not subscribed to anything yet
        if self.session.is_some() {
            self.join_socket_room();
            self.refresh_room();
        }
    }

    pub fn on_disconnected(&mut self, reason: &str) {
        tracing::warn!(%reason, "disconnected from server");
        self.tx_out = None;
        self.connected = false;
    }

    /// The transport stopped retrying.
    pub fn on_gave_up(&mut self) {
        self.on_disconnected("reconnection attempts exhausted");
        self.notify("Connection lost. Could not reach the server", NoticeKind::Error);
    }

    fn send(&mut self, cmd: ClientToServer) -> Result<()> {
        let tx = self.tx_out.as_ref().ok_or(ClientError::NotConnected)?;
        tracing::debug!(?cmd, "send");
        tx.unbounded_send(cmd).map_err(|_| ClientError::ChannelClosed)
    }

    fn require_session(&self) -> Result<Session> {
        self.session.clone().ok_or(ClientError::NotInRoom)
    }

    /// Surface a failed intent to the user.
    fn report(&mut self, result: Result<()>, fallback: &str) {
        let Err(err) = result else { return };
        match err {
            ClientError::NotInRoom => tracing::debug!("ignored intent outside a room"),
            ClientError::InvalidRoomCode(_) => {
                self.notify("Please enter a valid 6-character room code", NoticeKind::Warning)
            }
            ClientError::NotConnected => {
                tracing::warn!("{fallback}: not connected");
                self.notify("Not connected to server", NoticeKind::Error);
            }
            other => {
                tracing::warn!(error = %other, "{fallback}");
                self.notify(fallback, NoticeKind::Error);
            }
        }
    }

    pub fn notify<M: Into<String>>(&mut self, message: M, kind: NoticeKind) {
        self.notifications.push(message, kind);
    }

    pub fn create_room(&mut self, username: &str, max_players: &str) {
        let req = lobby::create_request(username, max_players);
        let result = self.send(ClientToServer::CreateRoom(req));
        self.report(result, "Failed to create room");
    }

    pub fn join_room(&mut self, username: &str, room_code: &str) {
        let result = lobby::join_request(username, room_code).and_then(|req| self.send(ClientToServer::JoinRoom(req)));
        self.report(result, "Failed to join room");
    }

    fn on_admitted(&mut self, admission: RoomAdmission, created: bool) {
        tracing::info!(room = %admission.room_id, player = %admission.player_id, created, "admitted to room");
        self.cleanup();
        self.session = Some(Session {
            room_id: admission.room_id.clone(),
            player_id: admission.player_id,
            username: admission.username,
        });
        self.room = RoomSnapshot { room_id: admission.room_id.clone(), ..RoomSnapshot::default() };
        self.show_game_screen();
        self.join_socket_room();
        if created {
            self.notify(format!("Room created! Code: {}", admission.room_id), NoticeKind::Success);
        } else {
            self.notify(format!("Joined room {}!", admission.room_id), NoticeKind::Success);
        }
    }

    fn join_socket_room(&mut self) {
        let result = self.require_session().and_then(|s| {
            self.send(ClientToServer::Join { room_id: s.room_id, player_id: s.player_id })
        });
        self.report(result, "Failed to join room");
    }

    /// Ask the server to push the current snapshot again.
    pub fn refresh_room(&mut self) {
        let result = self
            .require_session()
            .and_then(|s| self.send(ClientToServer::GetRoomData { room_id: s.room_id }));
        self.report(result, "Failed to load room");
    }

    pub fn start_game(&mut self) {
        let result = self
            .require_session()
            .and_then(|s| self.send(ClientToServer::StartGame { room_id: s.room_id }));
        self.report(result, "Failed to start game");
    }

    /// Leaving needs a confirmation first; see [`Self::leave_room`].
    pub fn request_leave(&mut self) {
        if self.session.is_some() {
            self.confirm_leave = true;
        }
    }

    pub fn cancel_leave(&mut self) {
        self.confirm_leave = false;
    }

    pub fn leave_room(&mut self) {
        self.confirm_leave = false;
        let Some(session) = self.session.clone() else { return };
        if let Err(err) = self.send(ClientToServer::Leave { room_id: session.room_id, player_id: session.player_id }) {
            // the server drops us on disconnect anyway
            tracing::warn!(error = %err, "leave not delivered");
        }
        self.show_lobby();
        self.notify("Left the room", NoticeKind::Info);
    }

    pub fn back_to_lobby(&mut self) {
        self.request_leave();
    }

    /// Returns `true` when the message went out and the input can be cleared.
    pub fn send_chat(&mut self, input: &str) -> bool {
        let message = input.trim();
        if message.is_empty() {
            return false;
        }
        let result = self.require_session().and_then(|s| {
            self.send(ClientToServer::ChatMessage {
                room_id: s.room_id,
                player_id: s.player_id,
                message: message.to_string(),
            })
        });
        let sent = result.is_ok();
        self.report(result, "Failed to send message");
        sent
    }

    pub fn clear_canvas(&mut self) {
        if !self.is_drawer {
            return;
        }
        let result = self
            .require_session()
            .and_then(|s| self.send(ClientToServer::ClearCanvas { room_id: s.room_id }));
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.report(result, "Failed to clear canvas");
    }

    /// A segment drawn locally by the drawer: render it and broadcast it.
    pub fn submit_stroke(&mut self, data: StrokeData) {
        if !self.is_drawer {
            return;
        }
        let Ok(session) = self.require_session() else { return };
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_from_data(&data);
        }
        let result = self.send(ClientToServer::Draw { room_id: session.room_id, data });
        if let Err(err) = result {
            tracing::debug!(error = %err, "stroke dropped");
        }
    }

    pub fn room_link(&self) -> Option<String> {
        self.session.as_ref().map(|s| format!("{}/room/{}", self.share_base, s.room_id))
    }

    /// Returns the link for the caller to put on the clipboard.
    pub fn copy_room_link(&mut self) -> Option<String> {
        match self.room_link() {
            Some(link) => {
                self.notify("Room link copied to clipboard!", NoticeKind::Success);
                Some(link)
            }
            None => {
                self.notify("Failed to copy link", NoticeKind::Error);
                None
            }
        }
    }

    pub fn play_again(&mut self) {
        let result = self
            .require_session()
            .and_then(|s| self.send(ClientToServer::StartGame { room_id: s.room_id }));
        if result.is_ok() {
            self.game_over_visible = false;
        }
        self.report(result, "Failed to start game");
    }

    pub fn filter_chat(&mut self, filter: ChatFilter) {
        self.chat.set_filter(filter);
    }

    pub fn toggle_sound(&mut self) {
        self.muted = !self.muted;
        if self.muted {
            self.notify("Sound muted", NoticeKind::Info);
        } else {
            self.notify("Sound enabled", NoticeKind::Info);
        }
    }

    fn play_sound(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        tracing::debug!(?cue, "play sound");
        self.cues.push(cue);
    }

    pub fn handle_event(&mut self, ev: ServerToClient) {
        let room_scoped = matches!(
            ev,
            ServerToClient::RoomUpdate(_)
                | ServerToClient::GameStarted(_)
                | ServerToClient::DrawUpdate(_)
                | ServerToClient::CanvasCleared {}
        );
        if room_scoped && self.session.is_none() {
            tracing::debug!(?ev, "dropped room event outside a room");
            return;
        }
        match ev {
            ServerToClient::Connected { message } => tracing::debug!(%message, "server hello"),
            ServerToClient::RoomCreated(admission) => self.on_admitted(admission, true),
            ServerToClient::RoomJoined(admission) => self.on_admitted(admission, false),
            ServerToClient::RoomUpdate(snapshot) => self.handle_room_update(snapshot),
            ServerToClient::GameStarted(started) => self.handle_game_started(started),
            ServerToClient::DrawUpdate(data) => {
                if !self.is_drawer {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.draw_from_data(&data);
                    }
                }
            }
            ServerToClient::CanvasCleared {} => {
                if !self.is_drawer {
                    if let Some(surface) = self.surface.as_mut() {
                        surface.clear();
                    }
                }
            }
            ServerToClient::ChatMessage(payload) => self.add_chat_message(payload),
            ServerToClient::Error { message } => {
                let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| "An error occurred".to_string());
                self.notify(message, NoticeKind::Error);
            }
        }
    }

    fn handle_room_update(&mut self, snapshot: RoomSnapshot) {
        self.countdown.sync(snapshot.remaining_time);
        self.room = snapshot;
        match self.room.game_state {
            GameState::Waiting => self.word_hint = "...".to_string(),
            GameState::Finished => self.show_game_over(),
            GameState::Drawing | GameState::Guessing | GameState::BetweenRounds => {}
        }
    }

    fn handle_game_started(&mut self, started: GameStarted) {
        let GameStarted { room, drawer, round_time, .. } = started;
        self.is_drawer = self.session.as_ref().is_some_and(|s| s.username == drawer);
        tracing::info!(%drawer, is_drawer = self.is_drawer, "turn started");
        self.word_hint = room.word_hint.clone();
        self.room = room;
        self.drawer = Some(drawer);
        self.game_over_visible = false;

        let is_drawer = self.is_drawer;
        self.surface.get_or_insert_with(S::default).set_draw_mode(is_drawer);

        self.countdown.start(round_time);
        self.notify("Game started!", NoticeKind::Success);
    }

    fn add_chat_message(&mut self, payload: ChatPayload) {
        let kind = self.chat.push(payload).kind;
        if kind == ChatKind::CorrectGuess {
            self.play_sound(SoundCue::Correct);
        }
        if kind != ChatKind::System {
            self.play_sound(SoundCue::Message);
        }
    }

    fn show_game_over(&mut self) {
        if !self.game_over_visible {
            self.game_over_visible = true;
            self.play_sound(SoundCue::GameOver);
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        if self.countdown.tick() == TickOutcome::Expired {
            self.notify("Time's up!", NoticeKind::Warning);
        }
    }

    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    fn show_game_screen(&mut self) {
        self.screen = Screen::Game;
        self.game_over_visible = false;
    }

    pub fn show_lobby(&mut self) {
        self.screen = Screen::Lobby;
        self.cleanup();
    }

    pub fn cleanup(&mut self) {
        self.countdown.stop();
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
        }
        self.session = None;
        self.is_drawer = false;
        self.drawer = None;
        self.word_hint.clear();
        self.room = RoomSnapshot::default();
        self.chat.clear();
        self.game_over_visible = false;
        self.confirm_leave = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn room(&self) -> &RoomSnapshot {
        &self.room
    }

    pub fn is_drawer(&self) -> bool {
        self.is_drawer
    }

    pub fn drawer_text(&self) -> Option<String> {
        let drawer = self.drawer.as_ref()?;
        Some(if self.is_drawer { "You are drawing!".to_string() } else { format!("{drawer} is drawing") })
    }

    pub fn word_hint(&self) -> &str {
        &self.word_hint
    }

    pub fn timer(&self) -> TimerDisplay {
        self.countdown.display()
    }

    pub fn timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    pub fn confirm_leave_pending(&self) -> bool {
        self.confirm_leave
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Cues played since the last [`Self::take_sounds`], oldest first.
    pub fn sounds_played(&self) -> &[SoundCue] {
        &self.cues
    }

    pub fn take_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    fn me(&self) -> Option<&PlayerId> {
        self.session.as_ref().map(|s| &s.player_id)
    }

    pub fn room_info(&self) -> RoomInfo {
        room::room_info(&self.room)
    }

    pub fn player_tiles(&self) -> Vec<PlayerTile> {
        room::player_tiles(&self.room, self.me(), self.drawer.as_deref())
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        room::leaderboard(&self.room, self.me())
    }

    pub fn start_button(&self) -> StartButton {
        room::start_button(&self.room)
    }

    pub fn game_over_summary(&self) -> Option<GameOverSummary> {
        room::game_over(&self.room, self.me())
    }
}
