use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Length of a room code handed out by the server.
pub const ROOM_CODE_LEN: usize = 6;

/// ---- Game state ----
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Waiting,
    Drawing,
    Guessing,
    /// Transient state the server reports after a round ended early.
    BetweenRounds,
    Finished,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Waiting
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Waiting => write!(f, "Waiting for players..."),
            GameState::Drawing => write!(f, "Drawing in progress"),
            GameState::Guessing => write!(f, "Guessing in progress"),
            GameState::BetweenRounds => write!(f, "Between rounds"),
            GameState::Finished => write!(f, "Game finished"),
        }
    }
}

impl GameState {
    pub fn in_progress(&self) -> bool {
        matches!(self, GameState::Drawing | GameState::Guessing)
    }
}

/// ---- Players & rooms ----
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    /// CSS style hex colour, e.g. `#FF6B6B`.
    pub avatar_color: String,
}

/// Everything the server pushes about a room. The client replaces its copy
/// wholesale on every push.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoomSnapshot {
    pub room_id: String,
    pub game_state: GameState,
    pub players: Vec<Player>,
    pub scores: HashMap<PlayerId, i64>,
    pub current_drawer: Option<String>,
    pub round: u32,
    pub max_rounds: u32,
    pub word_hint: String,
    /// Seconds left in the current turn.
    pub remaining_time: u32,
}

impl Default for RoomSnapshot {
    fn default() -> Self {
        Self {
            room_id: String::new(),
            game_state: GameState::Waiting,
            players: Vec::new(),
            scores: HashMap::new(),
            current_drawer: None,
            round: 1,
            max_rounds: 3,
            word_hint: String::new(),
            remaining_time: 80,
        }
    }
}

impl RoomSnapshot {
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn score_of(&self, id: &PlayerId) -> i64 {
        self.scores.get(id).copied().unwrap_or(0)
    }
}

/// ---- Drawing ----
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates into the unit square.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// One pen segment. Coordinates are normalised to `0.0..=1.0` so canvases of
/// different pixel sizes render the same picture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrokeData {
    pub from: CanvasPoint,
    pub to: CanvasPoint,
    pub color: String,
    pub width: f32,
}

/// ---- Chat ----
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    System,
    CorrectGuess,
    Guess,
    #[serde(other)]
    Message,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatPayload {
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default)]
    pub player: Option<String>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// ---- Requests ----
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateRoomRequest {
    pub username: String,
    pub max_players: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinRoomRequest {
    pub room_id: String,
    pub username: String,
}

/// Reply to both room creation and joining.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomAdmission {
    pub room_id: String,
    pub player_id: PlayerId,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameStarted {
    #[serde(flatten)]
    pub room: RoomSnapshot,
    pub drawer: String,
    #[serde(default)]
    pub word_length: usize,
    pub round_time: u32,
}

/// ---- Envelopes ----
///
/// Frames look like `{"event": "start_game", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientToServer {
    CreateRoom(CreateRoomRequest),
    JoinRoom(JoinRoomRequest),
    /// Subscribe this socket to the room's broadcasts.
    Join { room_id: String, player_id: PlayerId },
    Leave { room_id: String, player_id: PlayerId },
    StartGame { room_id: String },
    ChatMessage { room_id: String, player_id: PlayerId, message: String },
    Draw { room_id: String, data: StrokeData },
    ClearCanvas { room_id: String },
    GetRoomData { room_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerToClient {
    Connected {
        #[serde(default)]
        message: String,
    },
    RoomCreated(RoomAdmission),
    RoomJoined(RoomAdmission),
    RoomUpdate(RoomSnapshot),
    GameStarted(GameStarted),
    DrawUpdate(StrokeData),
    CanvasCleared {},
    ChatMessage(ChatPayload),
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Normalises user input into a room code: trimmed and upper-cased.
/// Returns `None` unless exactly [`ROOM_CODE_LEN`] characters remain.
pub fn normalize_room_code(input: &str) -> Option<String> {
    let code = input.trim().to_uppercase();
    if code.chars().count() == ROOM_CODE_LEN {
        Some(code)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_frames_carry_event_and_data() {
        let msg = ClientToServer::StartGame { room_id: "AB12CD".into() };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"event": "start_game", "data": {"room_id": "AB12CD"}}));
    }

    #[test]
    fn room_update_tolerates_missing_and_extra_fields() {
        let id = Uuid::new_v4();
        let raw = json!({
            "event": "room_update",
            "data": {
                "room_id": "QWERTY",
                "players": [{"id": id, "username": "Sara", "avatar_color": "#4ECDC4"}],
                "game_state": "between_rounds",
                "scores": {id.to_string(): 150},
                "round": 2,
                "max_rounds": 3,
                "leaderboard": []
            }
        });
        let ev: ServerToClient = serde_json::from_value(raw).unwrap();
        let ServerToClient::RoomUpdate(room) = ev else {
            panic!("expected room update");
        };
        assert_eq!(room.game_state, GameState::BetweenRounds);
        assert_eq!(room.score_of(&id), 150);
        assert_eq!(room.remaining_time, 80);
        assert!(room.current_drawer.is_none());
    }

    #[test]
    fn game_started_flattens_room_fields() {
        let raw = json!({
            "event": "game_started",
            "data": {
                "room_id": "QWERTY",
                "game_state": "drawing",
                "players": [],
                "word_hint": "ق...م",
                "drawer": "Omar",
                "word_length": 3,
                "round_time": 80
            }
        });
        let ev: ServerToClient = serde_json::from_value(raw).unwrap();
        match ev {
            ServerToClient::GameStarted(started) => {
                assert_eq!(started.drawer, "Omar");
                assert_eq!(started.room.game_state, GameState::Drawing);
                assert_eq!(started.room.word_hint, "ق...م");
                assert_eq!(started.round_time, 80);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_chat_kind_reads_as_plain_message() {
        let payload: ChatPayload =
            serde_json::from_value(json!({"type": "shout", "player": "a", "message": "hi"})).unwrap();
        assert_eq!(payload.kind, ChatKind::Message);

        let system: ChatPayload =
            serde_json::from_value(json!({"type": "system", "message": "Game started!"})).unwrap();
        assert_eq!(system.kind, ChatKind::System);
        assert!(system.player.is_none());
    }

    #[test]
    fn error_without_message_still_decodes() {
        let ev: ServerToClient = serde_json::from_value(json!({"event": "error", "data": {}})).unwrap();
        assert_eq!(ev, ServerToClient::Error { message: None });
    }

    #[test]
    fn room_codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_room_code("  ab12cd "), Some("AB12CD".to_string()));
        assert_eq!(normalize_room_code("abc"), None);
        assert_eq!(normalize_room_code("ABCDEFG"), None);
    }

    #[test]
    fn state_labels() {
        assert_eq!(GameState::Waiting.to_string(), "Waiting for players...");
        assert_eq!(GameState::Finished.to_string(), "Game finished");
        assert!(GameState::Guessing.in_progress());
        assert!(!GameState::BetweenRounds.in_progress());
    }
}
