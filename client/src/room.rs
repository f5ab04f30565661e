//! Read-only views derived from the mirrored [`RoomSnapshot`]. Nothing here
//! mutates state; the UI renders whatever these return.

use neon_draw_protocol::{GameState, PlayerId, RoomSnapshot};

pub const UNKNOWN_PLAYER: &str = "Unknown";
pub const UNKNOWN_COLOR: &str = "#666";

#[derive(Debug, Clone, PartialEq)]
pub struct RoomInfo {
    pub room_label: String,
    pub state_text: String,
    pub round_text: String,
    pub player_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTile {
    pub id: PlayerId,
    pub initial: String,
    pub username: String,
    pub avatar_color: String,
    pub is_you: bool,
    pub is_drawer: bool,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: PlayerId,
    pub username: String,
    pub avatar_color: String,
    pub score: i64,
    pub is_you: bool,
}

impl LeaderboardEntry {
    /// Top three get highlighted.
    pub fn is_podium(&self) -> bool {
        self.rank <= 3
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverSummary {
    pub winner: String,
    pub winner_score: i64,
    pub standings: Vec<LeaderboardEntry>,
}

pub fn room_info(room: &RoomSnapshot) -> RoomInfo {
    RoomInfo {
        room_label: format!("Room: {}", room.room_id),
        state_text: room.game_state.to_string(),
        round_text: format!("{}/{}", room.round, room.max_rounds),
        player_count: room.players.len(),
    }
}

/// Tiles in server order. The drawer badge only shows while a turn is being
/// drawn.
pub fn player_tiles(room: &RoomSnapshot, me: Option<&PlayerId>, drawer: Option<&str>) -> Vec<PlayerTile> {
    let drawing = room.game_state == GameState::Drawing;
    room.players
        .iter()
        .map(|p| PlayerTile {
            id: p.id,
            initial: p.username.chars().next().map(|c| c.to_uppercase().collect::<String>()).unwrap_or_default(),
            username: p.username.clone(),
            avatar_color: p.avatar_color.clone(),
            is_you: me == Some(&p.id),
            is_drawer: drawing && drawer == Some(p.username.as_str()),
            score: room.score_of(&p.id),
        })
        .collect()
}

/// Score entries sorted high to low. Ties keep the order players appear in
/// the room; ids missing from the player list sort after known ones.
pub fn leaderboard(room: &RoomSnapshot, me: Option<&PlayerId>) -> Vec<LeaderboardEntry> {
    let position = |id: &PlayerId| room.players.iter().position(|p| &p.id == id).unwrap_or(usize::MAX);

    let mut scores: Vec<(&PlayerId, i64)> = room.scores.iter().map(|(id, s)| (id, *s)).collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| position(a.0).cmp(&position(b.0))).then_with(|| a.0.cmp(b.0)));

    scores
        .into_iter()
        .enumerate()
        .map(|(i, (id, score))| {
            let player = room.player(id);
            LeaderboardEntry {
                rank: i + 1,
                id: *id,
                username: player.map(|p| p.username.clone()).unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
                avatar_color: player.map(|p| p.avatar_color.clone()).unwrap_or_else(|| UNKNOWN_COLOR.to_string()),
                score,
                is_you: me == Some(id),
            }
        })
        .collect()
}

pub fn start_button(room: &RoomSnapshot) -> StartButton {
    match room.game_state {
        GameState::Waiting => StartButton { label: "Start Game", enabled: room.players.len() >= 2 },
        // play again goes through the game-over dialog
        GameState::Drawing | GameState::Guessing | GameState::BetweenRounds | GameState::Finished => {
            StartButton { label: "Game in Progress", enabled: false }
        }
    }
}

pub fn game_over(room: &RoomSnapshot, me: Option<&PlayerId>) -> Option<GameOverSummary> {
    let standings = leaderboard(room, me);
    let top = standings.first()?;
    Some(GameOverSummary {
        winner: format!("Winner: {}", top.username),
        winner_score: top.score,
        standings: standings.clone(),
    })
}
