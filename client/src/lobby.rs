use neon_draw_protocol::{normalize_room_code, CreateRoomRequest, JoinRoomRequest};

use crate::error::{ClientError, Result};

pub const DEFAULT_USERNAME: &str = "Player";
pub const DEFAULT_MAX_PLAYERS: u8 = 8;
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 12;

fn username_or_default(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_USERNAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Anything unparsable falls back to the default; numbers are clamped into
/// the range the server accepts.
pub fn parse_max_players(input: &str) -> u8 {
    input
        .trim()
        .parse::<u32>()
        .map(|n| n.clamp(u32::from(MIN_PLAYERS), u32::from(MAX_PLAYERS)) as u8)
        .unwrap_or(DEFAULT_MAX_PLAYERS)
}

pub fn create_request(username: &str, max_players: &str) -> CreateRoomRequest {
    CreateRoomRequest {
        username: username_or_default(username),
        max_players: parse_max_players(max_players),
    }
}

pub fn join_request(username: &str, room_code: &str) -> Result<JoinRoomRequest> {
    let room_id = normalize_room_code(room_code).ok_or_else(|| ClientError::InvalidRoomCode(room_code.trim().to_string()))?;
    Ok(JoinRoomRequest { room_id, username: username_or_default(username) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_username_becomes_player() {
        let req = create_request("   ", "6");
        assert_eq!(req.username, "Player");
        assert_eq!(req.max_players, 6);
    }

    #[test]
    fn max_players_is_clamped() {
        assert_eq!(parse_max_players("1"), 2);
        assert_eq!(parse_max_players("40"), 12);
        assert_eq!(parse_max_players("lots"), 8);
        assert_eq!(parse_max_players(""), 8);
    }

    #[test]
    fn join_needs_six_character_code() {
        let req = join_request(" Nour ", "xy12ab").unwrap();
        assert_eq!(req.room_id, "XY12AB");
        assert_eq!(req.username, "Nour");

        let err = join_request("Nour", "xy1").unwrap_err();
        assert!(matches!(err, ClientError::InvalidRoomCode(code) if code == "xy1"));
    }
}
