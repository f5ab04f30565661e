use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not connected to server")]
    NotConnected,
    #[error("not in a room")]
    NotInRoom,
    #[error("outbound channel closed")]
    ChannelClosed,
    #[error("invalid room code `{0}`: expected 6 characters")]
    InvalidRoomCode(String),
    #[error("invalid server url `{0}`")]
    InvalidUrl(String),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("websocket: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
