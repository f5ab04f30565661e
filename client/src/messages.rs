use neon_draw::chat::ChatFilter;
use neon_draw::transport::TransportEvent;
use neon_draw_protocol::StrokeData;

#[derive(Debug, Clone)]
pub enum Msg {
    Transport(TransportEvent),
    Reconnect,
    Tick,

    // Lobby
    CreateNameChanged(String),
    MaxPlayersChanged(String),
    CreateRoom,
    JoinNameChanged(String),
    RoomCodeChanged(String),
    JoinRoom,

    // Game
    StartGame,
    ChatInputChanged(String),
    SendChat,
    FilterChat(ChatFilter),
    Stroke(StrokeData),
    ClearCanvas,
    BrushColor(&'static str),
    BrushWidth(f32),
    CopyLink,
    PlayAgain,
    BackToLobby,
    RequestLeave,
    CancelLeave,
    ConfirmLeave,
    ToggleSound,
}
