//! Message handling per screen. Which screen is showing is owned by the
//! controller, since server events move the client between them too.
pub mod game;
pub mod lobby;

pub use neon_draw::Screen as AppState;
