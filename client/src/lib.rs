pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod lobby;
pub mod notify;
pub mod room;
pub mod surface;
pub mod timer;
pub mod transport;

pub use controller::{RoomController, Screen, Session, SoundCue};
pub use error::{ClientError, Result};
pub use surface::{DrawingSurface, StrokeCounter};

#[cfg(test)]
mod tests;
