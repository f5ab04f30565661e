// client/src/ui/mod.rs
pub mod canvas;
pub mod chat;
pub mod header;
pub mod players;
pub(crate) mod theme;
pub mod views;
pub mod widgets;
pub(crate) mod ws;
