use std::time::Duration;

use iced::Subscription;
use neon_draw::transport::run_connection;

use crate::messages::Msg;

/// Bumping `generation` tears the old stream down and dials again.
pub fn subscription(url: String, attempts: u32, delay: Duration, generation: u64) -> Subscription<Msg> {
    let id = format!("ws:{url}:{generation}");
    let stream = iced::stream::channel(100, move |output| async move {
        run_connection(url, attempts, delay, output).await;
    });
    Subscription::run_with_id(id, stream).map(Msg::Transport)
}
