// client/src/main.rs
mod app;
mod messages;
mod states;
mod ui;

use app::App;
use clap::Parser;
use neon_draw::config::ClientConfig;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::parse();
    tracing::info!(server = %config.server, "starting neon-draw");

    iced::application("Neon Draw", App::update, App::view)
        .subscription(App::subscription)
        .theme(|_| iced::Theme::Dark)
        .window_size((1280.0, 820.0))
        .run_with(move || App::new(config))
}
