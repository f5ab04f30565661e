use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use futures::channel::mpsc;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use neon_draw::chat::ChatFilter;
use neon_draw::config::ClientConfig;
use neon_draw::transport::{run_connection, TransportEvent};
use neon_draw::{RoomController, Screen, StrokeCounter};
use neon_draw_protocol::{ChatKind, GameState, ServerToClient};

type Controller = RoomController<StrokeCounter>;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Create { username: String, max_players: String },
    Join { code: String, username: String },
    Start,
    Chat(String),
    Clear,
    Leave,
    Link,
    Players,
    Board,
    Filter(ChatFilter),
    Sound,
    PlayAgain,
    Help,
    Quit,
}

fn parse_filter(s: &str) -> Option<ChatFilter> {
    ChatFilter::ALL.into_iter().find(|f| f.label().eq_ignore_ascii_case(s))
}

fn parse_command(line: &str, default_name: &str) -> Option<Command> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').map(|(h, r)| (h, r.trim())).unwrap_or((line, ""));
    let mut args = rest.split_whitespace();
    let cmd = match head {
        "create" => Command::Create {
            username: args.next().unwrap_or(default_name).to_string(),
            max_players: args.next().unwrap_or_default().to_string(),
        },
        "join" => Command::Join {
            code: args.next()?.to_string(),
            username: args.next().unwrap_or(default_name).to_string(),
        },
        "start" => Command::Start,
        "chat" | "guess" | "say" if !rest.is_empty() => Command::Chat(rest.to_string()),
        "clear" => Command::Clear,
        "leave" | "lobby" => Command::Leave,
        "link" => Command::Link,
        "players" => Command::Players,
        "board" | "scores" => Command::Board,
        "filter" => Command::Filter(parse_filter(rest)?),
        "sound" | "mute" => Command::Sound,
        "again" => Command::PlayAgain,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn print_help() {
    println!("\n📋 Commands:");
    println!("  create [name] [max]   - Create a room (2-12 players, default 8)");
    println!("  join <code> [name]    - Join a room by its 6-character code");
    println!("  start                 - Start the game");
    println!("  chat <text>           - Chat or guess the word");
    println!("  clear                 - Clear the canvas (drawer only)");
    println!("  players / board       - Show players or the leaderboard");
    println!("  filter <all|guesses|chat|system>");
    println!("  link                  - Show the room link");
    println!("  sound                 - Toggle sound cues");
    println!("  again                 - Play again after a game");
    println!("  leave                 - Leave the room");
    println!("  quit                  - Exit\n");
}

fn print_players(c: &Controller) {
    let info = c.room_info();
    println!("🏠 {} | {} | Round {}", info.room_label, info.state_text, info.round_text);
    for t in c.player_tiles() {
        let you = if t.is_you { " (you)" } else { "" };
        let drawing = if t.is_drawer { " ✏" } else { "" };
        println!("  [{}] {}{}{} - {} pts", t.initial, t.username, you, drawing, t.score);
    }
}

fn print_board(c: &Controller) {
    let board = c.leaderboard();
    if board.is_empty() {
        println!("🏆 Game not started");
    }
    for e in board {
        let you = if e.is_you { " (you)" } else { "" };
        println!("  #{} {}{} - {} pts", e.rank, e.username, you, e.score);
    }
}

/// Echo what the GUI would redraw for this event.
fn print_event(c: &Controller, ev: &ServerToClient) {
    match ev {
        ServerToClient::GameStarted(_) => {
            if let Some(text) = c.drawer_text() {
                println!("🎨 {text}");
            }
            println!("🔤 {}", c.word_hint());
        }
        ServerToClient::RoomUpdate(room) if room.game_state == GameState::Finished => {
            if let Some(summary) = c.game_over_summary() {
                println!("\n🏆 GAME OVER! {} ({} pts)", summary.winner, summary.winner_score);
            }
            print_board(c);
            println!("Type `again` to play again or `leave` to return to the lobby.");
        }
        ServerToClient::ChatMessage(p) => {
            let filter = c.chat().filter();
            if !filter.admits(p.kind) {
                return;
            }
            match (&p.player, p.kind) {
                (_, ChatKind::System) | (None, _) => println!("📢 {}", p.message),
                (Some(player), ChatKind::CorrectGuess) => println!("✅ {player}: {}", p.message),
                (Some(player), _) => println!("💬 {player}: {}", p.message),
            }
        }
        ServerToClient::DrawUpdate(_) | ServerToClient::CanvasCleared {} => {
            if let Some(s) = c.surface() {
                tracing::debug!(strokes = s.strokes, clears = s.clears, "canvas");
            }
        }
        _ => {}
    }
}

/// Returns `false` when the user asked to quit.
fn run_command(c: &mut Controller, cmd: Command) -> bool {
    match cmd {
        Command::Create { username, max_players } => c.create_room(&username, &max_players),
        Command::Join { code, username } => c.join_room(&username, &code),
        Command::Start => c.start_game(),
        Command::Chat(text) => {
            c.send_chat(&text);
        }
        Command::Clear => c.clear_canvas(),
        Command::Leave => {
            c.request_leave();
            if c.confirm_leave_pending() {
                println!("❓ Leave room? (yes/no)");
            }
        }
        Command::Link => {
            if let Some(link) = c.copy_room_link() {
                println!("🔗 {link}");
            }
        }
        Command::Players => print_players(c),
        Command::Board => print_board(c),
        Command::Filter(f) => {
            c.filter_chat(f);
            println!("🔎 Showing {} messages", f.label());
        }
        Command::Sound => c.toggle_sound(),
        Command::PlayAgain => c.play_again(),
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = ClientConfig::parse();
    let share_base = config.share_base().context("invalid --server url")?;
    let default_name = config.username.clone().unwrap_or_default();

    println!("🎨 Neon Draw CLI");
    println!("================");
    println!("🔗 Connecting to {}...", config.server);

    let (events_tx, mut events) = mpsc::channel::<TransportEvent>(100);
    tokio::spawn(run_connection(
        config.server.clone(),
        config.reconnect_attempts,
        config.reconnect_delay(),
        events_tx,
    ));

    let mut controller = Controller::new(share_base);
    let mut seen = 0u64;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if controller.confirm_leave_pending() {
                    if matches!(line, "y" | "yes") {
                        controller.leave_room();
                    } else {
                        controller.cancel_leave();
                    }
                } else if let Some(cmd) = parse_command(line, &default_name) {
                    if !run_command(&mut controller, cmd) {
                        break;
                    }
                } else if controller.screen() == Screen::Game {
                    // bare text in a room is a guess
                    controller.send_chat(line);
                } else {
                    println!("❓ Unknown command: {line} (type `help`)");
                }
            }
            ev = events.next() => match ev {
                Some(TransportEvent::Connected(tx)) => {
                    println!("✅ Connected to server!");
                    controller.on_connected(tx);
                }
                Some(TransportEvent::Event(ev)) => {
                    controller.handle_event(ev.clone());
                    print_event(&controller, &ev);
                    if !controller.take_sounds().is_empty() {
                        print!("\x07");
                    }
                }
                Some(TransportEvent::Disconnected(reason)) => {
                    println!("🔌 Disconnected: {reason}. Reconnecting...");
                    controller.on_disconnected(&reason);
                }
                Some(TransportEvent::GaveUp) | None => {
                    controller.on_gave_up();
                    for n in controller.notifications().since(seen) {
                        println!("{} {}", n.kind.icon(), n.message);
                    }
                    break;
                }
            },
            _ = tick.tick() => {
                let was_running = controller.timer_running();
                controller.tick();
                controller.prune_notifications(Instant::now());
                let timer = controller.timer();
                if was_running && timer.pulsing {
                    println!("⏱  {}", timer.text);
                }
            }
        }

        for n in controller.notifications().since(seen) {
            println!("{} {}", n.kind.icon(), n.message);
        }
        if let Some(last) = controller.notifications().last() {
            seen = seen.max(last.id);
        }
    }

    if controller.session().is_some() {
        controller.leave_room();
    }
    println!("👋 Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lobby_commands() {
        assert_eq!(
            parse_command("create", "Nour"),
            Some(Command::Create { username: "Nour".into(), max_players: String::new() })
        );
        assert_eq!(
            parse_command("create Sami 4", ""),
            Some(Command::Create { username: "Sami".into(), max_players: "4".into() })
        );
        assert_eq!(
            parse_command("join abc123", "Nour"),
            Some(Command::Join { code: "abc123".into(), username: "Nour".into() })
        );
        assert_eq!(parse_command("join", "Nour"), None);
    }

    #[test]
    fn chat_keeps_full_text() {
        assert_eq!(parse_command("chat is it a  cat?", ""), Some(Command::Chat("is it a  cat?".into())));
        assert_eq!(parse_command("chat", ""), None);
    }

    #[test]
    fn filter_names_are_case_insensitive() {
        assert_eq!(parse_command("filter Guesses", ""), Some(Command::Filter(ChatFilter::Guesses)));
        assert_eq!(parse_command("filter nope", ""), None);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut c = Controller::new("http://localhost:5000");
        assert!(!run_command(&mut c, Command::Quit));
        assert!(run_command(&mut c, Command::Players));
    }
}
