use futures::channel::mpsc;
use neon_draw_protocol::*;
use uuid::Uuid;

use crate::controller::{RoomController, Screen, SoundCue};
use crate::notify::NoticeKind;
use crate::surface::StrokeCounter;

#[cfg(test)]
mod controller_tests {
    use super::*;
    use crate::chat::ChatFilter;
    use crate::timer::Urgency;

    type Controller = RoomController<StrokeCounter>;

    /// Controller wired to an outbox we can inspect.
    fn connected() -> (Controller, mpsc::UnboundedReceiver<ClientToServer>) {
        let mut c = Controller::new("http://localhost:5000");
        let (tx, rx) = mpsc::unbounded();
        c.on_connected(tx);
        (c, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ClientToServer>) -> Vec<ClientToServer> {
        let mut out = vec![];
        while let Ok(cmd) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    fn last_notice(c: &Controller) -> (String, NoticeKind) {
        let n = c.notifications().last().expect("a notification");
        (n.message.clone(), n.kind)
    }

    /// Joins `username` into room ABC123 and returns the assigned id.
    fn admit(c: &mut Controller, username: &str) -> PlayerId {
        let player_id = Uuid::new_v4();
        c.handle_event(ServerToClient::RoomJoined(RoomAdmission {
            room_id: "ABC123".into(),
            player_id,
            username: username.into(),
        }));
        player_id
    }

    fn player(name: &str) -> Player {
        Player { id: Uuid::new_v4(), username: name.into(), avatar_color: "#FF6B6B".into() }
    }

    fn started(drawer: &str, round_time: u32) -> GameStarted {
        GameStarted {
            room: RoomSnapshot {
                room_id: "ABC123".into(),
                game_state: GameState::Drawing,
                word_hint: "_ _ _".into(),
                players: vec![player("Nour"), player("Sami")],
                ..Default::default()
            },
            drawer: drawer.into(),
            word_length: 3,
            round_time,
        }
    }

    fn stroke() -> StrokeData {
        StrokeData {
            from: CanvasPoint::new(0.1, 0.1),
            to: CanvasPoint::new(0.2, 0.3),
            color: "#000000".into(),
            width: 5.0,
        }
    }

    #[test]
    fn create_room_sends_defaults() {
        let (mut c, mut rx) = connected();
        c.create_room("", "not a number");
        assert_eq!(
            drain(&mut rx),
            vec![ClientToServer::CreateRoom(CreateRoomRequest { username: "Player".into(), max_players: 8 })]
        );
    }

    #[test]
    fn join_with_short_code_warns_and_sends_nothing() {
        let (mut c, mut rx) = connected();
        c.join_room("Nour", "AB1");
        assert!(drain(&mut rx).is_empty());
        assert_eq!(
            last_notice(&c),
            ("Please enter a valid 6-character room code".into(), NoticeKind::Warning)
        );
    }

    #[test]
    fn admission_switches_screen_and_joins_socket_room() {
        let (mut c, mut rx) = connected();
        let id = admit(&mut c, "Nour");

        assert_eq!(c.screen(), Screen::Game);
        assert_eq!(c.session().map(|s| s.player_id), Some(id));
        assert_eq!(drain(&mut rx), vec![ClientToServer::Join { room_id: "ABC123".into(), player_id: id }]);
        assert_eq!(last_notice(&c), ("Joined room ABC123!".into(), NoticeKind::Success));
    }

    #[test]
    fn created_room_announces_code() {
        let (mut c, _rx) = connected();
        c.handle_event(ServerToClient::RoomCreated(RoomAdmission {
            room_id: "ZZ99QQ".into(),
            player_id: Uuid::new_v4(),
            username: "Nour".into(),
        }));
        assert_eq!(last_notice(&c).0, "Room created! Code: ZZ99QQ");
    }

    #[test]
    fn reconnect_rejoins_room() {
        let (mut c, _rx) = connected();
        let id = admit(&mut c, "Nour");
        c.on_disconnected("socket closed");
        assert!(!c.is_connected());

        let (tx, mut rx) = mpsc::unbounded();
        c.on_connected(tx);
        assert_eq!(
            drain(&mut rx),
            vec![
                ClientToServer::Join { room_id: "ABC123".into(), player_id: id },
                ClientToServer::GetRoomData { room_id: "ABC123".into() },
            ]
        );
    }

    #[test]
    fn intents_without_room_are_ignored() {
        let (mut c, mut rx) = connected();
        c.start_game();
        assert!(!c.send_chat("hello"));
        c.clear_canvas();
        assert!(drain(&mut rx).is_empty());
        assert!(c.notifications().last().is_none());
    }

    #[test]
    fn disconnected_intent_reports_error() {
        let mut c = Controller::new("http://localhost:5000");
        c.create_room("Nour", "8");
        assert_eq!(last_notice(&c), ("Not connected to server".into(), NoticeKind::Error));
    }

    #[test]
    fn game_started_decides_drawer_by_username() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");

        c.handle_event(ServerToClient::GameStarted(started("Nour", 80)));
        assert!(c.is_drawer());
        assert_eq!(c.drawer_text().as_deref(), Some("You are drawing!"));
        assert_eq!(c.word_hint(), "_ _ _");
        assert!(c.surface().is_some_and(|s| s.draw_mode));
        assert!(c.timer_running());

        c.handle_event(ServerToClient::GameStarted(started("Sami", 80)));
        assert!(!c.is_drawer());
        assert_eq!(c.drawer_text().as_deref(), Some("Sami is drawing"));
        assert!(c.surface().is_some_and(|s| !s.draw_mode));
    }

    #[test]
    fn drawer_ignores_echoed_strokes() {
        let (mut c, mut rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Nour", 80)));
        drain(&mut rx);

        c.submit_stroke(stroke());
        c.handle_event(ServerToClient::DrawUpdate(stroke()));
        assert_eq!(c.surface().map(|s| s.strokes), Some(1));
        assert_eq!(drain(&mut rx), vec![ClientToServer::Draw { room_id: "ABC123".into(), data: stroke() }]);

        c.handle_event(ServerToClient::CanvasCleared {});
        assert_eq!(c.surface().map(|s| s.clears), Some(0));
    }

    #[test]
    fn guesser_renders_remote_strokes_and_cannot_draw() {
        let (mut c, mut rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Sami", 80)));
        drain(&mut rx);

        c.handle_event(ServerToClient::DrawUpdate(stroke()));
        c.handle_event(ServerToClient::DrawUpdate(stroke()));
        assert_eq!(c.surface().map(|s| s.strokes), Some(2));

        c.submit_stroke(stroke());
        c.clear_canvas();
        assert!(drain(&mut rx).is_empty());

        c.handle_event(ServerToClient::CanvasCleared {});
        assert_eq!(c.surface().map(|s| (s.strokes, s.clears)), Some((0, 1)));
    }

    #[test]
    fn drawer_clear_goes_out() {
        let (mut c, mut rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Nour", 80)));
        drain(&mut rx);

        c.clear_canvas();
        assert_eq!(drain(&mut rx), vec![ClientToServer::ClearCanvas { room_id: "ABC123".into() }]);
        assert_eq!(c.surface().map(|s| s.clears), Some(1));
    }

    #[test]
    fn chat_trims_and_skips_blank() {
        let (mut c, mut rx) = connected();
        let id = admit(&mut c, "Nour");
        drain(&mut rx);

        assert!(!c.send_chat("   "));
        assert!(c.send_chat("  is it a cat?  "));
        assert_eq!(
            drain(&mut rx),
            vec![ClientToServer::ChatMessage { room_id: "ABC123".into(), player_id: id, message: "is it a cat?".into() }]
        );
    }

    #[test]
    fn chat_cues_follow_message_kind() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");

        c.handle_event(ServerToClient::ChatMessage(ChatPayload {
            kind: ChatKind::System,
            player: None,
            message: "Sami joined".into(),
            timestamp: None,
        }));
        assert!(c.sounds_played().is_empty());

        c.handle_event(ServerToClient::ChatMessage(ChatPayload {
            kind: ChatKind::CorrectGuess,
            player: Some("Sami".into()),
            message: "Sami guessed the word!".into(),
            timestamp: None,
        }));
        assert_eq!(c.sounds_played(), [SoundCue::Correct, SoundCue::Message]);
        assert_eq!(c.chat().len(), 2);

        c.handle_event(ServerToClient::ChatMessage(ChatPayload {
            kind: ChatKind::Guess,
            player: Some("Sami".into()),
            message: "dog".into(),
            timestamp: None,
        }));
        assert_eq!(c.take_sounds(), vec![SoundCue::Correct, SoundCue::Message, SoundCue::Message]);
        assert!(c.sounds_played().is_empty());

        c.filter_chat(ChatFilter::System);
        assert_eq!(c.chat().visible().count(), 1);
    }

    #[test]
    fn muted_controller_plays_nothing() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.toggle_sound();
        assert!(c.is_muted());
        c.handle_event(ServerToClient::ChatMessage(ChatPayload {
            kind: ChatKind::Guess,
            player: Some("Sami".into()),
            message: "dog".into(),
            timestamp: None,
        }));
        assert!(c.sounds_played().is_empty());
    }

    #[test]
    fn room_update_mirrors_snapshot() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Sami", 80)));

        let mut snap = started("Sami", 80).room;
        snap.game_state = GameState::Guessing;
        snap.remaining_time = 25;
        c.handle_event(ServerToClient::RoomUpdate(snap));

        assert_eq!(c.room().game_state, GameState::Guessing);
        assert_eq!(c.timer().text, "25s");
        assert_eq!(c.timer().urgency, Urgency::Warning);
        assert_eq!(c.start_button().label, "Game in Progress");
    }

    #[test]
    fn waiting_update_resets_hint() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::RoomUpdate(RoomSnapshot::default()));
        assert_eq!(c.word_hint(), "...");
    }

    #[test]
    fn finished_game_shows_overlay_once() {
        let (mut c, mut rx) = connected();
        admit(&mut c, "Nour");
        drain(&mut rx);

        let mut snap = started("Sami", 80).room;
        snap.game_state = GameState::Finished;
        snap.scores.insert(snap.players[1].id, 300);
        snap.scores.insert(snap.players[0].id, 100);
        c.handle_event(ServerToClient::RoomUpdate(snap.clone()));

        assert!(c.game_over_visible());
        assert_eq!(c.sounds_played(), [SoundCue::GameOver]);
        c.handle_event(ServerToClient::RoomUpdate(snap.clone()));
        assert_eq!(c.sounds_played(), [SoundCue::GameOver]);
        assert_eq!(c.game_over_summary().map(|s| s.winner), Some("Winner: Sami".into()));

        c.play_again();
        assert!(!c.game_over_visible());
        assert_eq!(drain(&mut rx), vec![ClientToServer::StartGame { room_id: "ABC123".into() }]);
    }

    #[test]
    fn countdown_expires_with_warning() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Sami", 2)));

        c.tick();
        assert!(c.timer_running());
        c.tick();
        assert!(!c.timer_running());
        assert_eq!(last_notice(&c), ("Time's up!".into(), NoticeKind::Warning));
    }

    #[test]
    fn leave_needs_confirmation_then_cleans_up() {
        let (mut c, mut rx) = connected();
        let id = admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Nour", 80)));
        drain(&mut rx);

        c.back_to_lobby();
        assert!(c.confirm_leave_pending());
        c.cancel_leave();
        assert!(!c.confirm_leave_pending());
        assert_eq!(c.screen(), Screen::Game);

        c.request_leave();
        c.leave_room();
        assert_eq!(drain(&mut rx), vec![ClientToServer::Leave { room_id: "ABC123".into(), player_id: id }]);
        assert_eq!(c.screen(), Screen::Lobby);
        assert!(c.session().is_none());
        assert!(c.surface().is_none());
        assert!(!c.is_drawer());
        assert!(!c.timer_running());
        assert_eq!(last_notice(&c), ("Left the room".into(), NoticeKind::Info));
    }

    #[test]
    fn remote_strokes_without_surface_are_ignored() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");

        c.handle_event(ServerToClient::DrawUpdate(stroke()));
        c.handle_event(ServerToClient::CanvasCleared {});
        assert!(c.surface().is_none());
        assert_eq!(c.screen(), Screen::Game);
    }

    #[test]
    fn leave_while_disconnected_returns_to_lobby() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Nour", 80)));
        c.on_disconnected("socket closed");

        c.request_leave();
        c.leave_room();
        assert_eq!(c.screen(), Screen::Lobby);
        assert!(c.session().is_none());
        assert!(c.surface().is_none());
        assert!(!c.timer_running());
        assert_eq!(last_notice(&c), ("Left the room".into(), NoticeKind::Info));
    }

    #[test]
    fn giving_up_reports_lost_connection() {
        let (mut c, _rx) = connected();
        c.on_gave_up();
        assert!(!c.is_connected());
        assert_eq!(last_notice(&c), ("Connection lost. Could not reach the server".into(), NoticeKind::Error));

        c.create_room("Nour", "8");
        assert_eq!(last_notice(&c), ("Not connected to server".into(), NoticeKind::Error));
    }

    #[test]
    fn late_room_events_do_not_follow_into_next_room() {
        let (mut c, mut rx) = connected();
        admit(&mut c, "Nour");
        c.request_leave();
        c.leave_room();
        drain(&mut rx);

        // already in flight when we left
        c.handle_event(ServerToClient::GameStarted(started("Sami", 80)));
        c.handle_event(ServerToClient::DrawUpdate(stroke()));
        c.handle_event(ServerToClient::RoomUpdate(started("Sami", 80).room));
        assert_eq!(c.screen(), Screen::Lobby);
        assert!(c.surface().is_none());
        assert!(!c.timer_running());
        assert_eq!(c.room().room_id, "");
        assert_eq!(last_notice(&c), ("Left the room".into(), NoticeKind::Info));

        let id = Uuid::new_v4();
        c.handle_event(ServerToClient::RoomJoined(RoomAdmission {
            room_id: "NEW999".into(),
            player_id: id,
            username: "Nour".into(),
        }));
        assert!(c.surface().is_none());
        assert!(!c.timer_running());
        assert!(c.drawer_text().is_none());
        assert_eq!(c.room().game_state, GameState::Waiting);
        assert_eq!(drain(&mut rx), vec![ClientToServer::Join { room_id: "NEW999".into(), player_id: id }]);
    }

    #[test]
    fn admission_drops_previous_room_state() {
        let (mut c, _rx) = connected();
        admit(&mut c, "Nour");
        c.handle_event(ServerToClient::GameStarted(started("Sami", 80)));
        c.handle_event(ServerToClient::DrawUpdate(stroke()));

        // server moved us without a leave in between
        c.handle_event(ServerToClient::RoomJoined(RoomAdmission {
            room_id: "NEW999".into(),
            player_id: Uuid::new_v4(),
            username: "Nour".into(),
        }));
        assert!(c.surface().is_none());
        assert!(!c.timer_running());
        assert!(!c.is_drawer());
        assert_eq!(c.session().map(|s| s.room_id.as_str()), Some("NEW999"));
    }

    #[test]
    fn room_link_uses_share_base() {
        let (mut c, _rx) = connected();
        assert_eq!(c.copy_room_link(), None);
        assert_eq!(last_notice(&c).1, NoticeKind::Error);

        admit(&mut c, "Nour");
        assert_eq!(c.copy_room_link().as_deref(), Some("http://localhost:5000/room/ABC123"));
        assert_eq!(last_notice(&c), ("Room link copied to clipboard!".into(), NoticeKind::Success));
    }

    #[test]
    fn server_error_defaults_message() {
        let (mut c, _rx) = connected();
        c.handle_event(ServerToClient::Error { message: None });
        assert_eq!(last_notice(&c), ("An error occurred".into(), NoticeKind::Error));
        c.handle_event(ServerToClient::Error { message: Some("Room is full".into()) });
        assert_eq!(last_notice(&c).0, "Room is full");
    }
}

#[cfg(test)]
mod transport_tests {
    use super::*;
    use crate::transport::{run_connection, TransportEvent};
    use futures::{SinkExt, StreamExt};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio_tungstenite::{accept_async, tungstenite::Message};

    #[tokio::test]
    async fn relays_commands_and_events() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let hello = serde_json::to_string(&ServerToClient::Connected { message: "hi".into() }).unwrap();
            ws.send(Message::Text(hello)).await.unwrap();
            // skipped by the client
            ws.send(Message::Text("{not json".into())).await.unwrap();

            let Some(Ok(Message::Text(t))) = ws.next().await else { panic!("expected a command") };
            serde_json::from_str::<ClientToServer>(&t).unwrap()
        });

        let (out_tx, mut out_rx) = mpsc::channel(16);
        tokio::spawn(run_connection(format!("ws://{addr}"), 0, Duration::from_millis(10), out_tx));

        let Some(TransportEvent::Connected(tx)) = out_rx.next().await else { panic!("expected Connected") };
        let Some(TransportEvent::Event(ev)) = out_rx.next().await else { panic!("expected an event") };
        assert_eq!(ev, ServerToClient::Connected { message: "hi".into() });

        tx.unbounded_send(ClientToServer::StartGame { room_id: "ABC123".into() }).unwrap();
        assert_eq!(server.await.unwrap(), ClientToServer::StartGame { room_id: "ABC123".into() });

        // server task ended, so the socket drops and nobody answers the retry
        assert!(matches!(out_rx.next().await, Some(TransportEvent::Disconnected(_))));
        assert!(matches!(out_rx.next().await, Some(TransportEvent::GaveUp)));
    }

    #[tokio::test]
    async fn gives_up_when_nothing_listens() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let (out_tx, mut out_rx) = mpsc::channel(4);
        run_connection(format!("ws://{addr}"), 1, Duration::from_millis(5), out_tx).await;
        assert!(matches!(out_rx.next().await, Some(TransportEvent::GaveUp)));
    }
}
