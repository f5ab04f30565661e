//! Socket plumbing shared by the GUI subscription and the terminal client.
//! One task owns the websocket; the rest of the program talks to it through
//! an unbounded sender of [`ClientToServer`] and receives [`TransportEvent`]s.

use std::time::Duration;

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use neon_draw_protocol::{ClientToServer, ServerToClient};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::error::Result;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A socket is up. Commands pushed into the sender go out on it.
    Connected(mpsc::UnboundedSender<ClientToServer>),
    Event(ServerToClient),
    Disconnected(String),
    /// Every reconnection attempt failed.
    GaveUp,
}

enum SessionEnd {
    /// The server or the network closed the socket.
    Dropped(String),
    /// Nobody listens for events or sends commands anymore.
    Abandoned,
}

/// Keep a connection to `url` alive until reconnecting has failed
/// `attempts` times in a row or the receiving side goes away.
pub async fn run_connection(url: String, attempts: u32, delay: Duration, mut output: mpsc::Sender<TransportEvent>) {
    let mut failures = 0u32;
    loop {
        match connect_async(url.as_str()).await {
            Ok((ws, _)) => {
                failures = 0;
                tracing::info!(%url, "websocket connected");
                let (tx_out, rx_out) = mpsc::unbounded::<ClientToServer>();
                if output.send(TransportEvent::Connected(tx_out)).await.is_err() {
                    return;
                }
                match pump(ws, rx_out, &mut output).await {
                    Ok(SessionEnd::Abandoned) => return,
                    Ok(SessionEnd::Dropped(reason)) => {
                        if output.send(TransportEvent::Disconnected(reason)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        if output.send(TransportEvent::Disconnected(e.to_string())).await.is_err() {
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(%url, attempt = failures, error = %e, "connect failed");
                if failures > attempts {
                    let _ = output.send(TransportEvent::GaveUp).await;
                    return;
                }
            }
        }
        tokio::time::sleep(delay).await;
    }
}

async fn pump(
    mut ws: Socket,
    mut rx_out: mpsc::UnboundedReceiver<ClientToServer>,
    output: &mut mpsc::Sender<TransportEvent>,
) -> Result<SessionEnd> {
    loop {
        tokio::select! {
            cmd = rx_out.next() => {
                let Some(cmd) = cmd else {
                    let _ = ws.close(None).await;
                    return Ok(SessionEnd::Abandoned);
                };
                let text = serde_json::to_string(&cmd)?;
                ws.send(Message::Text(text)).await?;
            }
            frame = ws.next() => match frame {
                Some(Ok(Message::Text(t))) => match serde_json::from_str::<ServerToClient>(&t) {
                    Ok(ev) => {
                        if output.send(TransportEvent::Event(ev)).await.is_err() {
                            return Ok(SessionEnd::Abandoned);
                        }
                    }
                    // one bad frame should not cost us the connection
                    Err(e) => tracing::warn!(error = %e, "undecodable frame"),
                },
                Some(Ok(Message::Close(_))) | None => return Ok(SessionEnd::Dropped("socket closed".into())),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
        }
    }
}
