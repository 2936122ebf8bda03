//! # routes::monitor
//!
//! `GET /ws/monitor` — live feed for the dashboard.  Sends a `SNAPSHOT` frame
//! on connect (current labels + series), then every [`WsEvent`] as a JSON
//! text frame.
//!
//! [`WsEvent`]: crate::events::WsEvent

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::state::SharedState;

pub async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Current labels + series as a single JSON frame.
pub async fn snapshot_json(state: &SharedState) -> String {
    let display = state.display.read().await.clone();
    let series  = state.history.read().await.to_series();

    json!({
        "event":   "SNAPSHOT",
        "display": display,
        "series":  series,
    })
    .to_string()
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // Subscribe before the snapshot so nothing between the two is lost.
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 WebSocket client connected");

    let snapshot = snapshot_json(&state).await;
    if sender.send(Message::Text(snapshot.into())).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("WS client lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 WebSocket client disconnected");
}
