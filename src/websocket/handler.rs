//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection. The session's controller lives inside the receive task, so
//! its input events are applied strictly in arrival order.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::SessionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::DashboardController;

/// WebSocket upgrade handler
///
/// This is the entry point for dashboard sessions.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let hub = Arc::clone(&state.sessions);

    // Create channel for sending messages to this session
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let session_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected WebSocket session");
            if let Some(text) = encode(&ServerMessage::error(e.to_string())) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let mut controller = state.new_controller();

    // Queue the greeting before the forwarder starts so it goes out first
    let greeting = [
        ServerMessage::Connected {
            session_id: session_id.clone(),
        },
        ServerMessage::Dashboard {
            view: Box::new(controller.view()),
        },
    ];
    for msg in greeting {
        if hub.send_to(&session_id, msg).await.is_err() {
            hub.unregister(&session_id).await;
            return;
        }
    }

    let session_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(text) = encode(&msg) else {
                continue;
            };
            if sender.send(Message::Text(text)).await.is_err() {
                tracing::debug!(
                    session_id = %session_for_send,
                    "WebSocket send failed, closing session"
                );
                break;
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let session_for_recv = session_id.clone();

    // Task to receive input events and drive this session's controller
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&hub_for_recv, &session_for_recv, &mut controller, msg)
                        .await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&session_id).await;
}

fn encode(msg: &ServerMessage) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

/// Handle a received WebSocket frame
///
/// Returns false if the session should end.
async fn handle_ws_message(
    hub: &SessionHub,
    session_id: &str,
    controller: &mut DashboardController,
    message: Message,
) -> bool {
    let reply = match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => respond(controller, client_msg),
            Err(e) => {
                tracing::debug!(
                    session_id = %session_id,
                    error = %e,
                    text = %text,
                    "Invalid client message"
                );
                // Reply with an error but keep the session open
                ServerMessage::error(format!("Invalid message format: {}", e))
            }
        },
        Message::Binary(_) => ServerMessage::error("Binary messages not supported"),
        // Axum answers protocol pings itself
        Message::Ping(_) | Message::Pong(_) => return true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            return false;
        }
    };

    hub.send_to(session_id, reply).await.is_ok()
}

/// Apply one parsed client message to the session's controller
fn respond(controller: &mut DashboardController, message: ClientMessage) -> ServerMessage {
    match message.into_event() {
        Some(event) => controller.handle(event).into(),
        None => ServerMessage::Pong,
    }
}
