use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::game_manager::GameManager;
use game_types::{ClientMessage, ServerMessage};

pub mod connection;
pub mod handlers;


use connection::ConnectionId;
pub use connection::ConnectionManager;
use handlers::MessageHandler;

/// Serve one player socket until either side goes away, then vacate
/// whatever room it was seated in.
pub async fn handle_connection(
    websocket: WebSocket,
    connection_manager: Arc<ConnectionManager>,
    game_manager: Arc<GameManager>,
) {
    let id = ConnectionId::new();
    info!("Player socket {} opened", id);

    let (sink, stream) = websocket.split();
    let outbox = connection_manager.create_connection(id);
    let handler = MessageHandler::new(id, connection_manager.clone(), game_manager);

    tokio::select! {
        _ = read_frames(stream, &handler) => {},
        _ = write_frames(sink, outbox, id) => {},
    }

    info!("Player socket {} closed", id);
    handler.handle_disconnect().await;
    connection_manager.remove_connection(id);
}

async fn read_frames(mut stream: SplitStream<WebSocket>, handler: &MessageHandler) {
    let id = handler.connection_id();
    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) if frame.is_close() => break,
            Ok(frame) => frame,
            Err(e) => {
                warn!("Socket error on {}: {}", id, e);
                break;
            }
        };

        // Bad frames are dropped; the socket stays open
        let Some(message) = decode(&frame) else {
            continue;
        };
        if let Err(e) = handler.handle_message(message).await {
            warn!("Could not reply to {}: {}", id, e);
        }
    }
}

async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbox: mpsc::UnboundedReceiver<ServerMessage>,
    id: ConnectionId,
) {
    while let Some(message) = outbox.recv().await {
        let json = match serde_json::to_string(&message) {
            Ok(json) => json,
            Err(e) => {
                error!("Unserializable event for {}: {}", id, e);
                continue;
            }
        };
        if let Err(e) = sink.send(Message::text(json)).await {
            warn!("Write to {} failed: {}", id, e);
            break;
        }
    }
}

/// Text frames holding a known event; anything else yields `None`
fn decode(frame: &Message) -> Option<ClientMessage> {
    let text = frame.to_str().ok()?;
    match serde_json::from_str(text) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!("Unreadable frame: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_known_events_only() {
        let frame = Message::text(r#"{"event":"undo"}"#);
        assert_eq!(decode(&frame), Some(ClientMessage::Undo));

        assert_eq!(decode(&Message::text("not json")), None);
        assert_eq!(decode(&Message::text(r#"{"event":"teleport"}"#)), None);
        assert_eq!(decode(&Message::binary(vec![1, 2, 3])), None);
    }
}
