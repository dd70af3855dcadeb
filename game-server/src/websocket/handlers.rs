use std::sync::Arc;
use tracing::{debug, info};

use crate::game_manager::GameManager;
use crate::websocket::connection::{ConnectionId, ConnectionManager};
use game_core::GameError;
use game_types::{ClientMessage, DrawingAction, ServerMessage};

#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    game_manager: Arc<GameManager>,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        game_manager: Arc<GameManager>,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            game_manager,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        let id = self.connection_id;
        let result = match message {
            ClientMessage::CreateRoom(username) => self
                .game_manager
                .create_room(id, &username)
                .await
                .map(|_| ()),
            ClientMessage::JoinRoom(request) => self
                .game_manager
                .join_room(id, request)
                .await
                .map(|_| ()),
            ClientMessage::StartGame(settings) => self.game_manager.start_game(id, settings).await,
            ClientMessage::Drawing(stroke) => self.relay(DrawingAction::Stroke(stroke)).await,
            ClientMessage::FillCanvas(fill) => self.relay(DrawingAction::Fill(fill)).await,
            ClientMessage::ClearCanvas => self.relay(DrawingAction::Clear).await,
            ClientMessage::Undo => self.relay(DrawingAction::Undo).await,
            ClientMessage::SendMessage(text) => self.game_manager.submit_guess(id, &text).await,
            ClientMessage::ViewWord => self.game_manager.view_word(id).await,
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.report(e),
        }
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for connection {}", self.connection_id);
        self.game_manager.handle_disconnect(self.connection_id).await;
    }

    async fn relay(&self, action: DrawingAction) -> Result<(), GameError> {
        self.game_manager.relay_drawing(self.connection_id, action).await
    }

    /// Tell the sender about rejected requests; stale ones are only logged
    fn report(&self, error: GameError) -> Result<(), String> {
        if !error.is_surfaced() {
            debug!("Dropped event from {}: {}", self.connection_id, error);
            return Ok(());
        }

        info!("Rejected request from {}: {}", self.connection_id, error);
        self.send_message(ServerMessage::JoinError(error.to_string()))
    }

    fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
    }
}
