use dashmap::DashMap;
use game_core::Outbound;
use game_types::ServerMessage;
use tokio::sync::mpsc;
use tracing::debug;

pub use game_types::ConnectionId;

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection = Self { id, sender };
        (connection, receiver)
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "Connection closed".to_string())
    }
}

/// Outbound channel per live socket. Sends never block, so callers may fan
/// out while holding the lobby lock.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, Connection>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_connection(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (connection, receiver) = Connection::new(id);
        self.connections.insert(id, connection);
        receiver
    }

    pub fn remove_connection(&self, id: ConnectionId) {
        self.connections.remove(&id);
    }

    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn send_to_connection(&self, id: ConnectionId, message: ServerMessage) -> Result<(), String> {
        match self.connections.get(&id) {
            Some(connection) => connection.send_message(message),
            None => Err("Connection not found".to_string()),
        }
    }

    /// Deliver each message to its targets in order. Closed or unknown
    /// connections are skipped.
    pub fn dispatch(&self, outbound: Vec<Outbound>) {
        for Outbound { targets, message } in outbound {
            for target in targets {
                if let Err(e) = self.send_to_connection(target, message.clone()) {
                    debug!("Dropping message for {}: {}", target, e);
                }
            }
        }
    }
}
