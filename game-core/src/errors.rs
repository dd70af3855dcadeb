use crate::SettingsError;

/// How an error is treated by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input from the client
    Validation,
    NotFound,
    /// The request conflicts with the room's current state
    StateConflict,
    /// Stale or unauthorized event racing a round transition; dropped silently
    TransientDrop,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Username is required")]
    InvalidUsername,
    #[error("Room ID and username are required")]
    MissingJoinDetails,
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is full")]
    RoomFull,
    #[error("Game is already in progress")]
    GameInProgress,
    #[error("Only the room creator can start the game")]
    NotCreator,
    #[error("Need at least 2 players to start the game")]
    NotEnoughPlayers,
    #[error("No round is in progress")]
    GameNotActive,
    #[error("Only the current drawer can do that")]
    NotDrawing,
    #[error("Connection is not seated in a room")]
    NotInRoom,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidUsername
            | GameError::MissingJoinDetails
            | GameError::InvalidSettings(_) => ErrorKind::Validation,
            GameError::RoomNotFound => ErrorKind::NotFound,
            GameError::RoomFull
            | GameError::GameInProgress
            | GameError::NotCreator
            | GameError::NotEnoughPlayers => ErrorKind::StateConflict,
            GameError::GameNotActive
            | GameError::NotDrawing
            | GameError::NotInRoom => ErrorKind::TransientDrop,
        }
    }

    /// Whether the originating connection should be told about this error
    pub fn is_surfaced(&self) -> bool {
        self.kind() != ErrorKind::TransientDrop
    }
}
