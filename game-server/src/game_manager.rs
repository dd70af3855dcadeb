use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::round_clock::RoundClock;
use crate::websocket::connection::{ConnectionId, ConnectionManager};
use game_core::{
    Effects, GameError, QuestionBank, Room, RoomRegistry, Session, SessionDirectory,
    normalize_room_id, normalize_username,
};
use game_types::{
    DrawingAction, JoinRequest, RoomId, RoomSummary, ServerMessage, StartGameRequest,
};

/// Everything guarded by the lobby lock
#[derive(Debug)]
struct Lobby {
    rooms: RoomRegistry,
    sessions: SessionDirectory,
    clock: RoundClock,
}

/// Routes client actions and timer firings to rooms. Each call holds the lobby
/// lock from lookup through fan-out, so every connection sees events in the
/// order rooms produced them.
pub struct GameManager {
    lobby: Mutex<Lobby>,
    questions: QuestionBank,
    connection_manager: Arc<ConnectionManager>,
    handle: Weak<GameManager>,
}

impl GameManager {
    pub fn new(connection_manager: Arc<ConnectionManager>, config: &Config) -> Arc<Self> {
        Self::with_question_bank(connection_manager, config, QuestionBank::technical())
    }

    pub fn with_question_bank(
        connection_manager: Arc<ConnectionManager>,
        config: &Config,
        questions: QuestionBank,
    ) -> Arc<Self> {
        info!("Question bank loaded with {} questions", questions.len());
        Arc::new_cyclic(|handle| Self {
            lobby: Mutex::new(Lobby {
                rooms: RoomRegistry::new(config.room_defaults()),
                sessions: SessionDirectory::new(),
                clock: RoundClock::new(config.intermission()),
            }),
            questions,
            connection_manager,
            handle: handle.clone(),
        })
    }

    pub async fn create_room(&self, id: ConnectionId, username: &str) -> Result<RoomId, GameError> {
        let mut lobby = self.lobby.lock().await;
        self.create_room_locked(&mut lobby, id, username)
    }

    pub async fn join_room(&self, id: ConnectionId, request: JoinRequest) -> Result<RoomId, GameError> {
        let mut lobby = self.lobby.lock().await;
        self.join_room_locked(&mut lobby, id, request)
    }

    pub async fn start_game(
        &self,
        id: ConnectionId,
        settings: StartGameRequest,
    ) -> Result<(), GameError> {
        let mut lobby = self.lobby.lock().await;
        self.start_game_locked(&mut lobby, id, settings)
    }

    pub async fn relay_drawing(&self, id: ConnectionId, action: DrawingAction) -> Result<(), GameError> {
        let mut lobby = self.lobby.lock().await;
        let room_id = Self::seated_room(&lobby, id)?;
        let room = lobby.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let effects = room.relay_drawing(id, action)?;
        self.apply(&mut lobby, &room_id, effects);
        Ok(())
    }

    pub async fn submit_guess(&self, id: ConnectionId, text: &str) -> Result<(), GameError> {
        let mut lobby = self.lobby.lock().await;
        let room_id = Self::seated_room(&lobby, id)?;
        let room = lobby.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let effects = room.submit_guess(id, text)?;
        self.apply(&mut lobby, &room_id, effects);
        Ok(())
    }

    pub async fn view_word(&self, id: ConnectionId) -> Result<(), GameError> {
        let lobby = self.lobby.lock().await;
        let room_id = Self::seated_room(&lobby, id)?;
        let room = lobby.rooms.get(&room_id).ok_or(GameError::RoomNotFound)?;
        let view = room.view_word(id)?;
        let mut effects = Effects::new();
        effects.send(id, ServerMessage::ViewWord(view));
        self.connection_manager.dispatch(effects.outbound);
        Ok(())
    }

    /// Transport closed: vacate the connection's seat, if any
    pub async fn handle_disconnect(&self, id: ConnectionId) {
        let mut lobby = self.lobby.lock().await;
        if !self.leave_room(&mut lobby, id) {
            debug!("Connection {} disconnected without a room", id);
        }
    }

    /// One countdown tick. Returns whether the countdown is still live.
    pub async fn tick_room(&self, room_id: &str, epoch: u64) -> bool {
        let mut lobby = self.lobby.lock().await;
        let Some(effects) = lobby.rooms.get_mut(room_id).and_then(|room| room.tick(epoch)) else {
            return false;
        };
        self.apply(&mut lobby, room_id, effects);
        lobby
            .rooms
            .get(room_id)
            .is_some_and(|room| room.is_countdown_live(epoch))
    }

    pub async fn begin_scheduled_round(&self, room_id: &str, epoch: u64) {
        let mut lobby = self.lobby.lock().await;
        self.begin_scheduled_round_locked(&mut lobby, room_id, epoch);
    }

    pub async fn room_summary(&self, room_id: &str) -> Option<RoomSummary> {
        let lobby = self.lobby.lock().await;
        lobby.rooms.get(&normalize_room_id(room_id)).map(Room::summary)
    }

    /// Read-only access to a room, for diagnostics and tests
    pub async fn inspect_room<T>(&self, room_id: &str, f: impl FnOnce(&Room) -> T) -> Option<T> {
        let lobby = self.lobby.lock().await;
        lobby.rooms.get(room_id).map(f)
    }

    pub async fn room_of(&self, id: ConnectionId) -> Option<RoomId> {
        let lobby = self.lobby.lock().await;
        lobby.sessions.room_of(id).map(str::to_string)
    }

    pub async fn is_creator(&self, id: ConnectionId) -> bool {
        self.lobby.lock().await.sessions.is_creator(id)
    }

    pub async fn is_timer_running(&self, room_id: &str) -> bool {
        self.lobby.lock().await.clock.is_running(room_id)
    }

    pub async fn active_room_count(&self) -> usize {
        self.lobby.lock().await.rooms.len()
    }

    pub async fn session_count(&self) -> usize {
        self.lobby.lock().await.sessions.len()
    }

    fn create_room_locked(
        &self,
        lobby: &mut Lobby,
        id: ConnectionId,
        username: &str,
    ) -> Result<RoomId, GameError> {
        let username = normalize_username(username).ok_or(GameError::InvalidUsername)?;
        self.leave_room(lobby, id);

        let (room_id, effects) = lobby.rooms.create_room(id, &username, &mut rand::rng())?;
        lobby.sessions.insert(
            id,
            Session {
                room_id: room_id.clone(),
                username,
                is_creator: true,
            },
        );
        self.apply(lobby, &room_id, effects);
        Ok(room_id)
    }

    fn join_room_locked(
        &self,
        lobby: &mut Lobby,
        id: ConnectionId,
        request: JoinRequest,
    ) -> Result<RoomId, GameError> {
        let target = normalize_room_id(&request.room_id);
        if lobby.sessions.room_of(id) == Some(target.as_str()) {
            let room = lobby.rooms.get(&target).ok_or(GameError::RoomNotFound)?;
            let mut effects = Effects::new();
            effects.send(id, ServerMessage::RoomJoined(room.snapshot()));
            self.connection_manager.dispatch(effects.outbound);
            return Ok(target);
        }

        let (room_id, effects) = lobby
            .rooms
            .join_room(&request.room_id, id, &request.username)?;
        self.leave_room(lobby, id);

        let username = lobby
            .rooms
            .get(&room_id)
            .and_then(|room| room.player(id))
            .map(|player| player.username.clone())
            .unwrap_or_default();
        lobby.sessions.insert(
            id,
            Session {
                room_id: room_id.clone(),
                username,
                is_creator: false,
            },
        );
        self.apply(lobby, &room_id, effects);
        Ok(room_id)
    }

    fn start_game_locked(
        &self,
        lobby: &mut Lobby,
        id: ConnectionId,
        settings: StartGameRequest,
    ) -> Result<(), GameError> {
        let room_id = Self::seated_room(lobby, id)?;
        if !lobby.sessions.is_creator(id) {
            return Err(GameError::NotCreator);
        }
        let room = lobby.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let effects = room.start_game(settings, &self.questions, &mut rand::rng())?;
        self.apply(lobby, &room_id, effects);
        Ok(())
    }

    fn begin_scheduled_round_locked(&self, lobby: &mut Lobby, room_id: &str, epoch: u64) {
        let Some(effects) = lobby
            .rooms
            .get_mut(room_id)
            .and_then(|room| room.begin_scheduled_round(epoch, &self.questions, &mut rand::rng()))
        else {
            debug!("Skipping superseded round start for room {}", room_id);
            return;
        };
        self.apply(lobby, room_id, effects);
    }

    /// Remove `id` from its room and drop its session. Returns false when the
    /// connection was not seated anywhere.
    fn leave_room(&self, lobby: &mut Lobby, id: ConnectionId) -> bool {
        let Some(session) = lobby.sessions.get(id).cloned() else {
            return false;
        };

        if let Some(departure) = lobby.rooms.remove_player(&session.room_id, id) {
            if departure.room_deleted {
                lobby.clock.cancel(&session.room_id);
                self.connection_manager.dispatch(departure.effects.outbound);
            } else {
                if session.is_creator {
                    let successor = lobby
                        .rooms
                        .get(&session.room_id)
                        .and_then(|room| room.players().first())
                        .map(|player| (player.id, player.username.clone()));
                    if let Some((successor, name)) = successor {
                        lobby.sessions.promote_creator(successor);
                        info!("{} is now the creator of room {}", name, session.room_id);
                    }
                }
                self.apply(lobby, &session.room_id, departure.effects);
            }
        }

        lobby.sessions.remove(id);
        true
    }

    fn apply(&self, lobby: &mut Lobby, room_id: &str, effects: Effects) {
        if let Some(command) = effects.timer {
            lobby.clock.apply(room_id, command, self.handle.clone());
        }
        self.connection_manager.dispatch(effects.outbound);
    }

    fn seated_room(lobby: &Lobby, id: ConnectionId) -> Result<RoomId, GameError> {
        lobby
            .sessions
            .room_of(id)
            .map(str::to_string)
            .ok_or(GameError::NotInRoom)
    }
}
