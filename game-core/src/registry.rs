use crate::{Effects, GameError, Room, RoomDefaults};
use game_types::{ConnectionId, Player, RoomId, ServerMessage};
use rand::Rng;
use std::collections::HashMap;
use tracing::info;

pub const ROOM_ID_LENGTH: usize = 6;
const ROOM_ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random uppercase base-36 room code
pub fn generate_room_id<R: Rng + ?Sized>(rng: &mut R) -> RoomId {
    (0..ROOM_ID_LENGTH)
        .map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char)
        .collect()
}

/// Room codes are typed by hand, so match them loosely
pub fn normalize_room_id(raw: &str) -> RoomId {
    raw.trim().to_uppercase()
}

pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A player leaving a room
#[derive(Debug)]
pub struct Departure {
    pub player: Player,
    pub effects: Effects,
    /// The room emptied and no longer exists
    pub room_deleted: bool,
}

/// All live rooms, keyed by code
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
    defaults: RoomDefaults,
}

impl RoomRegistry {
    pub fn new(defaults: RoomDefaults) -> Self {
        Self {
            rooms: HashMap::new(),
            defaults,
        }
    }

    /// Open a room with `creator` as its only member
    pub fn create_room<R: Rng + ?Sized>(
        &mut self,
        creator: ConnectionId,
        username: &str,
        rng: &mut R,
    ) -> Result<(RoomId, Effects), GameError> {
        let username = normalize_username(username).ok_or(GameError::InvalidUsername)?;

        let room_id = loop {
            let candidate = generate_room_id(rng);
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let room = Room::new(room_id.clone(), Player::new(creator, username.clone()), self.defaults);
        let mut effects = Effects::new();
        effects.send(creator, ServerMessage::RoomCreated(room_id.clone()));
        room.broadcast_players(&mut effects);
        self.rooms.insert(room_id.clone(), room);

        info!("Room {} created by {} ({})", room_id, username, creator);
        Ok((room_id, effects))
    }

    /// Seat `id` in an existing room. Returns the normalized room code.
    pub fn join_room(
        &mut self,
        room_id: &str,
        id: ConnectionId,
        username: &str,
    ) -> Result<(RoomId, Effects), GameError> {
        let room_id = normalize_room_id(room_id);
        let username = normalize_username(username);
        let Some(username) = username.filter(|_| !room_id.is_empty()) else {
            return Err(GameError::MissingJoinDetails);
        };

        let room = self.rooms.get_mut(&room_id).ok_or(GameError::RoomNotFound)?;
        let snapshot = room.add_player(Player::new(id, username.clone()))?;

        let mut effects = Effects::new();
        effects.send(id, ServerMessage::RoomJoined(snapshot));
        room.broadcast_players(&mut effects);
        room.broadcast(&mut effects, ServerMessage::UserJoined(username.clone()));

        info!("{} ({}) joined room {}", username, id, room_id);
        Ok((room_id, effects))
    }

    /// Take `id` out of its room, deleting the room once nobody is left
    pub fn remove_player(&mut self, room_id: &str, id: ConnectionId) -> Option<Departure> {
        let room = self.rooms.get_mut(room_id)?;
        let (player, effects) = room.depart(id)?;

        let room_deleted = room.is_empty();
        if room_deleted {
            self.delete_room(room_id);
        }
        info!("{} left room {}", player.username, room_id);
        Some(Departure {
            player,
            effects,
            room_deleted,
        })
    }

    /// Drop an empty room. Rooms with members are never deleted.
    pub fn delete_room(&mut self, room_id: &str) -> bool {
        let empty = self.rooms.get(room_id).is_some_and(Room::is_empty);
        if empty {
            self.rooms.remove(room_id);
            info!("Room {} deleted", room_id);
        }
        empty
    }

    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn defaults(&self) -> RoomDefaults {
        self.defaults
    }
}
