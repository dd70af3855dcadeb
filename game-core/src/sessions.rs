use game_types::{ConnectionId, RoomId};
use std::collections::HashMap;

/// Which room a connection sits in, and under what name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub room_id: RoomId,
    pub username: String,
    pub is_creator: bool,
}

#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: HashMap<ConnectionId, Session>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ConnectionId, session: Session) -> Option<Session> {
        self.sessions.insert(id, session)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn remove(&mut self, id: ConnectionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn room_of(&self, id: ConnectionId) -> Option<&str> {
        self.sessions.get(&id).map(|s| s.room_id.as_str())
    }

    pub fn is_creator(&self, id: ConnectionId) -> bool {
        self.sessions.get(&id).is_some_and(|s| s.is_creator)
    }

    /// Hand creator rights to `id`, if it has a session
    pub fn promote_creator(&mut self, id: ConnectionId) -> bool {
        match self.sessions.get_mut(&id) {
            Some(session) => {
                session.is_creator = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
