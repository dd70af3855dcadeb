use crate::{Effects, GameError, Room};
use game_types::{
    ConnectionId, DrawingAction, FillPayload, GameState, ServerMessage, StrokeEvent,
};
use std::collections::VecDeque;

pub const DRAWING_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingEntry {
    Stroke(StrokeEvent),
    Fill(FillPayload),
}

/// Recent canvas operations for the current round, oldest first
#[derive(Debug, Clone, Default)]
pub struct DrawingLog {
    entries: VecDeque<DrawingEntry>,
}

impl DrawingLog {
    pub fn push(&mut self, entry: DrawingEntry) {
        if self.entries.len() == DRAWING_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn undo(&mut self) -> Option<DrawingEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawingEntry> {
        self.entries.iter()
    }
}

impl Room {
    /// Apply a canvas operation from `sender` and echo it to everyone else.
    /// Stroke payloads are passed through untouched.
    pub fn relay_drawing(
        &mut self,
        sender: ConnectionId,
        action: DrawingAction,
    ) -> Result<Effects, GameError> {
        if self.game_state != GameState::Playing {
            return Err(GameError::GameNotActive);
        }
        if !self.player(sender).is_some_and(|p| p.is_drawing) {
            return Err(GameError::NotDrawing);
        }

        let message = match action {
            DrawingAction::Stroke(stroke) => {
                self.drawings.push(DrawingEntry::Stroke(stroke.clone()));
                ServerMessage::Drawing(stroke)
            }
            DrawingAction::Fill(fill) => {
                self.drawings.push(DrawingEntry::Fill(fill.clone()));
                ServerMessage::FillCanvas(fill)
            }
            DrawingAction::Clear => {
                self.drawings.clear();
                ServerMessage::ClearCanvas
            }
            DrawingAction::Undo => {
                self.drawings.undo();
                ServerMessage::Undo
            }
        };

        let mut effects = Effects::new();
        self.broadcast_except(&mut effects, sender, message);
        Ok(effects)
    }
}
