use crate::{DrawingLog, Effects, GameError, TimerCommand};
use chrono::{DateTime, Utc};
use game_types::{
    ConnectionId, GameState, Player, RoomId, RoomSnapshot, RoomSummary, ServerMessage, WordView,
};
use std::collections::HashSet;

/// Settings a freshly created room starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomDefaults {
    pub round_time: u32,
    pub rounds: u32,
    pub max_players: u32,
}

impl Default for RoomDefaults {
    fn default() -> Self {
        Self {
            round_time: 120,
            rounds: 3,
            max_players: 4,
        }
    }
}

/// The room's single timer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundTimer {
    #[default]
    Idle,
    Countdown {
        epoch: u64,
    },
    /// Round over, waiting to start the next one
    Intermission {
        epoch: u64,
    },
}

#[derive(Debug)]
pub struct Room {
    pub(crate) id: RoomId,
    pub(crate) players: Vec<Player>,
    pub(crate) drawer_index: Option<usize>,
    pub(crate) current_question: String,
    /// Lower-cased
    pub(crate) current_answer: String,
    pub(crate) current_category: String,
    pub(crate) correct_guessers: HashSet<ConnectionId>,
    pub(crate) round_time: u32,
    pub(crate) current_time: u32,
    pub(crate) rounds: u32,
    pub(crate) current_round: u32,
    pub(crate) max_players: u32,
    pub(crate) game_state: GameState,
    pub(crate) drawings: DrawingLog,
    timer: RoundTimer,
    timer_epoch: u64,
    created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(id: RoomId, creator: Player, defaults: RoomDefaults) -> Self {
        Self {
            id,
            players: vec![creator],
            drawer_index: None,
            current_question: String::new(),
            current_answer: String::new(),
            current_category: String::new(),
            correct_guessers: HashSet::new(),
            round_time: defaults.round_time,
            current_time: 0,
            rounds: defaults.rounds,
            current_round: 0,
            max_players: defaults.max_players,
            game_state: GameState::Waiting,
            drawings: DrawingLog::default(),
            timer: RoundTimer::Idle,
            timer_epoch: 0,
            created_at: Utc::now(),
        }
    }

    /// Seat a new player; the room must be waiting and below capacity
    pub fn add_player(&mut self, player: Player) -> Result<RoomSnapshot, GameError> {
        if self.players.len() >= self.max_players as usize {
            return Err(GameError::RoomFull);
        }
        if self.game_state == GameState::Playing {
            return Err(GameError::GameInProgress);
        }

        self.players.push(player);
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            players: self.players.clone(),
            game_state: self.game_state,
            room_id: self.id.clone(),
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.id.clone(),
            player_count: self.players.len() as u32,
            max_players: self.max_players,
            game_state: self.game_state,
            current_round: self.current_round,
            total_rounds: self.rounds,
            created_at: self.created_at.to_rfc3339(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.player(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn drawer_index(&self) -> Option<usize> {
        self.drawer_index
    }

    pub fn drawer(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_drawing)
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn round_time(&self) -> u32 {
        self.round_time
    }

    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    pub fn max_players(&self) -> u32 {
        self.max_players
    }

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    pub fn current_answer(&self) -> &str {
        &self.current_answer
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    pub fn correct_guessers(&self) -> &HashSet<ConnectionId> {
        &self.correct_guessers
    }

    pub fn drawings(&self) -> &DrawingLog {
        &self.drawings
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn member_ids_except(&self, excluded: ConnectionId) -> Vec<ConnectionId> {
        self.players
            .iter()
            .filter(|p| p.id != excluded)
            .map(|p| p.id)
            .collect()
    }

    pub fn broadcast(&self, effects: &mut Effects, message: ServerMessage) {
        effects.send_to(self.member_ids(), message);
    }

    pub fn broadcast_except(&self, effects: &mut Effects, excluded: ConnectionId, message: ServerMessage) {
        effects.send_to(self.member_ids_except(excluded), message);
    }

    pub fn broadcast_players(&self, effects: &mut Effects) {
        self.broadcast(effects, ServerMessage::UpdatePlayers(self.players.clone()));
    }

    /// Current prompt; the answer is blank unless `requester` is drawing
    pub fn view_word(&self, requester: ConnectionId) -> Result<WordView, GameError> {
        let player = self.player(requester).ok_or(GameError::NotInRoom)?;
        Ok(WordView {
            question: self.current_question.clone(),
            answer: if player.is_drawing {
                self.current_answer.clone()
            } else {
                String::new()
            },
            category: self.current_category.clone(),
        })
    }

    /// True when every non-drawing player has guessed this round. Vacuously true
    /// when the drawer is alone.
    pub fn all_guessers_correct(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.is_drawing)
            .all(|p| self.correct_guessers.contains(&p.id))
    }

    pub fn timer(&self) -> RoundTimer {
        self.timer
    }

    /// Arm a fresh countdown, superseding whatever the slot held
    pub fn schedule_countdown(&mut self) -> TimerCommand {
        self.timer_epoch += 1;
        self.timer = RoundTimer::Countdown {
            epoch: self.timer_epoch,
        };
        TimerCommand::StartCountdown {
            epoch: self.timer_epoch,
        }
    }

    /// Stop the countdown if one is live. A pending intermission is left alone.
    pub fn cancel_countdown(&mut self) -> Option<TimerCommand> {
        match self.timer {
            RoundTimer::Countdown { .. } => {
                self.timer = RoundTimer::Idle;
                Some(TimerCommand::Cancel)
            }
            _ => None,
        }
    }

    pub fn schedule_next_round(&mut self) -> TimerCommand {
        self.timer_epoch += 1;
        self.timer = RoundTimer::Intermission {
            epoch: self.timer_epoch,
        };
        TimerCommand::ScheduleNextRound {
            epoch: self.timer_epoch,
        }
    }

    /// Empty the slot whatever it holds
    pub fn clear_timer(&mut self) -> Option<TimerCommand> {
        match self.timer {
            RoundTimer::Idle => None,
            _ => {
                self.timer = RoundTimer::Idle;
                Some(TimerCommand::Cancel)
            }
        }
    }

    pub fn is_countdown_live(&self, epoch: u64) -> bool {
        self.timer == RoundTimer::Countdown { epoch }
    }

    pub(crate) fn is_intermission(&self, epoch: u64) -> bool {
        self.timer == RoundTimer::Intermission { epoch }
    }

    pub(crate) fn position_of(&self, id: ConnectionId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }
}
