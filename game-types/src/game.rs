use crate::{ConnectionId, RoomId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameState {
    /// No round running: before the first game, during the intermission, after game end
    #[default]
    Waiting,
    /// A round is in progress and its countdown is live
    Playing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Player {
    pub id: ConnectionId,
    pub username: String,
    pub score: u32,
    pub is_drawing: bool,
    pub correct_guesses: u32,
    pub quick_guesses: u32,
    pub rounds_drawn: u32,
}

impl Player {
    pub fn new(id: ConnectionId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            score: 0,
            is_drawing: false,
            correct_guesses: 0,
            quick_guesses: 0,
            rounds_drawn: 0,
        }
    }

    /// Clear everything accumulated during a game
    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
        self.is_drawing = false;
        self.correct_guesses = 0;
        self.quick_guesses = 0;
        self.rounds_drawn = 0;
    }
}

/// Validated game settings a room runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameSettings {
    pub players: u32,
    pub draw_time: u32,
    pub rounds: u32,
}

/// `start-game` payload as typed into the creator's form. Any JSON number is
/// accepted here so that range errors can be reported back to the creator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StartGameRequest {
    pub players: f64,
    pub draw_time: f64,
    pub rounds: f64,
}

impl From<GameSettings> for StartGameRequest {
    fn from(settings: GameSettings) -> Self {
        Self {
            players: f64::from(settings.players),
            draw_time: f64::from(settings.draw_time),
            rounds: f64::from(settings.rounds),
        }
    }
}

/// Reply to a successful join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RoomSnapshot {
    pub players: Vec<Player>,
    pub game_state: GameState,
    pub room_id: RoomId,
}

/// Round-start metadata broadcast to the whole room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RoundStart {
    pub drawer: String,
    pub time: u32,
    pub current_round: u32,
    pub total_rounds: u32,
}

/// Sent privately to the drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TurnPrompt {
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// Sent privately to every guesser; never carries the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionHint {
    pub question: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundReveal {
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub player: Player,
    pub iq: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSummary {
    pub winner: LeaderboardEntry,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Reply to `view-word`; `answer` is empty unless the requester is drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordView {
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// Public view of a room for HTTP callers. Never exposes the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub player_count: u32,
    pub max_players: u32,
    pub game_state: GameState,
    pub current_round: u32,
    pub total_rounds: u32,
    pub created_at: String, // ISO 8601 string
}
