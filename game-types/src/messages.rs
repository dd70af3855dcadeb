use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    FillPayload, GameSummary, Player, QuestionHint, RoomId, RoomSnapshot, RoundReveal,
    RoundStart, StartGameRequest, StrokeEvent, TurnPrompt, WordView,
};

/// Inbound named events. On the wire: `{"event": "join-room", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[ts(export)]
pub enum ClientMessage {
    CreateRoom(String),
    JoinRoom(JoinRequest),
    StartGame(StartGameRequest),
    Drawing(StrokeEvent),
    FillCanvas(FillPayload),
    ClearCanvas,
    Undo,
    SendMessage(String),
    ViewWord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JoinRequest {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub username: String,
}

/// Outbound named events, same framing as [`ClientMessage`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[ts(export)]
pub enum ServerMessage {
    RoomCreated(RoomId),
    RoomJoined(RoomSnapshot),
    JoinError(String),
    UpdatePlayers(Vec<Player>),
    UserJoined(String),
    UserLeft(String),
    Drawing(StrokeEvent),
    FillCanvas(FillPayload),
    ClearCanvas,
    Undo,
    ReceiveMessage(ChatLine),
    CorrectGuess(CorrectGuess),
    YourTurn(TurnPrompt),
    QuestionHint(QuestionHint),
    GameStarted(RoundStart),
    UpdateTimer(u32),
    RoundEnded(RoundReveal),
    GameEnded(GameSummary),
    ViewWord(WordView),
}

/// A chat line. Wrong guesses are ordinary chat tagged `isIncorrect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatLine {
    pub username: String,
    pub message: String,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub is_incorrect: bool,
}

impl ChatLine {
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            username: "System".to_string(),
            message: message.into(),
            is_system: true,
            is_correct: false,
            is_incorrect: false,
        }
    }

    pub fn incorrect_guess(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
            is_system: false,
            is_correct: false,
            is_incorrect: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CorrectGuess {
    pub username: String,
    /// Points awarded for this guess, not the running total
    pub score: u32,
    pub time_remaining: u32,
}
