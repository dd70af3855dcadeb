use crate::{Effects, GameError, Room, ScoringEngine};
use game_types::{ChatLine, ConnectionId, CorrectGuess, GameState, ServerMessage};
use tracing::debug;

pub const DRAWER_GUESS_NOTICE: &str = "You cannot guess while drawing";
pub const REPEAT_GUESS_NOTICE: &str = "You already guessed correctly!";

/// Normalization applied to both sides of an answer comparison
pub fn normalize_guess(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Room {
    /// Check a chat line against the current answer. Wrong guesses are relayed
    /// as ordinary chat.
    pub fn submit_guess(&mut self, sender: ConnectionId, text: &str) -> Result<Effects, GameError> {
        if self.game_state != GameState::Playing {
            return Err(GameError::GameNotActive);
        }
        let index = self.position_of(sender).ok_or(GameError::NotInRoom)?;

        let mut effects = Effects::new();
        if self.players[index].is_drawing {
            effects.send(
                sender,
                ServerMessage::ReceiveMessage(ChatLine::system(DRAWER_GUESS_NOTICE)),
            );
            return Ok(effects);
        }

        if normalize_guess(text) != self.current_answer {
            let username = self.players[index].username.clone();
            self.broadcast(
                &mut effects,
                ServerMessage::ReceiveMessage(ChatLine::incorrect_guess(username, text)),
            );
            return Ok(effects);
        }

        if self.correct_guessers.contains(&sender) {
            effects.send(
                sender,
                ServerMessage::ReceiveMessage(ChatLine::system(REPEAT_GUESS_NOTICE)),
            );
            return Ok(effects);
        }

        let time_remaining = self.current_time;
        let points = ScoringEngine::guess_points(time_remaining);
        let quick = ScoringEngine::is_quick_guess(time_remaining, self.round_time);

        let player = &mut self.players[index];
        player.score += points;
        player.correct_guesses += 1;
        if quick {
            player.quick_guesses += 1;
        }
        let username = player.username.clone();
        self.correct_guessers.insert(sender);

        debug!(
            "Room {}: {} guessed correctly for {} points",
            self.id, username, points
        );
        self.broadcast(
            &mut effects,
            ServerMessage::CorrectGuess(CorrectGuess {
                username,
                score: points,
                time_remaining,
            }),
        );
        self.broadcast_players(&mut effects);

        if self.all_guessers_correct() {
            effects.merge(self.next_round());
        }
        Ok(effects)
    }
}
