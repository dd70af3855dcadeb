use crate::{Effects, GameError, QuestionBank, Room, ScoringEngine, validate_settings};
use game_types::{
    ConnectionId, GameState, GameSummary, Player, QuestionHint, RoundReveal, RoundStart,
    ServerMessage, StartGameRequest, TurnPrompt,
};
use rand::Rng;
use tracing::{debug, info};

impl Room {
    /// Reset the room for a new game and start its first round. The caller has
    /// already checked that the requester created the room.
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        settings: impl Into<StartGameRequest>,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Effects, GameError> {
        if self.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let settings = validate_settings(&settings.into())?;

        for player in &mut self.players {
            player.reset_for_new_game();
        }
        self.current_round = 0;
        self.round_time = settings.draw_time;
        self.rounds = settings.rounds;
        self.max_players = settings.players;

        info!(
            "Room {} starting game: {} rounds of {}s",
            self.id, self.rounds, self.round_time
        );
        Ok(self.start_round(bank, rng))
    }

    /// Rotate the drawer, deal a question and arm the countdown
    pub fn start_round<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, rng: &mut R) -> Effects {
        let mut effects = Effects::new();
        if let Some(cancel) = self.clear_timer() {
            effects.set_timer(cancel);
        }
        if self.players.is_empty() {
            return effects;
        }

        self.drawings.clear();
        self.broadcast(&mut effects, ServerMessage::ClearCanvas);

        self.current_round += 1;
        let drawer_index = match self.drawer_index {
            Some(index) => (index + 1) % self.players.len(),
            None => 0,
        };
        self.drawer_index = Some(drawer_index);
        for (index, player) in self.players.iter_mut().enumerate() {
            player.is_drawing = index == drawer_index;
        }
        let drawer = &mut self.players[drawer_index];
        drawer.rounds_drawn += 1;
        let drawer_id = drawer.id;
        let drawer_name = drawer.username.clone();

        let question = bank.draw(rng);
        self.current_question = question.question.clone();
        self.current_answer = question.answer.to_lowercase();
        self.current_category = question.category.clone();
        self.correct_guessers.clear();

        effects.send(
            drawer_id,
            ServerMessage::YourTurn(TurnPrompt {
                question: self.current_question.clone(),
                answer: self.current_answer.clone(),
                category: self.current_category.clone(),
            }),
        );
        self.broadcast_except(
            &mut effects,
            drawer_id,
            ServerMessage::QuestionHint(QuestionHint {
                question: self.current_question.clone(),
                category: self.current_category.clone(),
            }),
        );

        self.current_time = self.round_time;
        let countdown = self.schedule_countdown();
        effects.set_timer(countdown);
        self.game_state = GameState::Playing;

        info!(
            "Room {} round {}/{}: {} is drawing",
            self.id, self.current_round, self.rounds, drawer_name
        );
        self.broadcast(
            &mut effects,
            ServerMessage::GameStarted(RoundStart {
                drawer: drawer_name,
                time: self.round_time,
                current_round: self.current_round,
                total_rounds: self.rounds,
            }),
        );
        self.broadcast_players(&mut effects);
        effects
    }

    /// One second of the countdown identified by `epoch`. `None` when that
    /// countdown is no longer the room's live timer.
    pub fn tick(&mut self, epoch: u64) -> Option<Effects> {
        if !self.is_countdown_live(epoch) || self.game_state != GameState::Playing {
            return None;
        }

        self.current_time = self.current_time.saturating_sub(1);
        let mut effects = Effects::new();
        self.broadcast(&mut effects, ServerMessage::UpdateTimer(self.current_time));

        if self.current_time == 0 {
            debug!("Room {} round {} timed out", self.id, self.current_round);
            effects.merge(self.next_round());
        }
        Some(effects)
    }

    /// Close the current round: reveal the answer, then either end the game or
    /// schedule the next round.
    pub fn next_round(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.game_state = GameState::Waiting;
        if let Some(cancel) = self.cancel_countdown() {
            effects.set_timer(cancel);
        }
        for player in &mut self.players {
            player.is_drawing = false;
        }

        self.broadcast(
            &mut effects,
            ServerMessage::RoundEnded(RoundReveal {
                answer: self.current_answer.clone(),
                category: self.current_category.clone(),
            }),
        );

        if self.current_round >= self.rounds {
            let leaderboard = ScoringEngine::leaderboard(&self.players, self.rounds);
            if let Some(winner) = leaderboard.first().cloned() {
                info!(
                    "Room {} game over, {} wins with {} points",
                    self.id, winner.player.username, winner.player.score
                );
                self.broadcast(
                    &mut effects,
                    ServerMessage::GameEnded(GameSummary {
                        winner,
                        leaderboard,
                    }),
                );
            }
            self.current_round = 0;
            self.drawings.clear();
        } else {
            let next = self.schedule_next_round();
            effects.set_timer(next);
        }
        effects
    }

    /// Start the round an intermission scheduled. `None` when the intermission
    /// identified by `epoch` was superseded.
    pub fn begin_scheduled_round<R: Rng + ?Sized>(
        &mut self,
        epoch: u64,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Option<Effects> {
        if !self.is_intermission(epoch) || self.players.is_empty() {
            return None;
        }
        Some(self.start_round(bank, rng))
    }

    /// Remove a player and repair the round around the gap. Returns the removed
    /// player, or `None` if they were not seated here.
    pub fn depart(&mut self, id: ConnectionId) -> Option<(Player, Effects)> {
        let index = self.position_of(id)?;
        let mut effects = Effects::new();
        if let Some(cancel) = self.cancel_countdown() {
            effects.set_timer(cancel);
        }

        let player = self.players.remove(index);
        self.correct_guessers.remove(&id);
        self.drawer_index = match self.drawer_index {
            Some(drawer) if index < drawer => Some(drawer - 1),
            Some(drawer) if index == drawer => drawer.checked_sub(1),
            other => other,
        };

        self.broadcast(&mut effects, ServerMessage::UserLeft(player.username.clone()));
        if self.players.is_empty() {
            return Some((player, effects));
        }

        if self.game_state == GameState::Playing {
            if player.is_drawing {
                info!("Room {} lost its drawer {}, ending round", self.id, player.username);
                effects.merge(self.next_round());
            } else if self.all_guessers_correct() {
                effects.merge(self.next_round());
            } else {
                let countdown = self.schedule_countdown();
                effects.set_timer(countdown);
            }
        }

        self.broadcast_players(&mut effects);
        Some((player, effects))
    }
}
