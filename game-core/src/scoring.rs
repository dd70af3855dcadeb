use game_types::{LeaderboardEntry, Player};

/// Points every correct guess earns before the time bonus
pub const BASE_GUESS_POINTS: u32 = 10;
/// A correct guess within this many seconds of the round start counts as quick
pub const QUICK_GUESS_WINDOW_SECS: u32 = 30;

const BASE_IQ: f64 = 90.0;
const MAX_IQ: f64 = 150.0;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Award for a correct guess: one bonus point per full ten seconds left on the clock
    pub fn guess_points(seconds_remaining: u32) -> u32 {
        BASE_GUESS_POINTS + seconds_remaining / 10
    }

    /// True when `current_time > round_time - 30`
    pub fn is_quick_guess(seconds_remaining: u32, round_time: u32) -> bool {
        seconds_remaining + QUICK_GUESS_WINDOW_SECS > round_time
    }

    /// End-of-game rating. Each statistic is normalized per round so games with
    /// different round counts stay comparable.
    pub fn calculate_iq(score: u32, rounds: u32, correct_guesses: u32, quick_guesses: u32) -> u32 {
        let rounds = f64::from(rounds.max(1));
        let score_bonus = f64::from(score) / rounds * 10.0;
        let accuracy_bonus = f64::from(correct_guesses) / rounds * 15.0;
        let speed_bonus = f64::from(quick_guesses) / rounds * 5.0;

        (BASE_IQ + score_bonus + accuracy_bonus + speed_bonus)
            .min(MAX_IQ)
            .floor() as u32
    }

    /// Final standings, highest score first. Ties keep join order.
    pub fn leaderboard(players: &[Player], rounds: u32) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = players
            .iter()
            .map(|player| LeaderboardEntry {
                iq: Self::calculate_iq(
                    player.score,
                    rounds,
                    player.correct_guesses,
                    player.quick_guesses,
                ),
                player: player.clone(),
            })
            .collect();

        entries.sort_by(|a, b| b.player.score.cmp(&a.player.score));
        entries
    }
}
