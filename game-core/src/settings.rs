use game_types::{GameSettings, StartGameRequest};
use std::ops::RangeInclusive;

pub const PLAYER_LIMITS: RangeInclusive<u32> = 2..=10;
/// Seconds per round
pub const DRAW_TIME_LIMITS: RangeInclusive<u32> = 30..=300;
pub const ROUND_LIMITS: RangeInclusive<u32> = 1..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Players must be between 2 and 10")]
    Players,
    #[error("Draw time must be between 30 seconds and 5 minutes")]
    DrawTime,
    #[error("Rounds must be between 1 and 10")]
    Rounds,
}

/// A whole number inside `limits`
fn whole_within(value: f64, limits: &RangeInclusive<u32>) -> Option<u32> {
    let bounds = f64::from(*limits.start())..=f64::from(*limits.end());
    if value.fract() != 0.0 || !bounds.contains(&value) {
        return None;
    }
    Some(value as u32)
}

/// Single authority for game settings; checks run in the order the client form lists them
pub fn validate_settings(request: &StartGameRequest) -> Result<GameSettings, SettingsError> {
    let players = whole_within(request.players, &PLAYER_LIMITS).ok_or(SettingsError::Players)?;
    let draw_time =
        whole_within(request.draw_time, &DRAW_TIME_LIMITS).ok_or(SettingsError::DrawTime)?;
    let rounds = whole_within(request.rounds, &ROUND_LIMITS).ok_or(SettingsError::Rounds)?;
    Ok(GameSettings {
        players,
        draw_time,
        rounds,
    })
}
