use anyhow::{Context, Result, ensure};
use game_core::RoomDefaults;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Pause between a round ending and the next one starting
    pub round_intermission_seconds: u64,
    pub default_round_time: u32,
    pub default_rounds: u32,
    pub default_max_players: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source; unset variables take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            round_intermission_seconds: parse_var(
                &lookup,
                "ROUND_INTERMISSION_SECONDS",
                defaults.round_intermission_seconds,
            )?,
            default_round_time: parse_var(&lookup, "DEFAULT_ROUND_TIME", defaults.default_round_time)?,
            default_rounds: parse_var(&lookup, "DEFAULT_ROUNDS", defaults.default_rounds)?,
            default_max_players: parse_var(
                &lookup,
                "DEFAULT_MAX_PLAYERS",
                defaults.default_max_players,
            )?,
        };

        ensure!(config.default_round_time > 0, "DEFAULT_ROUND_TIME must be positive");
        ensure!(config.default_rounds > 0, "DEFAULT_ROUNDS must be positive");
        ensure!(config.default_max_players > 0, "DEFAULT_MAX_PLAYERS must be positive");
        Ok(config)
    }

    pub fn room_defaults(&self) -> RoomDefaults {
        RoomDefaults {
            round_time: self.default_round_time,
            rounds: self.default_rounds,
            max_players: self.default_max_players,
        }
    }

    pub fn intermission(&self) -> Duration {
        Duration::from_secs(self.round_intermission_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        let room = RoomDefaults::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            round_intermission_seconds: 5,
            default_round_time: room.round_time,
            default_rounds: room.rounds,
            default_max_players: room.max_players,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.intermission(), Duration::from_secs(5));
        assert_eq!(config.room_defaults(), RoomDefaults::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("ROUND_INTERMISSION_SECONDS", "2"),
            ("DEFAULT_MAX_PLAYERS", " 8 "),
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.intermission(), Duration::from_secs(2));
        assert_eq!(config.room_defaults().max_players, 8);
        assert_eq!(config.room_defaults().round_time, 120);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let error = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(error.to_string().contains("PORT"));

        assert!(Config::from_lookup(lookup_from(&[("DEFAULT_ROUND_TIME", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DEFAULT_ROUNDS", "-1")])).is_err());
    }
}
