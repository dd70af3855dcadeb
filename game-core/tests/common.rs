#![allow(dead_code)]

use game_core::{Effects, Question, QuestionBank, Room, RoomDefaults, TimerCommand};
use game_types::{ConnectionId, GameSettings, Player, ServerMessage};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const TEST_ANSWER: &str = "stack";

/// Single-question bank so every round deals the same prompt
pub fn test_bank() -> QuestionBank {
    QuestionBank::new(vec![Question::new(
        "Which data structure follows LIFO principle?",
        "Stack",
        "Data Structures",
    )])
    .unwrap()
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}

pub fn settings(players: u32, draw_time: u32, rounds: u32) -> GameSettings {
    GameSettings {
        players,
        draw_time,
        rounds,
    }
}

/// A waiting room seating `names` in order, with room for ten
pub fn room_with_players(names: &[&str]) -> (Room, Vec<ConnectionId>) {
    let ids: Vec<ConnectionId> = names.iter().map(|_| ConnectionId::new()).collect();
    let mut room = Room::new(
        "TEST01".to_string(),
        Player::new(ids[0], names[0]),
        RoomDefaults {
            max_players: 10,
            ..RoomDefaults::default()
        },
    );
    for (id, name) in ids.iter().zip(names).skip(1) {
        room.add_player(Player::new(*id, *name)).unwrap();
    }
    (room, ids)
}

pub fn countdown_epoch(effects: &Effects) -> u64 {
    match effects.timer {
        Some(TimerCommand::StartCountdown { epoch }) => epoch,
        other => panic!("expected a countdown, got {other:?}"),
    }
}

pub fn intermission_epoch(effects: &Effects) -> u64 {
    match effects.timer {
        Some(TimerCommand::ScheduleNextRound { epoch }) => epoch,
        other => panic!("expected an intermission, got {other:?}"),
    }
}

/// Run the countdown until it stops, collecting every tick's effects
pub fn run_countdown(room: &mut Room, epoch: u64) -> Effects {
    let mut collected = Effects::new();
    while let Some(effects) = room.tick(epoch) {
        collected.merge(effects);
    }
    collected
}

pub fn received(effects: &Effects, id: ConnectionId, check: impl Fn(&ServerMessage) -> bool) -> bool {
    effects.messages_for(id).into_iter().any(check)
}

pub fn drawing_count(room: &Room) -> usize {
    room.players().iter().filter(|p| p.is_drawing).count()
}
