mod common;

use common::*;
use game_core::{GameError, RoomRegistry, RoundTimer, ScoringEngine, TimerCommand};
use game_types::{ConnectionId, GameState, ServerMessage};

#[test]
fn test_start_game_resets_round_for_every_valid_setting() {
    for players in [2, 5, 10] {
        for draw_time in [30, 120, 300] {
            for rounds in [1, 4, 10] {
                let (mut room, _) = room_with_players(&["Alice", "Bob"]);
                let mut rng = seeded_rng();
                room.start_game(settings(players, draw_time, rounds), &test_bank(), &mut rng)
                    .unwrap();

                // Reset to zero, then the first round counted
                assert_eq!(room.current_round(), 1);
                assert_eq!(drawing_count(&room), 1);
                assert_eq!(room.game_state(), GameState::Playing);
                assert_eq!(room.current_time(), draw_time);
                assert_eq!(room.rounds(), rounds);
            }
        }
    }
}

#[test]
fn test_restart_mid_game_clears_progress() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let mut rng = seeded_rng();
    room.start_game(settings(3, 60, 5), &test_bank(), &mut rng).unwrap();
    room.submit_guess(ids[1], TEST_ANSWER).unwrap();
    assert!(room.player(ids[1]).unwrap().score > 0);

    room.start_game(settings(3, 60, 5), &test_bank(), &mut rng).unwrap();
    assert_eq!(room.current_round(), 1);
    assert_eq!(room.player(ids[1]).unwrap().score, 0);
    assert_eq!(room.player(ids[1]).unwrap().correct_guesses, 0);
    assert!(room.correct_guessers().is_empty());
    assert_eq!(drawing_count(&room), 1);
}

#[test]
fn test_drawer_rotation_is_round_robin() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let bank = test_bank();
    let mut rng = seeded_rng();
    room.start_game(settings(3, 60, 10), &bank, &mut rng).unwrap();

    let mut drawers = vec![room.drawer().unwrap().id];
    for _ in 0..6 {
        let epoch = intermission_epoch(&room.next_round());
        room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
        assert_eq!(drawing_count(&room), 1);
        drawers.push(room.drawer().unwrap().id);
    }

    let expected: Vec<ConnectionId> = (0..7).map(|i| ids[i % 3]).collect();
    assert_eq!(drawers, expected);
}

#[test]
fn test_rotation_continues_after_removing_current_drawer() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol", "Dave"]);
    let bank = test_bank();
    let mut rng = seeded_rng();
    room.start_game(settings(4, 60, 10), &bank, &mut rng).unwrap();
    let epoch = intermission_epoch(&room.next_round());
    room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[1]);

    // Bob leaves mid-turn; Carol was next in line and should draw next
    let (_, effects) = room.depart(ids[1]).unwrap();
    let epoch = intermission_epoch(&effects);
    room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[2]);

    let epoch = intermission_epoch(&room.next_round());
    room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[3]);

    let epoch = intermission_epoch(&room.next_round());
    room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[0]);
}

#[test]
fn test_rotation_wraps_when_last_player_was_drawing() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let bank = test_bank();
    let mut rng = seeded_rng();
    room.start_game(settings(3, 60, 10), &bank, &mut rng).unwrap();
    for _ in 0..2 {
        let epoch = intermission_epoch(&room.next_round());
        room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    }
    assert_eq!(room.drawer().unwrap().id, ids[2]);

    let (_, effects) = room.depart(ids[2]).unwrap();
    let epoch = intermission_epoch(&effects);
    room.begin_scheduled_round(epoch, &bank, &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[0]);
}

#[test]
fn test_guess_at_eighty_seconds_scores_eighteen() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let mut rng = seeded_rng();
    let effects = room.start_game(settings(3, 120, 3), &test_bank(), &mut rng).unwrap();
    let epoch = countdown_epoch(&effects);
    for _ in 0..40 {
        room.tick(epoch).unwrap();
    }
    assert_eq!(room.current_time(), 80);

    room.submit_guess(ids[1], "Stack").unwrap();
    let bob = room.player(ids[1]).unwrap();
    assert_eq!(bob.score, 18);
    assert_eq!(bob.correct_guesses, 1);
    assert!(!ScoringEngine::is_quick_guess(80, 120));
    assert_eq!(bob.quick_guesses, 0);
}

#[test]
fn test_cancel_path_twice_is_harmless() {
    let (mut room, _) = room_with_players(&["Alice", "Bob"]);
    let mut rng = seeded_rng();
    let effects = room.start_game(settings(2, 60, 3), &test_bank(), &mut rng).unwrap();
    let epoch = countdown_epoch(&effects);

    assert_eq!(room.cancel_countdown(), Some(TimerCommand::Cancel));
    assert_eq!(room.cancel_countdown(), None);
    assert_eq!(room.timer(), RoundTimer::Idle);
    assert!(room.tick(epoch).is_none());

    // Ending the round afterwards schedules one intermission and no countdown
    let effects = room.next_round();
    assert!(matches!(effects.timer, Some(TimerCommand::ScheduleNextRound { .. })));
    let effects = room.next_round();
    assert!(matches!(effects.timer, Some(TimerCommand::ScheduleNextRound { .. })));
    assert!(matches!(room.timer(), RoundTimer::Intermission { .. }));
}

#[test]
fn test_all_correct_ends_round_and_stops_timer() {
    let (mut room, ids) = room_with_players(&["Drew", "Ann", "Ben", "Cat"]);
    let mut rng = seeded_rng();
    let effects = room.start_game(settings(4, 120, 3), &test_bank(), &mut rng).unwrap();
    let epoch = countdown_epoch(&effects);
    room.tick(epoch).unwrap();

    room.submit_guess(ids[1], TEST_ANSWER).unwrap();
    room.submit_guess(ids[2], TEST_ANSWER).unwrap();
    assert_eq!(room.game_state(), GameState::Playing);

    let effects = room.submit_guess(ids[3], TEST_ANSWER).unwrap();
    assert_eq!(room.game_state(), GameState::Waiting);
    assert!(received(&effects, ids[0], |m| matches!(m, ServerMessage::RoundEnded(_))));
    assert!(matches!(effects.timer, Some(TimerCommand::ScheduleNextRound { .. })));

    // The old countdown is dead: no more update-timer for this round
    assert!(room.tick(epoch).is_none());
    assert_eq!(room.current_time(), 119);
}

#[test]
fn test_two_player_game_end_to_end() {
    let mut registry = RoomRegistry::default();
    let bank = test_bank();
    let mut rng = seeded_rng();
    let alice = ConnectionId::new();
    let bob = ConnectionId::new();

    let (room_id, _) = registry.create_room(alice, "Alice", &mut rng).unwrap();
    registry.join_room(&room_id, bob, "Bob").unwrap();
    let room = registry.get_mut(&room_id).unwrap();
    assert_eq!(room.len(), 2);

    // Round 1: Alice draws
    let effects = room.start_game(settings(2, 60, 2), &bank, &mut rng).unwrap();
    assert_eq!(room.drawer_index(), Some(0));
    assert_eq!(room.drawer().unwrap().id, alice);
    assert!(received(&effects, alice, |m| matches!(m, ServerMessage::YourTurn(_))));
    assert!(received(&effects, bob, |m| matches!(m, ServerMessage::QuestionHint(_))));

    let epoch = countdown_epoch(&effects);
    for _ in 0..5 {
        room.tick(epoch).unwrap();
    }
    assert_eq!(room.current_time(), 55);

    let effects = room.submit_guess(bob, TEST_ANSWER).unwrap();
    assert_eq!(room.player(bob).unwrap().score, 15);
    assert_eq!(room.game_state(), GameState::Waiting);
    let intermission = intermission_epoch(&effects);

    // Round 2: Bob draws and nobody guesses
    let effects = room
        .begin_scheduled_round(intermission, &bank, &mut rng)
        .unwrap();
    assert_eq!(room.drawer_index(), Some(1));
    assert_eq!(room.drawer().unwrap().id, bob);
    assert_eq!(room.current_round(), 2);

    let effects = run_countdown(room, countdown_epoch(&effects));
    let summary = effects
        .messages_for(alice)
        .into_iter()
        .find_map(|m| match m {
            ServerMessage::GameEnded(summary) => Some(summary.clone()),
            _ => None,
        })
        .expect("game-ended");

    assert_eq!(summary.winner.player.username, "Bob");
    let scores: Vec<u32> = summary.leaderboard.iter().map(|e| e.player.score).collect();
    assert_eq!(scores, vec![15, 0]);
    assert_eq!(summary.leaderboard[1].iq, 90);
    assert_eq!(room.current_round(), 0);
    assert_eq!(room.timer(), RoundTimer::Idle);
}

#[test]
fn test_drawer_departure_ends_round_immediately() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let mut rng = seeded_rng();
    room.start_game(settings(3, 60, 3), &test_bank(), &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[0]);

    let (player, effects) = room.depart(ids[0]).unwrap();
    assert_eq!(player.username, "Alice");
    assert_eq!(room.game_state(), GameState::Waiting);
    assert!(received(&effects, ids[1], |m| matches!(m, ServerMessage::UserLeft(name) if name == "Alice")));
    assert!(received(&effects, ids[1], |m| {
        matches!(m, ServerMessage::RoundEnded(reveal) if reveal.answer == TEST_ANSWER)
    }));
    assert!(!received(&effects, ids[0], |_| true));

    let epoch = intermission_epoch(&effects);
    room.begin_scheduled_round(epoch, &test_bank(), &mut rng).unwrap();
    assert_eq!(room.drawer().unwrap().id, ids[1]);
}

#[test]
fn test_last_outstanding_guesser_leaving_ends_round() {
    let (mut room, ids) = room_with_players(&["Alice", "Bob", "Carol"]);
    let mut rng = seeded_rng();
    room.start_game(settings(3, 60, 3), &test_bank(), &mut rng).unwrap();
    room.submit_guess(ids[1], TEST_ANSWER).unwrap();

    let (_, effects) = room.depart(ids[2]).unwrap();
    assert_eq!(room.game_state(), GameState::Waiting);
    assert!(matches!(effects.timer, Some(TimerCommand::ScheduleNextRound { .. })));
}

#[test]
fn test_room_deleted_exactly_when_empty() {
    let mut registry = RoomRegistry::default();
    let mut rng = seeded_rng();
    let ids: Vec<ConnectionId> = (0..3).map(|_| ConnectionId::new()).collect();
    let (room_id, _) = registry.create_room(ids[0], "Alice", &mut rng).unwrap();
    registry.join_room(&room_id, ids[1], "Bob").unwrap();
    registry.join_room(&room_id, ids[2], "Carol").unwrap();

    for (remaining, id) in ids.iter().enumerate().rev() {
        assert!(registry.contains(&room_id));
        let departure = registry.remove_player(&room_id, *id).unwrap();
        assert_eq!(departure.room_deleted, remaining == 0);
    }
    assert!(!registry.contains(&room_id));
    assert!(registry.is_empty());
}

#[test]
fn test_drawing_relay_only_from_drawer() {
    use game_types::{DrawingAction, FillPayload};

    let (mut room, ids) = room_with_players(&["Alice", "Bob"]);
    assert_eq!(
        room.relay_drawing(ids[0], DrawingAction::Clear).unwrap_err(),
        GameError::GameNotActive
    );

    let mut rng = seeded_rng();
    room.start_game(settings(2, 60, 3), &test_bank(), &mut rng).unwrap();
    assert_eq!(
        room.relay_drawing(ids[1], DrawingAction::Undo).unwrap_err(),
        GameError::NotDrawing
    );

    let fill = FillPayload {
        color: "#00ff00".to_string(),
    };
    let effects = room
        .relay_drawing(ids[0], DrawingAction::Fill(fill.clone()))
        .unwrap();
    assert_eq!(effects.messages_for(ids[1]), vec![&ServerMessage::FillCanvas(fill)]);
    assert!(effects.messages_for(ids[0]).is_empty());
    assert_eq!(room.drawings().len(), 1);

    room.relay_drawing(ids[0], DrawingAction::Undo).unwrap();
    assert!(room.drawings().is_empty());
}
