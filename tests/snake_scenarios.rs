//! Snake played through the polling interface only.

use brick_game::core::{Engine, MemoryStore};
use brick_game::snake::{Direction, Point, SnakeGame, SnakeState};
use brick_game::types::{UserAction, CELL_FILLED, CELL_FOOD};

fn new_game() -> SnakeGame {
    SnakeGame::with_store(MemoryStore::new())
}

/// Poll until `done` holds, failing after `limit` polls.
fn poll_until(game: &mut SnakeGame, limit: usize, done: impl Fn(&SnakeGame) -> bool) {
    for _ in 0..limit {
        if done(game) {
            return;
        }
        game.advance_and_snapshot();
    }
    assert!(done(game), "condition not reached in {limit} polls");
}

#[test]
fn test_first_snapshot_shows_body_and_food() {
    let mut game = new_game();
    let info = game.advance_and_snapshot();

    assert_eq!(game.state(), SnakeState::Input);
    for x in 2..=5 {
        assert_eq!(info.field[10][x], CELL_FILLED);
    }
    assert_eq!(info.field[5][5], CELL_FOOD);
    assert_eq!(info.next, [[0; 4]; 4]);
    assert_eq!((info.score, info.level, info.speed_ms), (0, 1, 32));
}

#[test]
fn test_idle_stream_visits_start_input_drop() {
    let mut game = new_game();
    let mut states = vec![game.state()];
    for _ in 0..3 {
        game.advance_and_snapshot();
        states.push(game.state());
    }
    assert_eq!(
        states,
        vec![
            SnakeState::Start,
            SnakeState::Input,
            SnakeState::Drop,
            SnakeState::Drop
        ]
    );
}

#[test]
fn test_turn_up_and_eat() {
    let mut game = new_game();
    game.advance_and_snapshot();
    game.submit_input(UserAction::Left, false);

    poll_until(&mut game, 200, |g| g.score() == 1);

    assert_eq!(game.direction(), Direction::Up);
    assert_eq!(game.snake().head(), Point::new(5, 5));
    assert_eq!(game.snake().len(), 5);
    assert_eq!(game.high_score(), 1);
    assert_eq!(game.food(), Point::new(4, 0));
}

#[test]
fn test_wall_ends_game_once() {
    let mut game = new_game();
    poll_until(&mut game, 200, |g| g.is_game_over());

    assert_eq!(game.snake().head(), Point::new(9, 10));
    assert!(game.take_terminate_once());
    assert!(!game.take_terminate_once());
    assert!(game.advance_and_snapshot().game_over);
}

#[test]
fn test_start_after_game_over_restarts() {
    let mut game = new_game();
    poll_until(&mut game, 200, |g| g.is_game_over());

    game.submit_input(UserAction::Start, false);
    game.advance_and_snapshot();
    assert_eq!(game.state(), SnakeState::Start);
    let info = game.advance_and_snapshot();
    assert!(!info.game_over);
    assert_eq!(game.snake().head(), Point::new(5, 10));
    assert_eq!(game.direction(), Direction::Right);
}

#[test]
fn test_terminate_request() {
    let mut game = new_game();
    game.advance_and_snapshot();
    game.submit_input(UserAction::Terminate, false);
    assert!(game.take_terminate_once(), "pending request reads true");

    poll_until(&mut game, 10, |g| g.is_game_over());
    assert!(!game.take_terminate_once());
}

#[test]
fn test_pause_freezes_movement() {
    let mut game = new_game();
    game.advance_and_snapshot();
    game.submit_input(UserAction::Pause, false);
    let info = game.advance_and_snapshot();
    assert!(info.paused);
    assert_eq!(game.state(), SnakeState::Paused);

    let head = game.snake().head();
    for _ in 0..50 {
        game.advance_and_snapshot();
    }
    assert_eq!(game.snake().head(), head);

    game.submit_input(UserAction::Pause, false);
    game.advance_and_snapshot();
    assert_eq!(game.state(), SnakeState::Input);
}

#[test]
fn test_holding_action_speeds_up() {
    let mut game = new_game();
    game.advance_and_snapshot();
    game.submit_input(UserAction::Action, true);
    let info = game.advance_and_snapshot();
    assert_eq!(info.speed_ms, 21);
    assert!(game.is_accelerating());

    game.submit_input(UserAction::Action, false);
    assert!(!game.is_accelerating());
    assert_eq!(game.advance_and_snapshot().speed_ms, 32);
}
