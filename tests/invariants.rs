use std::collections::HashSet;
use std::time::Duration;

use grid_snake::game::{
    CellState, Direction, GameConfig, GameLoop, GameStatus, Grid, Position, Snake,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn cells_tagged(grid: &Grid, state: CellState) -> HashSet<Position> {
    grid.iter()
        .filter(|(_, s)| *s == state)
        .map(|(pos, _)| pos)
        .collect()
}

fn assert_projection_consistent<R: Rng>(game: &GameLoop<R>) {
    let body: HashSet<Position> = game.snake().body().iter().copied().collect();
    assert_eq!(body.len(), game.snake().len(), "snake overlaps itself");
    assert_eq!(cells_tagged(game.grid(), CellState::Snake), body);

    let food = cells_tagged(game.grid(), CellState::Food);
    match game.food().position() {
        Some(pos) => {
            assert_eq!(food, HashSet::from([pos]));
            assert!(!body.contains(&pos));
        }
        None => assert!(food.is_empty()),
    }

    for segment in &body {
        assert!(game.grid().contains(*segment));
    }
}

/// Steer towards the food, avoiding immediate death where possible
fn greedy_heading(snake: &Snake, food: Option<Position>, grid: &Grid) -> Option<Direction> {
    let head = snake.head();
    let safe = |dir: Direction| {
        let next = head.moved_in_direction(dir);
        grid.contains(next) && (!snake.contains(next) || next == snake.tail())
    };

    let target = food?;
    let mut preferred = Vec::new();
    if target.col < head.col {
        preferred.push(Direction::Left);
    }
    if target.col > head.col {
        preferred.push(Direction::Right);
    }
    if target.row < head.row {
        preferred.push(Direction::Up);
    }
    if target.row > head.row {
        preferred.push(Direction::Down);
    }

    preferred
        .into_iter()
        .chain(DIRECTIONS)
        .find(|dir| safe(*dir))
}

#[test]
fn random_play_keeps_grid_consistent() {
    for seed in 0..20 {
        let mut game =
            GameLoop::with_rng(GameConfig::new(8, 6), StdRng::seed_from_u64(seed)).unwrap();
        let mut input_rng = StdRng::seed_from_u64(seed + 1000);

        assert_projection_consistent(&game);

        for _ in 0..300 {
            if input_rng.gen_bool(0.3) {
                game.request_heading(DIRECTIONS[input_rng.gen_range(0..4)]);
            }
            let result = game.step().unwrap();
            assert_projection_consistent(&game);

            if result.terminated {
                break;
            }
        }
    }
}

#[test]
fn greedy_play_grows_and_keeps_invariants() {
    let mut game = GameLoop::with_rng(GameConfig::new(10, 10), StdRng::seed_from_u64(3)).unwrap();
    let mut previous_len = game.snake().len();

    for _ in 0..2000 {
        if let Some(dir) = greedy_heading(game.snake(), game.food().position(), game.grid()) {
            game.request_heading(dir);
        }

        let food_before = game.food().position();
        let result = game.step().unwrap();
        assert_projection_consistent(&game);

        if result.info.ate_food {
            assert_eq!(game.snake().len(), previous_len + 1);
            assert_eq!(Some(game.snake().head()), food_before);
            assert_ne!(game.food().position(), food_before);
        } else if !result.terminated {
            assert_eq!(game.snake().len(), previous_len);
        }
        previous_len = game.snake().len();

        if result.terminated {
            break;
        }
    }

    assert!(game.score() > 0);
    assert_eq!(game.score() as usize, game.snake().len() - 3);
}

#[test]
fn filling_the_board_is_a_win() {
    // A single row: the snake eats its way to the right edge
    let config = GameConfig {
        initial_snake_length: 1,
        ..GameConfig::new(2, 1)
    };
    let mut game = GameLoop::with_rng(config, StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(game.snake().head(), Position::new(1, 0));
    assert_eq!(game.food().position(), Some(Position::new(0, 0)));

    game.request_heading(Direction::Left);
    let result = game.step().unwrap();

    assert_eq!(result.status, GameStatus::Won);
    assert_eq!(game.grid().count(CellState::Snake), 2);
    assert_eq!(game.grid().count(CellState::Empty), 0);

    // Terminal: further steps change nothing
    let again = game.step().unwrap();
    assert!(again.terminated);
    assert_eq!(game.snake().len(), 2);
}

#[test]
fn irregular_polling_runs_every_tick_in_order() {
    let config = GameConfig {
        tick_rate_hz: 12.0,
        ..GameConfig::new(200, 3)
    };
    let mut game = GameLoop::with_rng(config, StdRng::seed_from_u64(5)).unwrap();
    let start_col = game.snake().head().col;

    let mut total_steps = 0;
    let deltas = [1u64, 7, 30, 2, 90, 5, 160, 3, 40];
    for _ in 0..20 {
        for ms in deltas {
            total_steps += game.advance_time(Duration::from_millis(ms)).unwrap().steps;
        }
    }

    // 20 * 338ms = 6.76s at 12 Hz
    assert_eq!(total_steps, 81);
    assert_eq!(game.timer().tick(), 81);
    if game.status().is_running() {
        assert_eq!(game.snake().head().col, start_col + 81);
    }
}
