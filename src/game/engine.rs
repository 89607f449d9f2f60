use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::{GameError, GridError};

use super::{
    action::{Direction, HeadingIntent},
    config::GameConfig,
    entity::GridEntity,
    food::Food,
    grid::{CellState, Grid},
    session::Session,
    snake::{Advance, Snake},
    state::{CollisionType, GameStatus, Position},
    timer::Timer,
};

/// Information about a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game has ended, now or earlier
    pub terminated: bool,
    /// Game status after the step
    pub status: GameStatus,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Summary of the ticks run by one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollResult {
    /// Ticks the timer produced
    pub ticks: u64,
    /// Steps actually simulated; fewer than `ticks` if the game ended
    pub steps: u64,
    /// Food eaten during these steps
    pub food_eaten: u32,
}

/// Fade animation attached to a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fade {
    /// Food appearing; 1 at placement, 0 once fully shown
    Birth(f32),
    /// Eaten food disappearing; 1 when eaten, 0 once gone
    Death(f32),
}

/// Per-cell view handed to renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub position: Position,
    pub state: CellState,
    pub fade: Option<Fade>,
}

/// Orchestrates one game: owns the session, the snake and the food, and
/// advances them one tick at a time.
pub struct GameLoop<R = ThreadRng> {
    config: GameConfig,
    session: Session,
    snake: Snake,
    food: Food,
    rng: R,
    intent: HeadingIntent,
    score: u32,
    steps: u64,
    status: GameStatus,
}

impl GameLoop<ThreadRng> {
    /// Start a new game using the thread-local RNG
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameLoop<R> {
    /// Start a new game with an explicit RNG, e.g. a seeded one for tests
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let (session, snake, food) = Self::build(&config, &mut rng)?;

        let mut game = Self {
            config,
            session,
            snake,
            food,
            rng,
            intent: HeadingIntent::new(),
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        };
        game.check_board_full();

        info!(
            "Starting {}x{} game at {} ticks/s",
            game.config.cols, game.config.rows, game.config.tick_rate_hz
        );
        Ok(game)
    }

    fn build(config: &GameConfig, rng: &mut R) -> Result<(Session, Snake, Food), GameError> {
        let mut session = Session::new(config)?;

        let mut snake = Snake::spawn(&session.grid, config.initial_snake_length);
        snake.project(&mut session.grid)?;

        let mut food = Food::spawn(config, &session.grid, rng);
        food.project(&mut session.grid)?;

        Ok((session, snake, food))
    }

    fn check_board_full(&mut self) {
        if self.status.is_running() && self.food.position().is_none() {
            self.status = GameStatus::Won;
            info!("Board full after {} steps, score {}", self.steps, self.score);
        }
    }

    /// Throw away every component and start over with the same config
    pub fn restart(&mut self) -> Result<(), GameError> {
        let (session, snake, food) = Self::build(&self.config, &mut self.rng)?;
        self.session = session;
        self.snake = snake;
        self.food = food;
        self.intent.clear();
        self.score = 0;
        self.steps = 0;
        self.status = GameStatus::Running;
        self.check_board_full();

        info!("Restarted {}x{} game", self.config.cols, self.config.rows);
        Ok(())
    }

    /// Record a heading request from the input layer. Only the latest
    /// request before a tick is applied.
    pub fn request_heading(&mut self, direction: Direction) {
        self.intent.request(direction);
    }

    /// Execute one tick of the game
    pub fn step(&mut self) -> Result<StepResult, GridError> {
        if self.status.is_terminal() {
            return Ok(self.result(StepInfo::default()));
        }

        self.steps += 1;

        if let Some(direction) = self.intent.take() {
            self.snake.set_heading(direction);
        }

        // Growing before the move keeps the tail in place this tick
        let ate_food = self.food.position() == Some(self.snake.peek_head());
        if ate_food {
            self.snake.grow(1);
        }

        match self.snake.advance() {
            Advance::Moved { .. } => {}
            Advance::Died(cause) => {
                self.status = GameStatus::Lost(cause);
                info!(
                    "Game over ({:?}) after {} steps, score {}",
                    cause, self.steps, self.score
                );
                return Ok(self.result(StepInfo {
                    ate_food: false,
                    collision_type: Some(cause),
                }));
            }
            Advance::Rejected => return Ok(self.result(StepInfo::default())),
        }

        if ate_food {
            self.score += 1;
            self.food.consume();
            // The grid still holds last tick's projection, in which every
            // cell the snake now covers is already tagged snake or food
            let next = self.food.reset(&self.session.grid, &mut self.rng);
            debug!("Food eaten at {:?}, respawned at {:?}", self.snake.head(), next);
            self.check_board_full();
        }

        let entities: [&mut dyn GridEntity; 2] = [&mut self.snake, &mut self.food];
        for entity in entities {
            entity.update();
            entity.project(&mut self.session.grid)?;
        }

        Ok(self.result(StepInfo {
            ate_food,
            collision_type: None,
        }))
    }

    fn result(&self, info: StepInfo) -> StepResult {
        StepResult {
            terminated: self.status.is_terminal(),
            status: self.status,
            info,
        }
    }

    /// Poll the wall clock and run one step per elapsed tick, in order
    pub fn poll(&mut self, now: Instant) -> Result<PollResult, GridError> {
        let ticks = self.session.timer.update_at(now);
        self.run_ticks(ticks)
    }

    /// Feed an explicit amount of elapsed time and run the resulting steps
    pub fn advance_time(&mut self, elapsed: Duration) -> Result<PollResult, GridError> {
        let ticks = self.session.timer.advance(elapsed);
        self.run_ticks(ticks)
    }

    fn run_ticks(&mut self, ticks: u64) -> Result<PollResult, GridError> {
        let mut poll = PollResult {
            ticks,
            ..Default::default()
        };

        for _ in 0..ticks {
            if self.status.is_terminal() {
                break;
            }
            let result = self.step()?;
            poll.steps += 1;
            if result.info.ate_food {
                poll.food_eaten += 1;
            }
        }

        Ok(poll)
    }

    /// Forget the timer's wall-clock baseline, e.g. when resuming from a
    /// pause, so the paused time is not replayed as ticks
    pub fn rebase_clock(&mut self) {
        self.session.timer.rebase();
    }

    /// Every cell of the board with its state and fade, row by row
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let birth = self.food.birth_progress();
        let fading = self.food.fading();

        self.session.grid.iter().map(move |(position, state)| {
            let fade = match (state, fading) {
                (CellState::Food, _) => Some(Fade::Birth(birth)),
                (_, Some((cell, death))) if cell == position => Some(Fade::Death(death)),
                _ => None,
            };
            Tile {
                position,
                state,
                fade,
            }
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.session.grid
    }

    pub fn timer(&self) -> &Timer {
        &self.session.timer
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn pending_heading(&self) -> Option<Direction> {
        self.intent.peek()
    }
}
