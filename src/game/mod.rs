//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or
//! rendering dependencies: the cell grid, the fixed-rate timer, the snake
//! and food entities, and the loop that ties them together tick by tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod entity;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use action::{Direction, HeadingIntent};
pub use config::GameConfig;
pub use engine::{Fade, GameLoop, PollResult, StepInfo, StepResult, Tile};
pub use entity::GridEntity;
pub use food::Food;
pub use grid::{CellState, Grid};
pub use session::Session;
pub use snake::{Advance, Snake, SnakeState};
pub use state::{Bounds, CollisionType, GameStatus, Position};
pub use timer::Timer;
