use crate::error::ConfigError;

use super::config::GameConfig;
use super::grid::Grid;
use super::timer::Timer;

/// Per-session resources shared by every entity: the board and the clock.
///
/// Built once when a game starts and dropped on exit or restart. Entities
/// are constructed from a reference to the session's grid rather than from
/// any global state.
#[derive(Debug, Clone)]
pub struct Session {
    pub grid: Grid,
    pub timer: Timer,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::new(config.cols, config.rows),
            timer: Timer::new(config.tick_interval()?),
        })
    }
}
