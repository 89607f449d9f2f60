use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Board length along the viewport's longer side
pub const DIM_LONG: usize = 28;
/// Board length along the viewport's shorter side
pub const DIM_SHORT: usize = 16;

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns on the board
    pub cols: usize,
    /// Number of rows on the board
    pub rows: usize,
    /// Simulation ticks per second, independent of the render rate
    pub tick_rate_hz: f64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Amount the food birth fade loses per tick
    pub food_birth_step: f32,
    /// Amount the eaten-food death fade loses per tick
    pub food_death_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DIM_LONG,
            rows: DIM_SHORT,
            tick_rate_hz: 12.0,
            initial_snake_length: 3,
            food_birth_step: 0.025,
            food_death_step: 0.05,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Pick the board orientation from the viewport shape: portrait
    /// viewports get a tall board, everything else a wide one.
    pub fn for_viewport(width: u16, height: u16) -> Self {
        if width < height {
            Self::new(DIM_SHORT, DIM_LONG)
        } else {
            Self::new(DIM_LONG, DIM_SHORT)
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Duration of one simulation tick. Fails for rates whose interval is
    /// zero or too long to represent.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        match Duration::try_from_secs_f64(1.0 / self.tick_rate_hz) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => Err(ConfigError::TickIntervalOutOfRange(self.tick_rate_hz)),
        }
    }

    /// Longest snake that fits on the centre row when spawned facing right
    pub fn max_initial_length(&self) -> usize {
        self.cols / 2 + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroDimension {
                cols: self.cols,
                rows: self.rows,
            });
        }

        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        // The interval must also fit a Duration
        self.tick_interval()?;

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        if self.initial_snake_length > self.max_initial_length() {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                cols: self.cols,
                max: self.max_initial_length(),
            });
        }

        for (name, value) in [
            ("food_birth_step", self.food_birth_step),
            ("food_death_step", self.food_death_step),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidFadeStep { name, value });
            }
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file. Missing fields
    /// fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }
}
