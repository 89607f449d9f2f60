use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::GridError;

use super::config::GameConfig;
use super::entity::GridEntity;
use super::grid::{CellState, Grid};
use super::state::Position;

/// The single piece of food on the board.
///
/// Besides its coordinate, food carries two fade scalars for renderers:
/// `birth` runs from 1 down to 0 after each placement, and `death` runs
/// from 1 down to 0 on the cell where the previous food was eaten. The
/// birth fade holds at 1 through the tick the food is placed on.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Option<Position>,
    birth: f32,
    death: f32,
    birth_step: f32,
    death_step: f32,
    eaten_at: Option<Position>,
    just_placed: bool,
}

impl Food {
    /// Create food with no position yet; call [`Food::reset`] to place it
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: None,
            birth: 1.0,
            death: 0.0,
            birth_step: config.food_birth_step,
            death_step: config.food_death_step,
            eaten_at: None,
            just_placed: false,
        }
    }

    /// Create food and place it on a random empty cell of `grid`
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, grid: &Grid, rng: &mut R) -> Self {
        let mut food = Self::new(config);
        food.reset(grid, rng);
        food
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Fade-in progress of the current food, 1 at placement and 0 when
    /// fully shown
    pub fn birth_progress(&self) -> f32 {
        self.birth
    }

    /// Cell of the last eaten food while its fade-out is still running
    pub fn fading(&self) -> Option<(Position, f32)> {
        match self.eaten_at {
            Some(pos) if self.death > 0.0 => Some((pos, self.death)),
            _ => None,
        }
    }

    /// Move the food to a cell picked uniformly from the grid's empty
    /// cells. Returns `None`, leaving the food unplaced, when the board has
    /// no empty cell left.
    pub fn reset<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        self.position = grid.empty_cells().choose(rng);
        if self.position.is_some() {
            self.birth = 1.0;
            self.just_placed = true;
        }
        self.position
    }

    /// Mark the current food as eaten and start its fade-out. The caller
    /// places the next food with [`Food::reset`].
    pub fn consume(&mut self) {
        self.eaten_at = self.position.take();
        self.death = 1.0;
    }
}

fn decay(value: f32, step: f32) -> f32 {
    (value - step).max(0.0)
}

impl GridEntity for Food {
    fn update(&mut self) {
        if !std::mem::take(&mut self.just_placed) {
            self.birth = decay(self.birth, self.birth_step);
        }
        self.death = decay(self.death, self.death_step);
        if self.death == 0.0 {
            self.eaten_at = None;
        }
    }

    fn project(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        if let Some(pos) = self.position {
            grid.set_at(pos, CellState::Food)?;
        }
        Ok(())
    }
}
