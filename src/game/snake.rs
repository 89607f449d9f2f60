use std::collections::VecDeque;

use crate::error::GridError;

use super::action::Direction;
use super::entity::GridEntity;
use super::grid::{CellState, Grid};
use super::state::{Bounds, CollisionType, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    Alive,
    /// Terminal; the snake accepts no further moves
    Dead(CollisionType),
}

/// Outcome of a single [`Snake::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved {
        head: Position,
        /// Cell given up by the tail, `None` when the snake grew
        vacated: Option<Position>,
    },
    Died(CollisionType),
    /// The snake was already dead
    Rejected,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
    heading: Direction,
    pending_heading: Option<Direction>,
    pending_growth: u32,
    state: SnakeState,
    bounds: Bounds,
    /// Cells vacated since the last projection
    stale: Vec<Position>,
}

impl Snake {
    /// Create a snake from explicit segments, head first.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn new(
        body: impl IntoIterator<Item = Position>,
        heading: Direction,
        bounds: Bounds,
    ) -> Self {
        let body: VecDeque<Position> = body.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one segment");

        Self {
            body,
            heading,
            pending_heading: None,
            pending_growth: 0,
            state: SnakeState::Alive,
            bounds,
            stale: Vec::new(),
        }
    }

    /// Spawn a snake in the middle of the grid, facing right, with its body
    /// trailing to the left. Lengths that do not fit are shortened to fit.
    pub fn spawn(grid: &Grid, length: usize) -> Self {
        let head = Position::new((grid.cols() / 2) as i32, (grid.rows() / 2) as i32);
        let length = length.clamp(1, head.col as usize + 1);

        let body = (0..length as i32).map(|i| head.moved_by(-i, 0));
        Self::new(body, Direction::Right, grid.bounds())
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_heading(&self) -> Option<Direction> {
        self.pending_heading
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }

    /// Check if position is occupied by any segment
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Buffer a heading change for the next advance. A straight reversal is
    /// silently ignored once the snake has a neck to run into.
    pub fn set_heading(&mut self, direction: Direction) {
        if !self.is_alive() {
            return;
        }

        if self.body.len() > 1 && direction.is_opposite(self.heading) {
            return;
        }

        self.pending_heading = Some(direction);
    }

    /// Defer trimming the tail for the next `n` advances
    pub fn grow(&mut self, n: u32) {
        self.pending_growth += n;
    }

    /// Cell the next advance would move the head to
    pub fn peek_head(&self) -> Position {
        let heading = self.pending_heading.unwrap_or(self.heading);
        self.head().moved_in_direction(heading)
    }

    /// Move one cell along the (possibly just updated) heading.
    ///
    /// Collision is decided purely from the snake's own segments and the
    /// board bounds. The tail only counts as free when it is about to move,
    /// i.e. when no growth is pending.
    pub fn advance(&mut self) -> Advance {
        if !self.is_alive() {
            return Advance::Rejected;
        }

        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }

        let head = self.head().moved_in_direction(self.heading);

        if !self.bounds.contains(head) {
            return self.die(CollisionType::Wall);
        }

        let growing = self.pending_growth > 0;
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(checked).any(|segment| *segment == head) {
            return self.die(CollisionType::SelfCollision);
        }

        self.body.push_front(head);

        let vacated = if growing {
            self.pending_growth -= 1;
            None
        } else {
            self.body.pop_back()
        };

        if let Some(cell) = vacated {
            self.stale.push(cell);
        }

        Advance::Moved { head, vacated }
    }

    fn die(&mut self, cause: CollisionType) -> Advance {
        self.state = SnakeState::Dead(cause);
        self.pending_heading = None;
        Advance::Died(cause)
    }
}

impl GridEntity for Snake {
    fn project(&mut self, grid: &mut Grid) -> Result<(), GridError> {
        for cell in self.stale.drain(..) {
            grid.set_at(cell, CellState::Empty)?;
        }

        // Written after clearing, so a head that moved into the old tail
        // cell stays tagged
        for segment in &self.body {
            grid.set_at(*segment, CellState::Snake)?;
        }

        Ok(())
    }
}
