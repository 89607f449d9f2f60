use serde::{Deserialize, Serialize};

/// Cardinal direction of snake movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the (dcol, drow) step for moving in this direction.
    /// Row 0 is the top of the board.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Last-write-wins slot for the heading requested by the input layer.
///
/// The input side calls [`HeadingIntent::request`] as often as it likes; the
/// game loop calls [`HeadingIntent::take`] once at the start of each tick, so
/// at most one intent is applied per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingIntent {
    pending: Option<Direction>,
}

impl HeadingIntent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    pub fn peek(&self) -> Option<Direction> {
        self.pending
    }

    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
