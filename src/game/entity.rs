use crate::error::GridError;

use super::grid::Grid;

/// Stateful occupant of the board.
///
/// The game loop keeps its entities in a fixed order (snake, then food) and
/// runs `update` followed by `project` on each once per tick. Later
/// entities overwrite earlier ones, which is why food must come last and
/// must only ever sit on a cell that was empty when it was placed.
pub trait GridEntity {
    /// Per-tick bookkeeping that does not touch the grid
    fn update(&mut self) {}

    /// Write this entity's cells into the grid
    fn project(&mut self, grid: &mut Grid) -> Result<(), GridError>;
}
