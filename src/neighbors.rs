use smallvec::SmallVec;

use crate::grid_model::GridModel;
use crate::position::{Direction, Position};

/// The order in which a strategy enumerates the orthogonal neighbours of a cell. The order decides
/// tie-breaking between equally ranked frontier entries and therefore which of several equally
/// long paths is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborOrder {
    /// Right, Down, Left, Up.
    Forward,
    /// Up, Left, Down, Right.
    Inverted,
}

impl NeighborOrder {
    pub fn directions(self) -> [Direction; 4] {
        match self {
            NeighborOrder::Forward => [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ],
            NeighborOrder::Inverted => [
                Direction::Up,
                Direction::Left,
                Direction::Down,
                Direction::Right,
            ],
        }
    }

    /// In-bounds, non-wall neighbours of `pos` in this order.
    pub fn neighbors(self, grid: &GridModel, pos: &Position) -> SmallVec<[Position; 4]> {
        self.directions()
            .into_iter()
            .map(|d| pos.step(d))
            .filter(|p| grid.can_move_to(*p))
            .collect()
    }
}
