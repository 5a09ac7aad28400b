use crate::frontier::QueueFrontier;
use crate::neighbors::NeighborOrder;
use crate::solver::GridSolver;

/// Breadth-first search. Expands cells in order of distance from the start, so the returned path
/// is a shortest one; among equally short paths the Up, Left, Down, Right neighbour order
/// decides.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Frontier = QueueFrontier<i64>;

    fn name(&self) -> &'static str {
        "BFS"
    }

    fn neighbor_order(&self) -> NeighborOrder {
        NeighborOrder::Inverted
    }
}
