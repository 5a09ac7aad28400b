use crate::frontier::StackFrontier;
use crate::solver::GridSolver;

/// Depth-first search. Neighbours are pushed Right, Down, Left, Up, so Up is expanded first.
/// Cells already waiting on the stack are pushed again when rediscovered. Paths are valid but
/// usually far from shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    type Frontier = StackFrontier<i64>;

    fn name(&self) -> &'static str {
        "DFS"
    }
}
