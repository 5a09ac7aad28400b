use crate::frontier::PriorityFrontier;
use crate::position::Position;
use crate::solver::{nearest_goal_distance, GridSolver};
use crate::{FxIndexSet, UNIT_COST};

/// Greedy best-first search. Always expands the discovered cell closest to a goal by Manhattan
/// distance, ignoring the cost already spent. Fast on open grids, not optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    type Frontier = PriorityFrontier<i64>;

    fn name(&self) -> &'static str {
        "GBFS"
    }

    fn priority(&self, _cost: i64, pos: &Position, goals: &FxIndexSet<Position>) -> i64 {
        nearest_goal_distance(pos, goals) * UNIT_COST
    }
}
