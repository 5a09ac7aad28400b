use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::grid_model::GridModel;
use crate::neighbors::NeighborOrder;
use crate::position::Position;
use crate::search_engine::{expand_search, SearchResult};
use crate::{FxIndexSet, SearchConfig};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod greedy;
pub mod iddfs;

/// Manhattan distance to the closest goal. Admissible and consistent on a 4-connected grid with
/// unit moves.
pub fn nearest_goal_distance(pos: &Position, goals: &FxIndexSet<Position>) -> i64 {
    goals
        .iter()
        .map(|goal| pos.manhattan_distance(goal))
        .min()
        .unwrap_or(0) as i64
}

/// A search strategy over the generic expansion loop in [expand_search]. Implementors pick the
/// frontier discipline, the neighbour order and how discovered cells are ranked.
pub trait GridSolver {
    type Frontier: Frontier<i64> + Default;

    fn name(&self) -> &'static str;

    fn neighbor_order(&self) -> NeighborOrder {
        NeighborOrder::Forward
    }

    /// Frontier priority of a cell reached with path cost `cost`. Only read by priority
    /// frontiers.
    fn priority(&self, _cost: i64, _pos: &Position, _goals: &FxIndexSet<Position>) -> i64 {
        0
    }

    /// Whether a strictly cheaper route to an already discovered cell replaces its predecessor.
    fn improves_on_cost(&self) -> bool {
        false
    }

    /// Checks solver parameters before any expansion.
    fn validate(&self) -> Result<(), SearchError> {
        Ok(())
    }

    /// Searches from `start` until any cell of `goals` is expanded.
    fn search(
        &self,
        grid: &GridModel,
        start: Position,
        goals: &FxIndexSet<Position>,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        self.validate()?;
        expand_search(self, grid, start, goals, config)
    }

    /// Computes a path from start to goal, or [None] if the goal cannot be reached.
    fn get_path_single_goal(
        &self,
        grid: &GridModel,
        start: Position,
        goal: Position,
    ) -> Result<Option<Vec<Position>>, SearchError> {
        let goals = std::iter::once(goal).collect();
        let result = self.search(grid, start, &goals, &SearchConfig::path_only())?;
        Ok(result.is_found().then_some(result.path))
    }

    /// Computes a path from the start to whichever of the given goals is found first and returns
    /// the selected goal in addition to the found path. Otherwise behaves similar to
    /// [get_path_single_goal](Self::get_path_single_goal).
    fn get_path_multiple_goals(
        &self,
        grid: &GridModel,
        start: Position,
        goals: &[Position],
    ) -> Result<Option<(Position, Vec<Position>)>, SearchError> {
        let goals = goals.iter().copied().collect();
        let result = self.search(grid, start, &goals, &SearchConfig::path_only())?;
        Ok(result.goal().map(|goal| (goal, result.path)))
    }
}
