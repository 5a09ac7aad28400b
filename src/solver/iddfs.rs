use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info, warn};

use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierEntry, StackFrontier};
use crate::grid_model::GridModel;
use crate::position::Position;
use crate::search_engine::{IddfsStats, SearchResult, Termination};
use crate::solver::GridSolver;
use crate::steps::StepRecorder;
use crate::{CameFrom, FxIndexSet, SearchConfig};

/// Iterative deepening depth-first search: depth-limited DFS passes with limits 0, 1, 2, ... up to
/// `max_depth`, each starting from scratch. Finds shortest paths like BFS while keeping only a
/// stack as frontier.
///
/// Within a pass a cell is expanded again only when it is reached by a strictly shallower route,
/// so a deep first visit cannot hide a goal that is within the limit. If a pass finishes without
/// ever refusing a cell for being too deep, the whole reachable region has been seen and the
/// search gives up early instead of deepening further.
#[derive(Clone, Copy, Debug)]
pub struct IddfsSolver {
    /// Deepest limit tried. Goals further than this many moves are reported as
    /// [Termination::DepthLimit].
    pub max_depth: usize,
}

struct DepthLimitedPass {
    reached: Option<Position>,
    cutoff: bool,
    ceiling_hit: bool,
    came_from: CameFrom,
    expanded: FxHashSet<Position>,
    expansions: usize,
}

impl IddfsSolver {
    pub fn new(max_depth: usize) -> IddfsSolver {
        IddfsSolver { max_depth }
    }

    fn depth_limited_pass(
        &self,
        grid: &GridModel,
        start: Position,
        goals: &FxIndexSet<Position>,
        limit: usize,
        expansion_budget: Option<usize>,
        recorder: &mut StepRecorder,
    ) -> DepthLimitedPass {
        let order = self.neighbor_order();
        let mut stack: StackFrontier<usize> = StackFrontier::default();
        let mut depth: FxHashMap<Position, usize> = FxHashMap::default();
        let mut pass = DepthLimitedPass {
            reached: None,
            cutoff: false,
            ceiling_hit: false,
            came_from: CameFrom::default(),
            expanded: FxHashSet::default(),
            expansions: 0,
        };
        pass.came_from.insert(start, None);
        depth.insert(start, 0);
        stack.push(FrontierEntry::start(start));

        while let Some(FrontierEntry {
            position: current,
            cost: current_depth,
            ..
        }) = stack.pop()
        {
            // Superseded by a shallower entry for the same cell
            if depth.get(&current).is_some_and(|&d| d < current_depth) {
                continue;
            }
            if expansion_budget.is_some_and(|budget| pass.expansions >= budget) {
                pass.ceiling_hit = true;
                break;
            }
            pass.expanded.insert(current);
            pass.expansions += 1;
            recorder.record_move(current);
            if goals.contains(&current) {
                pass.reached = Some(current);
                break;
            }

            let next_depth = current_depth + 1;
            for neighbor in order.neighbors(grid, &current) {
                if depth.get(&neighbor).is_some_and(|&d| d <= next_depth) {
                    continue;
                }
                if next_depth > limit {
                    pass.cutoff = true;
                    continue;
                }
                depth.insert(neighbor, next_depth);
                pass.came_from.insert(neighbor, Some(current));
                stack.push(FrontierEntry {
                    position: neighbor,
                    priority: 0,
                    cost: next_depth,
                });
                recorder.record_discover(neighbor);
            }
            recorder.record_tree(&pass.came_from);
        }
        pass
    }
}

impl GridSolver for IddfsSolver {
    type Frontier = StackFrontier<i64>;

    fn name(&self) -> &'static str {
        "IDDFS"
    }

    fn search(
        &self,
        grid: &GridModel,
        start: Position,
        goals: &FxIndexSet<Position>,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        grid.validate_endpoints(start, goals)?;
        info!(
            "IDDFS search from {} towards {} goal(s), max depth {}",
            start,
            goals.len(),
            self.max_depth
        );
        let mut recorder = StepRecorder::new(config.tree_snapshots);
        let mut stats = IddfsStats::default();
        let mut termination = Termination::DepthLimit;
        let mut last_pass = None;

        for limit in 0..=self.max_depth {
            let budget = config
                .max_expansions
                .map(|max| max.saturating_sub(stats.total_expansions));
            let pass = self.depth_limited_pass(grid, start, goals, limit, budget, &mut recorder);
            stats.iterations += 1;
            stats.final_iteration_expansions = pass.expansions;
            stats.total_expansions += pass.expansions;
            debug!(
                "IDDFS pass {} expanded {} cells (cutoff: {})",
                limit, pass.expansions, pass.cutoff
            );

            let outcome = if let Some(goal) = pass.reached {
                Some(Termination::GoalReached(goal))
            } else if pass.ceiling_hit {
                warn!("IDDFS stopped after {} expansions", stats.total_expansions);
                Some(Termination::ExpansionLimit)
            } else if !pass.cutoff {
                Some(Termination::NoPathFound)
            } else {
                None
            };
            last_pass = Some(pass);
            if let Some(outcome) = outcome {
                termination = outcome;
                break;
            }
        }

        if termination == Termination::DepthLimit {
            warn!(
                "IDDFS gave up at depth {} with cells left unexplored",
                self.max_depth
            );
        } else {
            info!(
                "IDDFS finished with {:?} after {} iterations",
                termination, stats.iterations
            );
        }

        // The loop runs at least once since the limit range always includes 0
        let (came_from, visited_count) = last_pass
            .map(|pass| (pass.came_from, pass.expanded.len()))
            .unwrap_or_default();
        let mut result = SearchResult::from_run(came_from, visited_count, recorder, termination)?;
        result.iddfs = Some(stats);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bfs::BfsSolver;

    const NO_WALLS: [Position; 0] = [];

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    #[test]
    fn iterations_match_depth() {
        let grid = GridModel::new(3, 3, NO_WALLS, [p(2, 2)], p(0, 0)).unwrap();
        let result = IddfsSolver::new(20)
            .search(&grid, grid.start(), grid.goals(), &SearchConfig::default())
            .unwrap();
        assert_eq!(result.path.len(), 5);
        let stats = result.iddfs.unwrap();
        assert_eq!(stats.iterations, 5);
        assert!(stats.total_expansions >= stats.final_iteration_expansions);
        assert!(result.visited_count <= grid.cell_count());
    }

    /// A deep first visit of a cell must not hide a shallower route through it.
    #[test]
    fn shortest_through_revisits() {
        // |S . . . .|
        // |. # # # .|
        // |. . G . .|
        let walls = [p(1, 1), p(2, 1), p(3, 1)];
        let grid = GridModel::new(3, 5, walls, [p(2, 2)], p(0, 0)).unwrap();
        let config = SearchConfig::default();
        let iddfs = IddfsSolver::new(50)
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        let bfs = BfsSolver
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        assert_eq!(iddfs.path.len(), bfs.path.len());
        assert_eq!(iddfs.iddfs.unwrap().iterations, iddfs.path.len());
    }

    #[test]
    fn depth_limit_reported() {
        let grid = GridModel::new(1, 6, NO_WALLS, [p(5, 0)], p(0, 0)).unwrap();
        let result = IddfsSolver::new(3)
            .search(&grid, grid.start(), grid.goals(), &SearchConfig::default())
            .unwrap();
        assert_eq!(result.termination, Termination::DepthLimit);
        assert!(result.path.is_empty());
        assert_eq!(result.iddfs.unwrap().iterations, 4);
    }

    /// Exhausting the reachable region stops the deepening before the maximum depth.
    #[test]
    fn unreachable_stops_early() {
        // |S . .|
        // |# # #|
        // |. . G|
        let walls = [p(0, 1), p(1, 1), p(2, 1)];
        let grid = GridModel::new(3, 3, walls, [p(2, 2)], p(0, 0)).unwrap();
        let result = IddfsSolver::new(100)
            .search(&grid, grid.start(), grid.goals(), &SearchConfig::default())
            .unwrap();
        assert_eq!(result.termination, Termination::NoPathFound);
        assert_eq!(result.iddfs.unwrap().iterations, 3);
        assert_eq!(result.visited_count, 3);
    }

    #[test]
    fn expansion_ceiling_spans_passes() {
        let grid = GridModel::new(1, 8, NO_WALLS, [p(7, 0)], p(0, 0)).unwrap();
        let config = SearchConfig {
            max_expansions: Some(6),
            ..SearchConfig::default()
        };
        let result = IddfsSolver::new(20)
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        assert_eq!(result.termination, Termination::ExpansionLimit);
        assert_eq!(result.iddfs.unwrap().total_expansions, 6);
    }
}
