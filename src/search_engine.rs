//! The generic expand-visit-test loop shared by every frontier-based strategy.
//!
//! Cells are marked visited when they are taken off the frontier, not when they are pushed, so
//! the frontier may hold several entries for one cell but no cell is expanded twice.
use std::collections::hash_map::Entry::{Occupied, Vacant};

use fxhash::{FxHashMap, FxHashSet};
use log::{info, warn};

use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierEntry};
use crate::grid_model::GridModel;
use crate::path::{path_to_directions, reconstruct_path};
use crate::position::{Direction, Position};
use crate::solver::GridSolver;
use crate::steps::{StepEvent, StepRecorder};
use crate::{CameFrom, FxIndexSet, SearchConfig};

/// How a single search run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    GoalReached(Position),
    /// The frontier ran empty: no goal is reachable from the start.
    NoPathFound,
    /// [SearchConfig::max_expansions] was hit first.
    ExpansionLimit,
    /// Iterative deepening hit its maximum depth while deeper cells remained.
    DepthLimit,
}

impl Termination {
    pub fn goal(&self) -> Option<Position> {
        match self {
            Termination::GoalReached(goal) => Some(*goal),
            _ => None,
        }
    }
}

/// Iterative deepening counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IddfsStats {
    /// Depth-limited passes run, including the last one.
    pub iterations: usize,
    /// Expansions in the last pass.
    pub final_iteration_expansions: usize,
    /// Expansions summed over all passes.
    pub total_expansions: usize,
}

impl IddfsStats {
    /// Adds the counters of a later run, keeping its final-pass count.
    pub fn accumulate(&mut self, later: &IddfsStats) {
        self.iterations += later.iterations;
        self.total_expansions += later.total_expansions;
        self.final_iteration_expansions = later.final_iteration_expansions;
    }
}

/// Outcome of one search run towards a goal set. When no goal was reached `path` and
/// `directions` are empty while the counters and step log still describe the work done.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub path: Vec<Position>,
    /// Distinct cells expanded.
    pub visited_count: usize,
    pub directions: Vec<Direction>,
    pub came_from: CameFrom,
    pub steps: Vec<StepEvent>,
    pub termination: Termination,
    pub iddfs: Option<IddfsStats>,
}

impl SearchResult {
    pub fn goal(&self) -> Option<Position> {
        self.termination.goal()
    }

    pub fn is_found(&self) -> bool {
        self.goal().is_some()
    }

    /// Builds the result from the final search state, reconstructing the path if a goal was
    /// reached.
    pub(crate) fn from_run(
        came_from: CameFrom,
        visited_count: usize,
        recorder: StepRecorder,
        termination: Termination,
    ) -> Result<SearchResult, SearchError> {
        let (path, directions) = match termination.goal() {
            Some(goal) => {
                let path = reconstruct_path(&came_from, goal)?;
                let directions = path_to_directions(&path)?;
                (path, directions)
            }
            None => (Vec::new(), Vec::new()),
        };
        Ok(SearchResult {
            path,
            visited_count,
            directions,
            came_from,
            steps: recorder.into_events(),
            termination,
            iddfs: None,
        })
    }
}

/// Runs a graph search from `start` until a cell in `goals` is expanded or the frontier is
/// exhausted. The solver supplies the frontier discipline, neighbour order and priority; path
/// cost is the number of moves from the start.
pub fn expand_search<S>(
    solver: &S,
    grid: &GridModel,
    start: Position,
    goals: &FxIndexSet<Position>,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError>
where
    S: GridSolver + ?Sized,
{
    grid.validate_endpoints(start, goals)?;
    info!(
        "{} search from {} towards {} goal(s)",
        solver.name(),
        start,
        goals.len()
    );
    let order = solver.neighbor_order();
    let mut frontier = S::Frontier::default();
    let mut recorder = StepRecorder::new(config.tree_snapshots);
    let mut visited: FxHashSet<Position> = FxHashSet::default();
    let mut came_from = CameFrom::default();
    let mut best_cost: FxHashMap<Position, i64> = FxHashMap::default();

    came_from.insert(start, None);
    best_cost.insert(start, 0);
    frontier.push(FrontierEntry::start(start));
    let mut termination = Termination::NoPathFound;

    while let Some(FrontierEntry {
        position: current,
        cost,
        ..
    }) = frontier.pop()
    {
        if visited.contains(&current) {
            continue;
        }
        if let Some(limit) = config.max_expansions {
            if visited.len() >= limit {
                warn!("{} stopped after {} expansions", solver.name(), limit);
                termination = Termination::ExpansionLimit;
                break;
            }
        }
        visited.insert(current);
        recorder.record_move(current);
        if goals.contains(&current) {
            termination = Termination::GoalReached(current);
            break;
        }

        for neighbor in order.neighbors(grid, &current) {
            if visited.contains(&neighbor) {
                continue;
            }
            let new_cost = cost + 1;
            // First discovery wins, unless the solver keeps the cheapest route
            let improved = match best_cost.entry(neighbor) {
                Vacant(e) => {
                    e.insert(new_cost);
                    true
                }
                Occupied(mut e) => {
                    if solver.improves_on_cost() && *e.get() > new_cost {
                        e.insert(new_cost);
                        true
                    } else {
                        false
                    }
                }
            };
            if improved {
                came_from.insert(neighbor, Some(current));
            } else if !frontier.repush_discovered() {
                continue;
            }
            frontier.push(FrontierEntry {
                position: neighbor,
                priority: solver.priority(new_cost, &neighbor, goals),
                cost: new_cost,
            });
            recorder.record_discover(neighbor);
        }
        recorder.record_tree(&came_from);
    }

    match termination {
        Termination::GoalReached(goal) => info!(
            "{} reached {} after {} expansions",
            solver.name(),
            goal,
            visited.len()
        ),
        _ => info!(
            "{} found no path from {} after {} expansions",
            solver.name(),
            start,
            visited.len()
        ),
    }
    SearchResult::from_run(came_from, visited.len(), recorder, termination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::PriorityFrontier;
    use crate::solver::bfs::BfsSolver;

    const NO_WALLS: [Position; 0] = [];

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    /// Expands cells in a fixed order: the bottom row first, then (1, 0), the goal last. The
    /// goal is first discovered through the long way round the bottom row.
    struct ScriptedSolver {
        keep_cheapest: bool,
    }

    impl GridSolver for ScriptedSolver {
        type Frontier = PriorityFrontier<i64>;

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn priority(&self, _cost: i64, pos: &Position, goals: &FxIndexSet<Position>) -> i64 {
            if goals.contains(pos) {
                100
            } else if pos.row == 1 {
                0
            } else {
                50
            }
        }

        fn improves_on_cost(&self) -> bool {
            self.keep_cheapest
        }
    }

    #[test]
    fn expansion_ceiling_stops_search() {
        let grid = GridModel::new(1, 8, NO_WALLS, [p(7, 0)], p(0, 0)).unwrap();
        let config = SearchConfig {
            max_expansions: Some(3),
            ..SearchConfig::default()
        };
        let result = expand_search(&BfsSolver, &grid, grid.start(), grid.goals(), &config).unwrap();
        assert_eq!(result.termination, Termination::ExpansionLimit);
        assert_eq!(result.visited_count, 3);
        assert!(result.path.is_empty());
        assert!(result.directions.is_empty());
        let moves = result
            .steps
            .iter()
            .filter(|e| matches!(e, StepEvent::Move(_)))
            .count();
        assert_eq!(moves, 3);
    }

    #[test]
    fn ceiling_above_need_is_harmless() {
        let grid = GridModel::new(1, 4, NO_WALLS, [p(3, 0)], p(0, 0)).unwrap();
        let config = SearchConfig {
            max_expansions: Some(4),
            ..SearchConfig::default()
        };
        let result = expand_search(&BfsSolver, &grid, grid.start(), grid.goals(), &config).unwrap();
        assert_eq!(result.termination, Termination::GoalReached(p(3, 0)));
        assert_eq!(result.visited_count, 4);
    }

    /// One expansion logs the move, then each discovery in neighbour order, then the tree.
    #[test]
    fn step_log_order() {
        let grid = GridModel::new(3, 3, NO_WALLS, [p(0, 0)], p(1, 1)).unwrap();
        let result = expand_search(
            &BfsSolver,
            &grid,
            grid.start(),
            grid.goals(),
            &SearchConfig::default(),
        )
        .unwrap();
        let mut tree = CameFrom::default();
        tree.insert(p(1, 1), None);
        for n in [p(1, 0), p(0, 1), p(1, 2), p(2, 1)] {
            tree.insert(n, Some(p(1, 1)));
        }
        assert_eq!(
            result.steps[..6],
            [
                StepEvent::Move(p(1, 1)),
                StepEvent::Discover(p(1, 0)),
                StepEvent::Discover(p(0, 1)),
                StepEvent::Discover(p(1, 2)),
                StepEvent::Discover(p(2, 1)),
                StepEvent::TreeSnapshot(tree),
            ]
        );
        // The goal expansion ends the log without a snapshot
        assert_eq!(result.steps.last(), Some(&StepEvent::Move(p(0, 0))));
    }

    #[test]
    fn snapshots_can_be_switched_off() {
        let grid = GridModel::new(3, 3, NO_WALLS, [p(2, 2)], p(0, 0)).unwrap();
        let result = expand_search(
            &BfsSolver,
            &grid,
            grid.start(),
            grid.goals(),
            &SearchConfig::path_only(),
        )
        .unwrap();
        assert!(result
            .steps
            .iter()
            .all(|e| !matches!(e, StepEvent::TreeSnapshot(_))));
    }

    // |S . G|
    // |. . .|
    fn two_routes() -> GridModel {
        GridModel::new(2, 3, NO_WALLS, [p(2, 0)], p(0, 0)).unwrap()
    }

    #[test]
    fn cheaper_route_replaces_predecessor() {
        let grid = two_routes();
        let solver = ScriptedSolver {
            keep_cheapest: true,
        };
        let result =
            expand_search(&solver, &grid, grid.start(), grid.goals(), &SearchConfig::default())
                .unwrap();
        assert_eq!(result.path, vec![p(0, 0), p(1, 0), p(2, 0)]);
        assert_eq!(result.came_from[&p(2, 0)], Some(p(1, 0)));
    }

    #[test]
    fn first_discovery_wins_otherwise() {
        let grid = two_routes();
        let solver = ScriptedSolver {
            keep_cheapest: false,
        };
        let result =
            expand_search(&solver, &grid, grid.start(), grid.goals(), &SearchConfig::default())
                .unwrap();
        assert_eq!(
            result.path,
            vec![p(0, 0), p(0, 1), p(1, 1), p(2, 1), p(2, 0)]
        );
        // (1, 0) was reached from the start before the bottom row offered a longer way
        assert_eq!(result.came_from[&p(1, 0)], Some(p(0, 0)));
    }
}
