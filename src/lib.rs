//! # grid_search
//!
//! Interchangeable search strategies for routing an agent across a bounded, 4-connected grid with
//! walls towards one or more goal cells. Implements depth-first, breadth-first, greedy best-first,
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), weighted A* and
//! [iterative deepening](https://en.wikipedia.org/wiki/Iterative_deepening_depth-first_search)
//! search on top of one generic expansion loop. All moves have unit cost.
//!
//! Every search records a log of [StepEvent]s (expansions, discoveries and search-tree snapshots)
//! that a renderer can replay at its own pace with a [Stepper]. Multiple goals are visited in
//! sequence by the [MultiGoalOrchestrator].
//!
//! ```
//! use grid_search::{search, GridModel, Position, SearchConfig, Strategy};
//!
//! let wall = Position::new(1, 1);
//! let grid = GridModel::new(3, 3, [wall], [Position::new(2, 2)], Position::new(0, 0))?;
//! let result = search(&grid, &Strategy::AStar, &SearchConfig::default())?;
//! assert_eq!(result.path.len(), 5);
//! # Ok::<(), grid_search::SearchError>(())
//! ```
use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

pub mod error;
pub mod frontier;
pub mod grid_model;
pub mod neighbors;
pub mod orchestrator;
pub mod parse;
pub mod path;
pub mod position;
pub mod search_engine;
pub mod search_tree;
pub mod solver;
pub mod steps;
pub mod strategy;

pub use error::{GridIssue, ParseError, PathDefect, SearchError, StrategyParseError};
pub use grid_model::GridModel;
pub use neighbors::NeighborOrder;
pub use orchestrator::{GoalPhase, MultiGoalOrchestrator, MultiGoalResult};
pub use parse::{load_grid_description, parse_grid_description};
pub use path::{follow_directions, path_to_directions, reconstruct_path};
pub use position::{Direction, Position};
pub use search_engine::{IddfsStats, SearchResult, Termination};
pub use search_tree::{NodePlacement, SearchTree};
pub use solver::GridSolver;
pub use steps::{ReplayFrame, StepEvent, StepRecorder, Stepper};
pub use strategy::Strategy;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Predecessor of every discovered cell; the start maps to [None].
pub type CameFrom = FxIndexMap<Position, Option<Position>>;

/// Fixed-point scale of a single move in frontier priorities, so that fractional heuristic
/// weights still rank on integers.
pub const UNIT_COST: i64 = 1000;

/// Run-wide search settings. Strategy parameters live on the solvers.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Keep going after the first goal until every goal is reached or one is unreachable.
    pub find_all: bool,
    /// Record a copy of the came-from map after each expansion.
    pub tree_snapshots: bool,
    /// Stop a single search after this many expansions.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            find_all: true,
            tree_snapshots: true,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    /// Settings for callers that only want the path: first goal only, no tree snapshots.
    pub fn path_only() -> SearchConfig {
        SearchConfig {
            find_all: false,
            tree_snapshots: false,
            max_expansions: None,
        }
    }
}

/// Searches `grid` from its start towards its goals with the given strategy, visiting goals in
/// sequence as configured.
pub fn search(
    grid: &GridModel,
    strategy: &Strategy,
    config: &SearchConfig,
) -> Result<MultiGoalResult, SearchError> {
    strategy.run(grid, config)
}
