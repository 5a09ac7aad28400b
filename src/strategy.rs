use core::fmt;
use std::str::FromStr;

use crate::error::{SearchError, StrategyParseError};
use crate::grid_model::GridModel;
use crate::orchestrator::{MultiGoalOrchestrator, MultiGoalResult};
use crate::position::Position;
use crate::search_engine::SearchResult;
use crate::solver::astar::AstarSolver;
use crate::solver::bfs::BfsSolver;
use crate::solver::dfs::DfsSolver;
use crate::solver::greedy::GreedySolver;
use crate::solver::iddfs::IddfsSolver;
use crate::solver::GridSolver;
use crate::{FxIndexSet, SearchConfig};

/// Runtime choice of search strategy, e.g. parsed from a command line.
///
/// Accepted names (case-insensitive): `DFS`, `BFS`, `GBFS`, `AS` (or `ASTAR`), `WAS:<weight>`
/// and `IDDFS:<max depth>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
    Dfs,
    Bfs,
    Greedy,
    AStar,
    WeightedAStar { weight: f64 },
    Iddfs { max_depth: usize },
}

impl Strategy {
    /// One search run from `start` to the nearest of `goals`.
    pub fn search_once(
        &self,
        grid: &GridModel,
        start: Position,
        goals: &FxIndexSet<Position>,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        match *self {
            Strategy::Dfs => DfsSolver.search(grid, start, goals, config),
            Strategy::Bfs => BfsSolver.search(grid, start, goals, config),
            Strategy::Greedy => GreedySolver.search(grid, start, goals, config),
            Strategy::AStar => AstarSolver::new().search(grid, start, goals, config),
            Strategy::WeightedAStar { weight } => {
                AstarSolver::weighted(weight)?.search(grid, start, goals, config)
            }
            Strategy::Iddfs { max_depth } => {
                IddfsSolver::new(max_depth).search(grid, start, goals, config)
            }
        }
    }

    /// Visits the grid's goals from its start, as many as [SearchConfig::find_all] asks for.
    pub fn run(
        &self,
        grid: &GridModel,
        config: &SearchConfig,
    ) -> Result<MultiGoalResult, SearchError> {
        match *self {
            Strategy::Dfs => MultiGoalOrchestrator::new(grid, &DfsSolver, config).run(),
            Strategy::Bfs => MultiGoalOrchestrator::new(grid, &BfsSolver, config).run(),
            Strategy::Greedy => MultiGoalOrchestrator::new(grid, &GreedySolver, config).run(),
            Strategy::AStar => MultiGoalOrchestrator::new(grid, &AstarSolver::new(), config).run(),
            Strategy::WeightedAStar { weight } => {
                let solver = AstarSolver::weighted(weight)?;
                MultiGoalOrchestrator::new(grid, &solver, config).run()
            }
            Strategy::Iddfs { max_depth } => {
                MultiGoalOrchestrator::new(grid, &IddfsSolver::new(max_depth), config).run()
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Dfs => write!(f, "DFS"),
            Strategy::Bfs => write!(f, "BFS"),
            Strategy::Greedy => write!(f, "GBFS"),
            Strategy::AStar => write!(f, "AS"),
            Strategy::WeightedAStar { weight } => write!(f, "WAS:{}", weight),
            Strategy::Iddfs { max_depth } => write!(f, "IDDFS:{}", max_depth),
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Strategy, StrategyParseError> {
        let s = s.trim();
        let (name, param) = match s.split_once(':') {
            Some((name, param)) => (name, Some(param.trim())),
            None => (s, None),
        };
        let name = name.trim().to_ascii_uppercase();
        let strategy = match name.as_str() {
            "DFS" => Strategy::Dfs,
            "BFS" => Strategy::Bfs,
            "GBFS" => Strategy::Greedy,
            "AS" | "ASTAR" => Strategy::AStar,
            "WAS" => {
                let param = param.ok_or(StrategyParseError::MissingParameter("heuristic weight"))?;
                let weight = param
                    .parse::<f64>()
                    .map_err(|_| StrategyParseError::BadParameter(param.to_owned()))?;
                return Ok(Strategy::WeightedAStar { weight });
            }
            "IDDFS" => {
                let param = param.ok_or(StrategyParseError::MissingParameter("maximum depth"))?;
                let max_depth = param
                    .parse::<usize>()
                    .map_err(|_| StrategyParseError::BadParameter(param.to_owned()))?;
                return Ok(Strategy::Iddfs { max_depth });
            }
            _ => return Err(StrategyParseError::Unknown(s.to_owned())),
        };
        match param {
            Some(param) => Err(StrategyParseError::BadParameter(param.to_owned())),
            None => Ok(strategy),
        }
    }
}
