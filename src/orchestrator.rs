use std::ops::Range;

use log::{debug, info, warn};

use crate::error::SearchError;
use crate::grid_model::GridModel;
use crate::position::{Direction, Position};
use crate::search_engine::{IddfsStats, SearchResult, Termination};
use crate::solver::GridSolver;
use crate::steps::StepEvent;
use crate::{CameFrom, SearchConfig};

/// One search run of a multi-goal sequence.
#[derive(Clone, Debug)]
pub struct GoalPhase {
    /// Where this run started: the grid start, or the goal reached by the previous run.
    pub start: Position,
    pub termination: Termination,
    pub path: Vec<Position>,
    pub directions: Vec<Direction>,
    pub visited_count: usize,
    pub came_from: CameFrom,
    /// This run's events in [MultiGoalResult::steps].
    pub steps: Range<usize>,
    pub iddfs: Option<IddfsStats>,
}

/// The combined outcome of visiting goals one after another.
#[derive(Clone, Debug, Default)]
pub struct MultiGoalResult {
    /// Path from the grid start through every reached goal. Junction cells appear once.
    pub path: Vec<Position>,
    pub directions: Vec<Direction>,
    /// Expansions summed over all runs.
    pub visited_count: usize,
    /// Events of all runs, in order.
    pub steps: Vec<StepEvent>,
    pub phases: Vec<GoalPhase>,
    /// Goals in the order they were reached.
    pub reached: Vec<Position>,
    /// Goals never reached, in the grid's goal order.
    pub unreached: Vec<Position>,
}

impl MultiGoalResult {
    /// Whether the last run reached a goal, i.e. no run ran into an unreachable goal set.
    pub fn succeeded(&self) -> bool {
        self.phases
            .last()
            .is_some_and(|phase| phase.termination.goal().is_some())
    }

    /// How the last run ended.
    pub fn termination(&self) -> Option<Termination> {
        self.phases.last().map(|phase| phase.termination)
    }

    /// Iterative deepening counters summed over all runs, if the strategy reported them.
    pub fn iddfs_totals(&self) -> Option<IddfsStats> {
        self.phases
            .iter()
            .filter_map(|phase| phase.iddfs)
            .fold(None, |total: Option<IddfsStats>, stats| {
                let mut total = total.unwrap_or_default();
                total.accumulate(&stats);
                Some(total)
            })
    }

    /// The events of one run.
    pub fn phase_steps(&self, phase: &GoalPhase) -> &[StepEvent] {
        &self.steps[phase.steps.clone()]
    }

    fn push_phase(&mut self, start: Position, result: SearchResult) {
        let SearchResult {
            path,
            visited_count,
            directions,
            came_from,
            steps,
            termination,
            iddfs,
        } = result;
        let first_step = self.steps.len();
        self.steps.extend(steps);
        self.visited_count += visited_count;
        if let Some(goal) = termination.goal() {
            // The segment starts on the previous goal, which is already on the path
            let skip = usize::from(!self.path.is_empty());
            self.path.extend(path.iter().skip(skip).copied());
            self.directions.extend(directions.iter().copied());
            self.reached.push(goal);
        }
        self.phases.push(GoalPhase {
            start,
            termination,
            path,
            directions,
            visited_count,
            came_from,
            steps: first_step..self.steps.len(),
            iddfs,
        });
    }
}

/// Runs a solver repeatedly to visit several goals. Each run searches from the current start
/// towards all remaining goals; the goal reached becomes the start of the next run, with fresh
/// frontier, visited set and came-from map.
pub struct MultiGoalOrchestrator<'a, S: ?Sized> {
    grid: &'a GridModel,
    solver: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: GridSolver + ?Sized> MultiGoalOrchestrator<'a, S> {
    pub fn new(grid: &'a GridModel, solver: &'a S, config: &'a SearchConfig) -> Self {
        MultiGoalOrchestrator {
            grid,
            solver,
            config,
        }
    }

    /// Stops after the first goal unless [SearchConfig::find_all] is set, and as soon as a run
    /// fails to reach any remaining goal.
    pub fn run(&self) -> Result<MultiGoalResult, SearchError> {
        let mut remaining = self.grid.goals().clone();
        let mut start = self.grid.start();
        let mut result = MultiGoalResult::default();
        loop {
            if self.grid.all_unreachable(start, &remaining) {
                warn!(
                    "None of the {} remaining goal(s) is reachable from {}",
                    remaining.len(),
                    start
                );
            }
            let phase = self.solver.search(self.grid, start, &remaining, self.config)?;
            let reached = phase.goal();
            result.push_phase(start, phase);
            match reached {
                Some(goal) => {
                    remaining.shift_remove(&goal);
                    if !self.config.find_all || remaining.is_empty() {
                        break;
                    }
                    debug!(
                        "Reached {}, {} goal(s) left; restarting search from there",
                        goal,
                        remaining.len()
                    );
                    start = goal;
                }
                None => break,
            }
        }
        result.unreached = remaining.into_iter().collect();
        info!(
            "{} reached {} of {} goal(s) with a path of {} moves",
            self.solver.name(),
            result.reached.len(),
            self.grid.goals().len(),
            result.directions.len()
        );
        Ok(result)
    }
}
