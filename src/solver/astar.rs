use crate::error::SearchError;
use crate::frontier::PriorityFrontier;
use crate::position::Position;
use crate::solver::{nearest_goal_distance, GridSolver};
use crate::{FxIndexSet, UNIT_COST};

/// A* search ranking cells by `f = g + w * h`, with `g` the moves from the start and `h` the
/// Manhattan distance to the nearest goal. With the default factor of 1 this is plain A* and the
/// path is shortest. Larger factors give weighted A*, which trusts the heuristic more and
/// approaches greedy best-first search as the factor grows.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f64,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Weighted A*. The weight must be finite and positive.
    pub fn weighted(weight: f64) -> Result<AstarSolver, SearchError> {
        let solver = AstarSolver {
            heuristic_factor: weight,
        };
        solver.validate()?;
        Ok(solver)
    }
}

impl GridSolver for AstarSolver {
    type Frontier = PriorityFrontier<i64>;

    fn name(&self) -> &'static str {
        if self.heuristic_factor == 1.0 {
            "A*"
        } else {
            "Weighted A*"
        }
    }

    /// The cost plus the heuristic times the heuristic factor, in [UNIT_COST] fixed point.
    /// Saturates at [i64::MAX] for huge factors, leaving the cost as the tie-breaker.
    fn priority(&self, cost: i64, pos: &Position, goals: &FxIndexSet<Position>) -> i64 {
        let h = (nearest_goal_distance(pos, goals) * UNIT_COST) as f64 * self.heuristic_factor;
        // Float to integer casts saturate
        let h = h.round() as i64;
        cost.saturating_mul(UNIT_COST).saturating_add(h)
    }

    fn improves_on_cost(&self) -> bool {
        true
    }

    fn validate(&self) -> Result<(), SearchError> {
        if self.heuristic_factor.is_finite() && self.heuristic_factor > 0.0 {
            Ok(())
        } else {
            Err(SearchError::InvalidWeight {
                weight: self.heuristic_factor,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::greedy::GreedySolver;
    use crate::{GridModel, SearchConfig};

    const NO_WALLS: [Position; 0] = [];

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = GridModel::new(1, 1, NO_WALLS, [p(0, 0)], p(0, 0)).unwrap();
        let path = AstarSolver::new()
            .get_path_single_goal(&grid, p(0, 0), p(0, 0))
            .unwrap()
            .unwrap();
        assert!(path.len() == 1);
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        let grid = GridModel::new(3, 3, [p(1, 1)], [p(2, 2)], p(0, 0)).unwrap();
        let path = AstarSolver::new()
            .get_path_single_goal(&grid, grid.start(), p(2, 2))
            .unwrap()
            .unwrap();
        assert!(path.len() == 5);
    }

    #[test]
    fn test_multiple_goals() {
        let grid = GridModel::new(5, 5, [p(1, 1)], [p(4, 4)], p(0, 0)).unwrap();
        let (selected_goal, path) = AstarSolver::new()
            .get_path_multiple_goals(&grid, grid.start(), &[p(4, 4), p(3, 3)])
            .unwrap()
            .unwrap();
        assert_eq!(selected_goal, p(3, 3));
        assert!(path.len() == 7);
    }

    #[test]
    fn test_complex() {
        let walls = [p(1, 1), p(5, 0), p(0, 5), p(8, 8)];
        let grid = GridModel::new(10, 10, walls, [p(7, 7)], p(0, 0)).unwrap();
        let path = AstarSolver::new()
            .get_path_single_goal(&grid, grid.start(), p(7, 7))
            .unwrap()
            .unwrap();
        assert!(path.len() == 15);
    }

    /// Finds the shortest way around a wall that forces a detour.
    #[test]
    fn detour_is_shortest() {
        // |S . . . .|
        // |# # # # .|
        // |G . . . .|
        let walls = [p(0, 1), p(1, 1), p(2, 1), p(3, 1)];
        let grid = GridModel::new(3, 5, walls, [p(0, 2)], p(0, 0)).unwrap();
        let result = AstarSolver::new()
            .search(&grid, grid.start(), grid.goals(), &SearchConfig::default())
            .unwrap();
        assert_eq!(result.path.len(), 11);
        assert!(result.visited_count <= grid.cell_count());
    }

    #[test]
    fn rejects_bad_weights() {
        for weight in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                AstarSolver::weighted(weight),
                Err(SearchError::InvalidWeight { .. })
            ));
        }
        let grid = GridModel::new(2, 2, NO_WALLS, [p(1, 1)], p(0, 0)).unwrap();
        let solver = AstarSolver {
            heuristic_factor: -1.0,
        };
        assert!(solver.get_path_single_goal(&grid, p(0, 0), p(1, 1)).is_err());
    }

    /// A factor of one is plain A*; a huge factor makes the cost negligible and the search greedy.
    #[test]
    fn weight_extremes() {
        let grid = GridModel::new(4, 4, NO_WALLS, [p(3, 3)], p(0, 0)).unwrap();
        let config = SearchConfig::default();
        let astar = AstarSolver::new()
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        let unit = AstarSolver::weighted(1.0)
            .unwrap()
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        assert_eq!(unit.path, astar.path);

        let heavy = AstarSolver::weighted(1000.0)
            .unwrap()
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        let greedy = GreedySolver
            .search(&grid, grid.start(), grid.goals(), &config)
            .unwrap();
        assert_eq!(heavy.path, greedy.path);
        assert_eq!(AstarSolver::weighted(2.5).unwrap().name(), "Weighted A*");
    }

    /// Weights so large that the scaled heuristic leaves the `i64` range still search.
    #[test]
    fn huge_weight_saturates() {
        let grid = GridModel::new(5, 5, NO_WALLS, [p(4, 4)], p(0, 0)).unwrap();
        let solver = AstarSolver::weighted(1e18).unwrap();
        let goals = grid.goals().clone();
        assert_eq!(solver.priority(3, &p(0, 0), &goals), i64::MAX);
        assert_eq!(solver.priority(3, &p(4, 4), &goals), 3 * UNIT_COST);
        let result = solver
            .search(&grid, grid.start(), grid.goals(), &SearchConfig::default())
            .unwrap();
        assert!(result.is_found());
        // Saturated estimates tie, so cells come off the heap by cost and the path is shortest
        assert_eq!(result.path.len(), 9);
    }
}
