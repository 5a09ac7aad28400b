use core::fmt;

use log::debug;
use petgraph::unionfind::UnionFind;

use crate::error::{GridIssue, SearchError};
use crate::position::Position;
use crate::FxIndexSet;

/// [GridModel] is the immutable search space: grid dimensions, the wall cells stored as a dense
/// [bool] grid (occupied is [true]), the goal cells in the order they were given and the start
/// cell. Connected components of the free cells are computed once on construction using a
/// [UnionFind] structure, so reachability questions can be answered without searching.
#[derive(Clone, Debug)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    goals: FxIndexSet<Position>,
    start: Position,
    components: UnionFind<usize>,
}

impl GridModel {
    /// Builds and validates a grid. Wall cells outside the grid are ignored. Fails if the grid has
    /// no cells, there are no goals, or the start or any goal is out of bounds or on a wall.
    pub fn new<W, G>(
        rows: usize,
        cols: usize,
        walls: W,
        goals: G,
        start: Position,
    ) -> Result<GridModel, SearchError>
    where
        W: IntoIterator<Item = Position>,
        G: IntoIterator<Item = Position>,
    {
        if rows == 0 || cols == 0 {
            return Err(GridIssue::EmptyDimensions { rows, cols }.into());
        }
        let mut grid = GridModel {
            rows,
            cols,
            walls: vec![false; rows * cols],
            goals: goals.into_iter().collect(),
            start,
            components: UnionFind::new(0),
        };
        for wall in walls {
            if grid.in_bounds(wall) {
                let ix = grid.get_ix(wall);
                grid.walls[ix] = true;
            } else {
                debug!("Ignoring wall {} outside the {}x{} grid", wall, rows, cols);
            }
        }
        grid.validate_endpoints(start, &grid.goals)?;
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, the upper bound on expansions of any graph search.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goals(&self) -> &FxIndexSet<Position> {
        &self.goals
    }

    /// Iterates over the wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, &blocked)| blocked)
            .map(move |(ix, _)| self.get_point(ix))
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.col >= 0
            && pos.row >= 0
            && (pos.col as usize) < self.cols
            && (pos.row as usize) < self.rows
    }

    /// Out of bounds cells count as walls.
    pub fn is_wall(&self, pos: Position) -> bool {
        !self.in_bounds(pos) || self.walls[self.get_ix(pos)]
    }

    pub fn can_move_to(&self, pos: Position) -> bool {
        !self.is_wall(pos)
    }

    /// Row-major index of an in-bounds cell.
    pub fn get_ix(&self, pos: Position) -> usize {
        pos.row as usize * self.cols + pos.col as usize
    }

    fn get_point(&self, ix: usize) -> Position {
        Position::new((ix % self.cols) as i32, (ix / self.cols) as i32)
    }

    /// Checks that a start and goal set can be searched on this grid.
    pub fn validate_endpoints(
        &self,
        start: Position,
        goals: &FxIndexSet<Position>,
    ) -> Result<(), GridIssue> {
        if !self.in_bounds(start) {
            return Err(GridIssue::StartOutOfBounds(start));
        }
        if self.is_wall(start) {
            return Err(GridIssue::StartOnWall(start));
        }
        if goals.is_empty() {
            return Err(GridIssue::NoGoals);
        }
        for &goal in goals {
            if !self.in_bounds(goal) {
                return Err(GridIssue::GoalOutOfBounds(goal));
            }
            if self.is_wall(goal) {
                return Err(GridIssue::GoalOnWall(goal));
            }
        }
        Ok(())
    }

    /// Retrieves the component id a given free [Position] belongs to.
    pub fn get_component(&self, pos: Position) -> usize {
        self.components.find(self.get_ix(pos))
    }

    /// Checks if two free cells are on the same connected component.
    pub fn reachable(&self, from: Position, to: Position) -> bool {
        self.can_move_to(from)
            && self.can_move_to(to)
            && self.components.equiv(self.get_ix(from), self.get_ix(to))
    }

    /// Checks if every cell in `targets` lies on a different component than `from`.
    pub fn all_unreachable<'a, I>(&self, from: Position, targets: I) -> bool
    where
        I: IntoIterator<Item = &'a Position>,
    {
        targets.into_iter().all(|t| !self.reachable(from, *t))
    }

    /// Links up free orthogonal neighbours into the same component.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cell_count());
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let point = Position::new(col, row);
                if self.is_wall(point) {
                    continue;
                }
                let parent_ix = self.get_ix(point);
                [Position::new(col + 1, row), Position::new(col, row + 1)]
                    .into_iter()
                    .filter(|p| self.can_move_to(*p))
                    .for_each(|p| {
                        components.union(parent_ix, self.get_ix(p));
                    });
            }
        }
        self.components = components;
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|col| {
                    let p = Position::new(col, row);
                    if p == self.start {
                        'S'
                    } else if self.goals.contains(&p) {
                        'G'
                    } else if self.is_wall(p) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
