use itertools::Itertools;

use crate::error::{PathDefect, SearchError};
use crate::position::{Direction, Position};
use crate::CameFrom;

/// Walks the came-from map back from `goal` until it reaches the cell without predecessor and
/// returns the cells from start to goal. Consecutive cells are checked to be orthogonal
/// neighbours.
pub fn reconstruct_path(
    came_from: &CameFrom,
    goal: Position,
) -> Result<Vec<Position>, SearchError> {
    let mut path = vec![goal];
    let mut current = goal;
    loop {
        let parent = came_from
            .get(&current)
            .ok_or(PathDefect::Untracked(current))?;
        match parent {
            Some(parent) => {
                // A walk longer than the map has entries must have looped
                if path.len() > came_from.len() {
                    return Err(PathDefect::Cycle(*parent).into());
                }
                path.push(*parent);
                current = *parent;
            }
            None => break,
        }
    }
    path.reverse();
    path_to_directions(&path)?;
    Ok(path)
}

/// Converts a path into the moves that follow it.
pub fn path_to_directions(path: &[Position]) -> Result<Vec<Direction>, SearchError> {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            Direction::between(from, to).ok_or_else(|| {
                SearchError::InvalidPath(PathDefect::Disjoint {
                    from: *from,
                    to: *to,
                })
            })
        })
        .collect()
}

/// Replays moves from `start`, returning every cell passed including the start. Inverse of
/// [path_to_directions].
pub fn follow_directions(start: Position, directions: &[Direction]) -> Vec<Position> {
    let mut path = Vec::with_capacity(directions.len() + 1);
    let mut current = start;
    path.push(current);
    for &direction in directions {
        current = current + direction;
        path.push(current);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(col: i32, row: i32) -> Position {
        Position::new(col, row)
    }

    fn chain(cells: &[Position]) -> CameFrom {
        let mut came_from = CameFrom::default();
        came_from.insert(cells[0], None);
        for (parent, child) in cells.iter().tuple_windows() {
            came_from.insert(*child, Some(*parent));
        }
        came_from
    }

    #[test]
    fn reconstructs_and_converts() {
        let cells = [p(0, 0), p(1, 0), p(1, 1), p(0, 1)];
        let came_from = chain(&cells);
        let path = reconstruct_path(&came_from, p(0, 1)).unwrap();
        assert_eq!(path, cells.to_vec());
        let directions = path_to_directions(&path).unwrap();
        assert_eq!(
            directions,
            vec![Direction::Right, Direction::Down, Direction::Left]
        );
        assert_eq!(follow_directions(p(0, 0), &directions), path);
    }

    #[test]
    fn start_only() {
        let came_from = chain(&[p(2, 2)]);
        assert_eq!(reconstruct_path(&came_from, p(2, 2)).unwrap(), vec![p(2, 2)]);
        assert!(path_to_directions(&[p(2, 2)]).unwrap().is_empty());
    }

    #[test]
    fn detects_defects() {
        let came_from = chain(&[p(0, 0), p(2, 0)]);
        assert_eq!(
            reconstruct_path(&came_from, p(2, 0)),
            Err(SearchError::InvalidPath(PathDefect::Disjoint {
                from: p(0, 0),
                to: p(2, 0)
            }))
        );
        assert_eq!(
            reconstruct_path(&came_from, p(5, 5)),
            Err(SearchError::InvalidPath(PathDefect::Untracked(p(5, 5))))
        );

        let mut looped = CameFrom::default();
        looped.insert(p(0, 0), Some(p(1, 0)));
        looped.insert(p(1, 0), Some(p(0, 0)));
        assert!(matches!(
            reconstruct_path(&looped, p(0, 0)),
            Err(SearchError::InvalidPath(PathDefect::Cycle(_)))
        ));
    }
}
