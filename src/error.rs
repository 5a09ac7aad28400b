//! Error types.
//!
//! An exhausted frontier is not an error; it is reported through
//! [Termination](crate::Termination) on the search result. The errors here cover configurations
//! that cannot be searched at all and internal consistency failures.

use core::fmt;
use std::io;

use crate::position::Position;

/// Why a grid description cannot be searched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridIssue {
    /// Rows or columns is zero.
    EmptyDimensions { rows: usize, cols: usize },
    StartOutOfBounds(Position),
    StartOnWall(Position),
    GoalOutOfBounds(Position),
    GoalOnWall(Position),
    NoGoals,
}

impl fmt::Display for GridIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { rows, cols } => {
                write!(f, "grid of {} rows by {} columns has no cells", rows, cols)
            }
            Self::StartOutOfBounds(p) => write!(f, "start {} lies outside the grid", p),
            Self::StartOnWall(p) => write!(f, "start {} is a wall", p),
            Self::GoalOutOfBounds(p) => write!(f, "goal {} lies outside the grid", p),
            Self::GoalOnWall(p) => write!(f, "goal {} is a wall", p),
            Self::NoGoals => write!(f, "no goal cells given"),
        }
    }
}

/// What went wrong while walking a came-from map back to the start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathDefect {
    /// Two consecutive path cells are not orthogonal neighbours.
    Disjoint { from: Position, to: Position },
    /// A cell on the walk has no came-from entry.
    Untracked(Position),
    /// The walk revisited a cell.
    Cycle(Position),
}

impl fmt::Display for PathDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disjoint { from, to } => {
                write!(f, "{} and {} are not orthogonal neighbours", from, to)
            }
            Self::Untracked(p) => write!(f, "{} has no came-from entry", p),
            Self::Cycle(p) => write!(f, "came-from walk loops at {}", p),
        }
    }
}

/// Errors returned by the search entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// Start or goals are unusable; raised before any expansion.
    InvalidGrid(GridIssue),
    /// Weighted A* needs a finite weight above zero.
    InvalidWeight { weight: f64 },
    /// Path reconstruction found an inconsistent came-from map. Indicates an engine bug.
    InvalidPath(PathDefect),
}

impl SearchError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGrid(_) => "INVALID_GRID",
            Self::InvalidWeight { .. } => "INVALID_WEIGHT",
            Self::InvalidPath(_) => "INVALID_PATH",
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid(issue) => write!(f, "Invalid grid: {}", issue),
            Self::InvalidWeight { weight } => {
                write!(f, "Invalid heuristic weight {} (must be finite and > 0)", weight)
            }
            Self::InvalidPath(defect) => write!(f, "Invalid path: {}", defect),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<GridIssue> for SearchError {
    fn from(issue: GridIssue) -> Self {
        Self::InvalidGrid(issue)
    }
}

impl From<PathDefect> for SearchError {
    fn from(defect: PathDefect) -> Self {
        Self::InvalidPath(defect)
    }
}

/// Errors from reading a strategy name such as `BFS` or `WAS:1.5`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrategyParseError {
    Unknown(String),
    /// The strategy needs a `:<value>` suffix.
    MissingParameter(&'static str),
    BadParameter(String),
}

impl fmt::Display for StrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(
                f,
                "Unknown strategy '{}' (expected DFS, BFS, GBFS, AS, WAS:<weight> or \
                 IDDFS:<max depth>)",
                name
            ),
            Self::MissingParameter(what) => write!(f, "Strategy needs a {}", what),
            Self::BadParameter(value) => write!(f, "Cannot parse strategy parameter '{}'", value),
        }
    }
}

impl std::error::Error for StrategyParseError {}

/// Errors from reading a grid description.
#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    /// The input ended before a required section.
    MissingSection(&'static str),
    Malformed {
        /// 1-based line number.
        line: usize,
        reason: String,
    },
    /// The description parsed but does not form a searchable grid.
    Grid(SearchError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Could not read grid description: {}", e),
            Self::MissingSection(section) => write!(f, "Missing {} line", section),
            Self::Malformed { line, reason } => write!(f, "Line {}: {}", line, reason),
            Self::Grid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SearchError> for ParseError {
    fn from(e: SearchError) -> Self {
        Self::Grid(e)
    }
}

impl From<GridIssue> for ParseError {
    fn from(issue: GridIssue) -> Self {
        Self::Grid(SearchError::InvalidGrid(issue))
    }
}
