//! Reader for the plain-text grid description format:
//!
//! ```text
//! [5,11]
//! (0,1)
//! (7,0) | (10,3)
//! (2,0,2,2)
//! (8,0,1,2)
//! ```
//!
//! The first line gives `[rows,cols]`, the second the start as `(col,row)`, the third the goals
//! separated by `|`. Every further line holds wall rectangles `(col,row,width,height)`. Blank
//! lines are skipped.
use std::fs;
use std::path::Path;

use itertools::iproduct;

use crate::error::ParseError;
use crate::grid_model::GridModel;
use crate::position::Position;

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    /// Next non-blank line with its 1-based number.
    fn next_content(&mut self) -> Option<(usize, &'a str)> {
        self.inner
            .by_ref()
            .map(|(ix, line)| (ix + 1, line.trim()))
            .find(|(_, line)| !line.is_empty())
    }

    fn require(&mut self, section: &'static str) -> Result<(usize, &'a str), ParseError> {
        self.next_content().ok_or(ParseError::MissingSection(section))
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::Malformed {
        line,
        reason: reason.into(),
    }
}

/// Splits every `open ... close` group of `text` into its comma separated fields.
fn groups(line: usize, text: &str, open: char, close: char) -> Result<Vec<Vec<&str>>, ParseError> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let after = &rest[start + open.len_utf8()..];
        let end = after
            .find(close)
            .ok_or_else(|| malformed(line, format!("unclosed '{}'", open)))?;
        found.push(after[..end].split(',').map(str::trim).collect());
        rest = &after[end + close.len_utf8()..];
    }
    Ok(found)
}

fn number<T: std::str::FromStr>(line: usize, field: &str) -> Result<T, ParseError> {
    field
        .parse()
        .map_err(|_| malformed(line, format!("'{}' is not a valid number", field)))
}

fn fields<T: std::str::FromStr, const N: usize>(
    line: usize,
    group: &[&str],
    what: &str,
) -> Result<[T; N], ParseError> {
    if group.len() != N {
        return Err(malformed(
            line,
            format!("{} needs {} values, found {}", what, N, group.len()),
        ));
    }
    let values = group
        .iter()
        .map(|field| number(line, field))
        .collect::<Result<Vec<T>, _>>()?;
    values
        .try_into()
        .map_err(|_| malformed(line, format!("{} needs {} values", what, N)))
}

fn single_group<'t>(
    line: usize,
    text: &'t str,
    open: char,
    close: char,
    what: &str,
) -> Result<Vec<&'t str>, ParseError> {
    let mut found = groups(line, text, open, close)?;
    if found.len() != 1 {
        return Err(malformed(
            line,
            format!("expected one {}{}{}", open, what, close),
        ));
    }
    Ok(found.remove(0))
}

/// Cells of a wall rectangle that lie inside a `rows` x `cols` grid. A rectangle with zero width
/// or height covers nothing. Returns [None] if the far edge of the rectangle overflows `i32`.
pub fn wall_rect(
    col: i32,
    row: i32,
    width: i32,
    height: i32,
    rows: usize,
    cols: usize,
) -> Option<impl Iterator<Item = Position>> {
    let col_end = col.checked_add(width)?;
    let row_end = row.checked_add(height)?;
    let cols = i32::try_from(cols).unwrap_or(i32::MAX);
    let rows = i32::try_from(rows).unwrap_or(i32::MAX);
    let col_range = col.max(0)..col_end.min(cols);
    let row_range = row.max(0)..row_end.min(rows);
    Some(iproduct!(row_range, col_range).map(|(r, c)| Position::new(c, r)))
}

/// Parses a grid description. See the module docs for the format.
pub fn parse_grid_description(text: &str) -> Result<GridModel, ParseError> {
    let mut lines = Lines {
        inner: text.lines().enumerate(),
    };

    let (line, dims) = lines.require("grid size")?;
    let dims = single_group(line, dims, '[', ']', "rows,cols")?;
    let [rows, cols] = fields::<usize, 2>(line, &dims, "grid size")?;

    let (line, start) = lines.require("start")?;
    let start = single_group(line, start, '(', ')', "col,row")?;
    let [col, row] = fields::<i32, 2>(line, &start, "start")?;
    let start = Position::new(col, row);

    let (line, goal_line) = lines.require("goals")?;
    let mut goals = Vec::new();
    for group in groups(line, goal_line, '(', ')')? {
        let [col, row] = fields::<i32, 2>(line, &group, "goal")?;
        goals.push(Position::new(col, row));
    }

    let mut walls = Vec::new();
    while let Some((line, wall_line)) = lines.next_content() {
        let rects = groups(line, wall_line, '(', ')')?;
        if rects.is_empty() {
            return Err(malformed(line, "expected (col,row,width,height)"));
        }
        for rect in rects {
            let [col, row, width, height] = fields::<i32, 4>(line, &rect, "wall")?;
            if width < 0 || height < 0 {
                return Err(malformed(line, "wall width and height must not be negative"));
            }
            let cells = wall_rect(col, row, width, height, rows, cols)
                .ok_or_else(|| malformed(line, "wall rectangle exceeds the coordinate range"))?;
            walls.extend(cells);
        }
    }

    Ok(GridModel::new(rows, cols, walls, goals, start)?)
}

/// Reads and parses a grid description file.
pub fn load_grid_description<P: AsRef<Path>>(path: P) -> Result<GridModel, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_grid_description(&text)
}
