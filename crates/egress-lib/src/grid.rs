//! Occupancy grid describing a building floor during a fire.
//!
//! A [`Grid`] stores one [`Cell`] tag per position plus the ordered lists of
//! registered exits and people. Walkability and hazard queries always consult
//! the cells themselves; the index lists only record registration order.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tag held by a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Fire,
    Smoke,
    Exit,
    Person,
}

impl Cell {
    /// Glyph used in text layouts.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Fire => 'F',
            Cell::Smoke => 'S',
            Cell::Exit => 'E',
            Cell::Person => 'P',
        }
    }

    /// Parse a layout glyph. `0` and `1` are accepted for empty and wall.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | '0' => Some(Cell::Empty),
            '#' | '1' => Some(Cell::Wall),
            'F' | 'f' => Some(Cell::Fire),
            'S' | 's' => Some(Cell::Smoke),
            'E' | 'e' => Some(Cell::Exit),
            'P' | 'p' => Some(Cell::Person),
            _ => None,
        }
    }

    /// Whether a route may occupy a cell with this tag.
    pub fn is_walkable(self) -> bool {
        match self {
            Cell::Wall | Cell::Fire => false,
            Cell::Empty | Cell::Smoke | Cell::Exit | Cell::Person => true,
        }
    }
}

/// Row/column coordinate within a grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan (4-connected) distance between two positions.
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Parse `row,col` (whitespace and surrounding parentheses are ignored).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL but got '{s}'"))?;
        let row = row
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid row '{}': {err}", row.trim()))?;
        let col = col
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid column '{}': {err}", col.trim()))?;
        Ok(Self::new(row, col))
    }
}

/// Fixed-size occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    exits: Vec<Position>,
    people: Vec<Position>,
}

impl Grid {
    /// Create an all-empty grid of `rows × cols` cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }
        let too_large = || Error::GridTooLarge { rows, cols };
        let len = rows.checked_mul(cols).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, Cell::Empty);
        Ok(Self {
            rows,
            cols,
            cells,
            exits: Vec::new(),
            people: Vec::new(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Exits in registration order.
    pub fn exits(&self) -> &[Position] {
        &self.exits
    }

    /// People in registration order.
    pub fn people(&self) -> &[Position] {
        &self.people
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Tag at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// In bounds and not a wall or fire.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    /// Overwrite the tag at `pos`. Exit and person tags are also registered
    /// in the matching index list.
    pub fn place(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let idx = self.index(pos).ok_or(Error::OutOfBounds {
            position: pos,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.cells[idx] = cell;
        match cell {
            Cell::Exit => self.exits.push(pos),
            Cell::Person => self.people.push(pos),
            Cell::Empty | Cell::Wall | Cell::Fire | Cell::Smoke => {}
        }
        Ok(())
    }

    pub fn add_wall(&mut self, pos: Position) -> Result<()> {
        self.place(pos, Cell::Wall)
    }

    pub fn add_fire(&mut self, pos: Position) -> Result<()> {
        self.place(pos, Cell::Fire)
    }

    pub fn add_smoke(&mut self, pos: Position) -> Result<()> {
        self.place(pos, Cell::Smoke)
    }

    pub fn add_exit(&mut self, pos: Position) -> Result<()> {
        self.place(pos, Cell::Exit)
    }

    pub fn add_person(&mut self, pos: Position) -> Result<()> {
        self.place(pos, Cell::Person)
    }

    /// Walkable 4-connected neighbours of `pos` in down, up, right, left order.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let candidates = [
            pos.row.checked_add(1).map(|row| Position::new(row, pos.col)),
            pos.row.checked_sub(1).map(|row| Position::new(row, pos.col)),
            pos.col.checked_add(1).map(|col| Position::new(pos.row, col)),
            pos.col.checked_sub(1).map(|col| Position::new(pos.row, col)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |candidate| self.is_walkable(*candidate))
    }

    /// Every position holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, tag)| **tag == cell)
            .map(move |(idx, _)| Position::new(idx / cols, idx % cols))
    }

    /// Every fire position, in row-major order.
    pub fn fire_cells(&self) -> Vec<Position> {
        self.positions_of(Cell::Fire).collect()
    }

    /// Load a grid from disk. Files ending in `.json` are decoded as a
    /// [`GridSpec`]; anything else is parsed as a text layout.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let spec: GridSpec = serde_json::from_str(&contents)?;
            Self::from_spec(&spec)
        } else {
            contents.parse()
        }
    }

    /// Build a grid from a structured description.
    pub fn from_spec(spec: &GridSpec) -> Result<Self> {
        let mut grid = Self::new(spec.rows, spec.cols)?;
        let layers = [
            (Cell::Wall, &spec.walls),
            (Cell::Fire, &spec.fires),
            (Cell::Smoke, &spec.smoke),
            (Cell::Exit, &spec.exits),
            (Cell::Person, &spec.people),
        ];
        for (cell, positions) in layers {
            for &pos in positions {
                grid.place(pos, cell)?;
            }
        }
        Ok(grid)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.cols + pos.col)
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parse a text layout: one row per line, glyphs optionally separated by
    /// whitespace. Blank lines are skipped; exits and people register in
    /// row-major order.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<Vec<Cell>> = Vec::new();
        let mut expected_width: Option<usize> = None;

        for (line_idx, line) in s.lines().enumerate() {
            let line_no = line_idx + 1;
            let mut row = Vec::new();
            for (col_idx, glyph) in line.chars().enumerate() {
                if glyph.is_whitespace() {
                    continue;
                }
                let cell = Cell::from_glyph(glyph).ok_or(Error::UnknownCellGlyph {
                    glyph,
                    line: line_no,
                    column: col_idx + 1,
                })?;
                row.push(cell);
            }
            if row.is_empty() {
                continue;
            }

            match expected_width {
                Some(expected) if expected != row.len() => {
                    return Err(Error::RaggedLayout {
                        line: line_no,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
                None => expected_width = Some(row.len()),
            }
            rows.push(row);
        }

        let mut grid = Grid::new(rows.len(), expected_width.unwrap_or(0))?;
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                if cell != Cell::Empty {
                    grid.place(Position::new(r, c), cell)?;
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line = row
                .iter()
                .map(|cell| cell.glyph().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Serialisable description of a grid. Tags are applied layer by layer in
/// field order, so a later layer overwrites an earlier one at the same position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub walls: Vec<Position>,
    #[serde(default)]
    pub fires: Vec<Position>,
    #[serde(default)]
    pub smoke: Vec<Position>,
    #[serde(default)]
    pub exits: Vec<Position>,
    #[serde(default)]
    pub people: Vec<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(
            Grid::new(0, 3),
            Err(Error::EmptyGrid { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let overflowing = GridSpec {
            rows: usize::MAX / 2,
            cols: 4,
            ..GridSpec::default()
        };
        assert!(matches!(
            Grid::from_spec(&overflowing),
            Err(Error::GridTooLarge { cols: 4, .. })
        ));

        // Fits in usize but exceeds the maximum allocation size.
        assert!(matches!(
            Grid::new(usize::MAX / 4, 3),
            Err(Error::GridTooLarge { .. })
        ));
    }

    #[test]
    fn walkability_follows_cell_tags() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.add_wall(pos(0, 0)).unwrap();
        grid.add_fire(pos(0, 1)).unwrap();
        grid.add_smoke(pos(0, 2)).unwrap();
        grid.add_exit(pos(1, 0)).unwrap();
        grid.add_person(pos(1, 1)).unwrap();

        assert!(!grid.is_walkable(pos(0, 0)));
        assert!(!grid.is_walkable(pos(0, 1)));
        assert!(grid.is_walkable(pos(0, 2)));
        assert!(grid.is_walkable(pos(1, 0)));
        assert!(grid.is_walkable(pos(1, 1)));
        assert!(grid.is_walkable(pos(1, 2)));
        assert!(!grid.is_walkable(pos(2, 0)));
        assert!(!grid.is_walkable(pos(1, 3)));
    }

    #[test]
    fn placement_outside_grid_fails() {
        let mut grid = Grid::new(2, 2).unwrap();
        let err = grid.add_fire(pos(2, 0)).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
        assert!(grid.fire_cells().is_empty());
    }

    #[test]
    fn overwriting_an_exit_keeps_the_index_entry() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.add_exit(pos(0, 1)).unwrap();
        grid.add_wall(pos(0, 1)).unwrap();

        assert_eq!(grid.exits(), &[pos(0, 1)]);
        assert_eq!(grid.cell(pos(0, 1)), Some(Cell::Wall));
        assert!(!grid.is_walkable(pos(0, 1)));
    }

    #[test]
    fn neighbours_are_ordered_and_filtered() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_wall(pos(1, 2)).unwrap();

        let around_centre: Vec<_> = grid.neighbours(pos(1, 1)).collect();
        assert_eq!(around_centre, vec![pos(2, 1), pos(0, 1), pos(1, 0)]);

        let corner: Vec<_> = grid.neighbours(pos(0, 0)).collect();
        assert_eq!(corner, vec![pos(1, 0), pos(0, 1)]);
    }

    #[test]
    fn layout_round_trips_through_display() {
        let layout = "P . S\n# F .\n. . E\n";
        let grid: Grid = layout.parse().unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.people(), &[pos(0, 0)]);
        assert_eq!(grid.exits(), &[pos(2, 2)]);
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn compact_layout_accepts_numeric_glyphs() {
        let grid: Grid = "\n0E\n1P\n\n".parse().unwrap();
        assert_eq!(grid.cell(pos(0, 0)), Some(Cell::Empty));
        assert_eq!(grid.cell(pos(1, 0)), Some(Cell::Wall));
        assert_eq!(grid.exits(), &[pos(0, 1)]);
    }

    #[test]
    fn layout_reports_unknown_glyph_location() {
        let err = "..\n.x".parse::<Grid>().unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownCellGlyph {
                glyph: 'x',
                line: 2,
                column: 2
            }
        ));
    }

    #[test]
    fn layout_rejects_ragged_rows() {
        let err = "...\n..".parse::<Grid>().unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedLayout {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn spec_layers_apply_in_field_order() {
        let spec = GridSpec {
            rows: 2,
            cols: 2,
            smoke: vec![pos(0, 0)],
            exits: vec![pos(1, 1), pos(0, 0)],
            ..GridSpec::default()
        };
        let grid = Grid::from_spec(&spec).unwrap();
        assert_eq!(grid.cell(pos(0, 0)), Some(Cell::Exit));
        assert_eq!(grid.exits(), &[pos(1, 1), pos(0, 0)]);
    }

    #[test]
    fn position_parses_with_or_without_parentheses() {
        assert_eq!("3,4".parse::<Position>().unwrap(), pos(3, 4));
        assert_eq!("(7, 0)".parse::<Position>().unwrap(), pos(7, 0));
        assert!("7".parse::<Position>().is_err());
        assert!("a,1".parse::<Position>().is_err());
    }
}
