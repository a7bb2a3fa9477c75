use std::str::FromStr;

use crate::config::GridSize;
use crate::error::LayoutError;

/// Built-in level used when no layout file is given.
pub const DEFAULT_LAYOUT: &str = "\
####################
#........##........#
#.##.###.##.###.##.#
#..................#
#.##.#.######.#.##.#
#....#...P....#....#
####.###.##.###.####
#..................#
#.##.###.##.###.##.#
#........##........#
####################";

/// Grid position in logical cell coordinates (`x` is the column, `y` the row).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position shifted by `(dx, dy)`; the result may leave the grid.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Contents of one grid unit.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Pellet,
}

impl Cell {
    fn from_layout_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Pellet),
            ' ' | '_' => Some(Self::Empty),
            _ => None,
        }
    }
}

/// Row-major board of cells with fixed dimensions.
///
/// Walls are fixed for the lifetime of a grid; only the pellet/empty state of
/// the remaining cells changes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `cell`.
    #[must_use]
    pub fn filled(size: GridSize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the cell at `position`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index_of(position).map(|index| self.cells[index])
    }

    /// Overwrites the cell at `position`. Returns false outside the grid.
    pub fn set(&mut self, position: Position, cell: Cell) -> bool {
        match self.index_of(position) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    /// Returns true when `position` is inside the grid and not a wall.
    #[must_use]
    pub fn is_walkable(&self, position: Position) -> bool {
        matches!(self.cell(position), Some(Cell::Empty | Cell::Pellet))
    }

    /// Counts pellet cells.
    #[must_use]
    pub fn pellet_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Pellet).count()
    }

    #[must_use]
    pub fn has_pellets(&self) -> bool {
        self.cells.contains(&Cell::Pellet)
    }

    /// Turns every non-wall cell back into a pellet, except `except`, which
    /// becomes empty.
    pub fn regenerate_pellets(&mut self, except: Position) {
        for cell in &mut self.cells {
            if *cell == Cell::Empty {
                *cell = Cell::Pellet;
            }
        }
        self.set(except, Cell::Empty);
    }

    /// Iterates over every cell in row-major order together with its position.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = usize::from(self.size.width).max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position {
                x: (index % width) as i32,
                y: (index / width) as i32,
            };
            (position, *cell)
        })
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.size) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.size.width) + x)
    }
}

/// A parsed level: the grid plus where the player starts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layout {
    pub grid: Grid,
    pub start: Position,
}

impl Layout {
    /// Parses an ASCII layout.
    ///
    /// `#` is a wall, `.` a pellet, space or `_` an empty cell, and `P` the
    /// player start (stored as empty). All rows must have the same width.
    /// Zero-length lines before the first row and after the last are ignored;
    /// a line of spaces is a row of empty cells.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        let first_row = lines
            .iter()
            .position(|line| !line.is_empty())
            .unwrap_or(lines.len());
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(first_row, |last| last + 1);
        let rows = &lines[first_row..end];

        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };

        let columns = first.chars().count();
        if columns == 0 {
            return Err(LayoutError::Empty);
        }

        let max = usize::from(u16::MAX);
        if columns > max || rows.len() > max {
            return Err(LayoutError::TooLarge {
                columns,
                rows: rows.len(),
                max,
            });
        }

        let mut cells = Vec::with_capacity(columns * rows.len());
        let mut start = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, ch) in line.chars().enumerate() {
                if ch == 'P' {
                    if start.is_some() {
                        return Err(LayoutError::DuplicateStart { row, column });
                    }
                    start = Some(Position::new(column as i32, row as i32));
                    cells.push(Cell::Empty);
                    continue;
                }

                let cell = Cell::from_layout_char(ch)
                    .ok_or(LayoutError::UnknownCell { row, column, found: ch })?;
                cells.push(cell);
            }
        }

        let start = start.ok_or(LayoutError::MissingStart)?;
        let grid = Grid {
            size: GridSize {
                width: columns as u16,
                height: rows.len() as u16,
            },
            cells,
        };

        if !grid.has_pellets() {
            return Err(LayoutError::NoPellets);
        }

        Ok(Self { grid, start })
    }

    /// Returns the built-in level.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_LAYOUT).expect("built-in layout must always parse")
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
