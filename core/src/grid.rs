use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write as _};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest horizontal run that counts as a match.
pub const MIN_RUN: usize = 2;

/// Maximal horizontal run of same-kind, non-empty cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub row: Coord,
    pub start: Coord,
    pub len: usize,
    pub kind: CellKind,
}

impl Match {
    /// One past the last column of the run.
    pub fn end(&self) -> Coord {
        self.start + self.len as Coord
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let row = self.row;
        (self.start..self.end()).map(move |x| (x, row))
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}, type={}, length={}",
            self.row, self.kind, self.len
        )
    }
}

/// Fixed-size board of cells, stored row-major as `[row, col]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Creates a board where every cell is empty.
    pub fn new(width: Dim, height: Dim) -> Result<Self> {
        if !(1..=GameConfig::MAX_SIZE).contains(&width)
            || !(1..=GameConfig::MAX_SIZE).contains(&height)
        {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self {
            cells: Array2::default([usize::from(height), usize::from(width)]),
        })
    }

    /// Parses a board from one string per row, whitespace ignored, see [`CellKind::from_label`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let labels = |row: &S| {
            row.as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<Vec<_>>()
        };

        let height = rows.len();
        let width = rows.first().map(|row| labels(row).len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let max = usize::from(GameConfig::MAX_SIZE);
        if width > max || height > max {
            return Err(GameError::InvalidDimensions);
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let row = labels(row);
            if row.len() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for label in row {
                let kind = CellKind::from_label(label).ok_or(GameError::InvalidCellLabel(label))?;
                cells.push(Cell::new(kind));
            }
        }

        let cells = Array2::from_shape_vec((height, width), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn width(&self) -> Dim {
        self.cells.ncols() as Dim
    }

    pub fn height(&self) -> Dim {
        self.cells.nrows() as Dim
    }

    pub fn size(&self) -> Size2 {
        (self.width(), self.height())
    }

    pub fn is_valid_coord(&self, x: Coord, y: Coord) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => x < self.cells.ncols() && y < self.cells.nrows(),
            _ => false,
        }
    }

    /// Returns the storage index `[row, col]` for in-range coordinates.
    pub fn validate_coords(&self, coords: Coord2) -> Result<[usize; 2]> {
        if self.is_valid_coord(coords.0, coords.1) {
            Ok([coords.1 as usize, coords.0 as usize])
        } else {
            Err(GameError::CoordinateOutOfRange(coords))
        }
    }

    pub fn cell(&self, x: Coord, y: Coord) -> Option<Cell> {
        self.validate_coords((x, y)).ok().map(|index| self.cells[index])
    }

    /// Iterates over every cell with its coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Exchanges two cells, adjacency is not checked here.
    pub fn swap_cells(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let index_a = self.validate_coords(a)?;
        let index_b = self.validate_coords(b)?;
        self.cells.swap(index_a, index_b);
        log::debug!("Swapped cells {:?} and {:?}", a, b);
        Ok(())
    }

    /// Resets the whole board to empty cells.
    pub fn fill_empty_cells(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Gives every empty cell a fresh kind, returns how many cells were filled.
    pub fn fill_full_cells<G: KindGenerator + ?Sized>(&mut self, generator: &mut G) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_empty()) {
            *cell = Cell::new(generator.next_kind());
            filled += 1;
        }
        log::trace!("Refilled {} cells", filled);
        filled
    }

    pub fn find_matches(&self) -> Vec<Match> {
        let mut matches = Vec::new();

        for (y, row) in self.cells.rows().into_iter().enumerate() {
            let mut run_kind = CellKind::Empty;
            let mut run_start = 0;
            let mut run_len = 0;

            for (x, cell) in row.iter().enumerate() {
                if cell.status() == run_kind && !run_kind.is_empty() {
                    run_len += 1;
                } else {
                    push_run(&mut matches, y, run_start, run_len, run_kind);
                    run_kind = cell.status();
                    run_start = x;
                    run_len = 1;
                }
            }
            push_run(&mut matches, y, run_start, run_len, run_kind);
        }

        matches
    }

    /// Empties every named cell, coordinates outside the board are skipped.
    pub fn remove_matches<I: IntoIterator<Item = Coord2>>(&mut self, coords: I) -> usize {
        let mut cleared = 0;
        for coords in coords {
            let Ok(index) = self.validate_coords(coords) else {
                log::trace!("Skipping out of range cell {:?}", coords);
                continue;
            };
            if !self.cells[index].is_empty() {
                cleared += 1;
            }
            self.cells[index] = Cell::EMPTY;
            log::trace!("Cleared cell {:?}", coords);
        }
        cleared
    }

    pub fn generate_grid_string(&self) -> String {
        self.to_string()
    }

    fn write_border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("    +")?;
        for _ in 0..self.cells.ncols() {
            f.write_str("-----+")?;
        }
        f.write_char('\n')
    }
}

fn push_run(matches: &mut Vec<Match>, row: usize, start: usize, len: usize, kind: CellKind) {
    if len >= MIN_RUN && !kind.is_empty() {
        matches.push(Match {
            row: row as Coord,
            start: start as Coord,
            len,
            kind,
        });
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("    ")?;
        for x in 0..self.cells.ncols() {
            write!(f, " {x:^5}")?;
        }
        f.write_char('\n')?;
        self.write_border(f)?;

        for (y, row) in self.cells.rows().into_iter().enumerate() {
            write!(f, "{y:>3} |")?;
            for cell in row.iter() {
                write!(f, " {:<4}|", cell)?;
            }
            f.write_char('\n')?;
            self.write_border(f)?;
        }
        Ok(())
    }
}
