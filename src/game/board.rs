use super::Player;
use crate::error::BoardError;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 64;

/// Number of aligned pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Row/column steps for horizontal, vertical, diagonal down-right and
/// diagonal down-left lines.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Coordinates `(row, col)` of a four-in-a-row.
pub type Line = [(usize, usize); WIN_LENGTH];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

/// Gravity grid indexed `[row][col]`. Row 0 is the top, row `height - 1` the
/// bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let invalid = BoardError::InvalidDimensions { width, height };
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            return Err(invalid);
        }
        let len = width.checked_mul(height).ok_or(invalid)?;
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; len],
        })
    }

    /// An empty board of the same size
    pub fn cleared(&self) -> Board {
        Board {
            width: self.width,
            height: self.height,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position, `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[self.index(row, col)])
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        self.cells[self.index(0, col)] != Cell::Empty
    }

    /// Lowest empty row in a column, scanning from the bottom up
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[self.index(row, col)] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed. `None` when
    /// the column is full or out of range; the board is left untouched.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Option<usize> {
        let row = self.lowest_empty_row(col)?;
        let idx = self.index(row, col);
        self.cells[idx] = Cell::Occupied(player);
        Some(row)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Check if `player` owns four in a row anywhere on the board
    pub fn has_win(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// Scan every starting cell in every direction and return the first line
    /// of four owned by `player`.
    pub fn winning_line(&self, player: Player) -> Option<Line> {
        let target = Cell::Occupied(player);
        for row in 0..self.height {
            for col in 0..self.width {
                for &(dr, dc) in &DIRECTIONS {
                    let Some(line) = self.line_from(row, col, dr, dc) else {
                        continue;
                    };
                    if line
                        .iter()
                        .all(|&(r, c)| self.cells[self.index(r, c)] == target)
                    {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    /// The four coordinates starting at `(row, col)` along `(dr, dc)`, or
    /// `None` if any of them falls off the board.
    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Line> {
        let mut line = [(0, 0); WIN_LENGTH];
        for (step, slot) in line.iter_mut().enumerate() {
            let r = row.checked_add_signed(dr * step as isize)?;
            let c = col.checked_add_signed(dc * step as isize)?;
            if r >= self.height || c >= self.width {
                return None;
            }
            *slot = (r, c);
        }
        Some(line)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }
}
