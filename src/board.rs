//! Hex board state, move execution and win detection.
//!
//! Cells are addressed by `(row, col)`, both 0-indexed. The board is a rhombus:
//! row `r` is drawn shifted right by `r` half-cells, which gives every interior
//! cell the six neighbors listed in [`HEX_OFFSETS`].
//!
//! Blue moves first and wins by joining the west and east edges (column `0` to
//! column `dim - 1`). Red wins by joining the north and south edges.

use std::fmt;

use crate::constants::HEX_OFFSETS;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// First player, connects west to east.
    Blue,
    /// Second player, connects north to south.
    Red,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Upper-case name used in console output.
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "BLUE",
            Color::Red => "RED",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cell on the board as `(row, col)`.
pub type Cell = (usize, usize);

/// Reasons a board operation can be refused.
///
/// `Occupied` is the ordinary "try again" case for user input. The other
/// variants signal a caller bug; they are returned rather than panicking so a
/// single misuse cannot take down a running search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("board size must be at least 1")]
    InvalidSize,

    #[error("cell ({row}, {col}) is off a {dim}x{dim} board")]
    OutOfBounds { row: usize, col: usize, dim: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cannot undo ({row}, {col}): cell is empty")]
    NotOccupied { row: usize, col: usize },

    #[error("cannot undo ({row}, {col}): it is not the most recent move")]
    OutOfOrder { row: usize, col: usize },

    #[error("no empty cells left")]
    BoardFull,
}

/// A Hex position.
///
/// Cloning produces a fully independent copy; playouts rely on this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    /// Stone per cell in row-major order, `None` = empty
    cells: Vec<Option<Color>>,
    /// Empty cells, kept sorted in row-major order
    unoccupied: Vec<Cell>,
    /// Occupied cells in the order they were filled
    history: Vec<Cell>,
    to_move: Color,
}

impl Board {
    /// Create an empty `dim` x `dim` board with Blue to move.
    pub fn new(dim: usize) -> Self {
        let unoccupied = (0..dim)
            .flat_map(|r| (0..dim).map(move |c| (r, c)))
            .collect();
        Self {
            dim,
            cells: vec![None; dim * dim],
            unoccupied,
            history: Vec::with_capacity(dim * dim),
            to_move: Color::Blue,
        }
    }

    /// Like [`Board::new`], but rejects a zero size.
    pub fn try_new(dim: usize) -> Result<Self, MoveError> {
        if dim == 0 {
            return Err(MoveError::InvalidSize);
        }
        Ok(Self::new(dim))
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The color whose stone goes down next.
    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Empty cells in ascending row-major order.
    #[inline]
    pub fn unoccupied(&self) -> &[Cell] {
        &self.unoccupied
    }

    /// Occupied cells, oldest first.
    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    pub fn is_full(&self) -> bool {
        self.unoccupied.is_empty()
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.dim && col < self.dim
    }

    /// Stone at `cell`, or `None` if the cell is empty or off the board.
    pub fn get(&self, cell: Cell) -> Option<Color> {
        if !self.in_bounds(cell.0, cell.1) {
            return None;
        }
        self.cells[self.idx(cell)]
    }

    #[inline]
    fn idx(&self, (row, col): Cell) -> usize {
        row * self.dim + col
    }

    fn checked_idx(&self, (row, col): Cell) -> Result<usize, MoveError> {
        if !self.in_bounds(row, col) {
            return Err(MoveError::OutOfBounds {
                row,
                col,
                dim: self.dim,
            });
        }
        Ok(self.idx((row, col)))
    }

    /// The on-board hex neighbors of `cell`.
    ///
    /// Interior cells have 6, edge cells 4, the obtuse corners `(0, dim-1)` and
    /// `(dim-1, 0)` have 3, the acute corners `(0, 0)` and `(dim-1, dim-1)` 2.
    pub fn neighbors(&self, (row, col): Cell) -> impl Iterator<Item = Cell> + '_ {
        HEX_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// Place a stone for the player to move.
    ///
    /// On error the board is left untouched.
    pub fn apply_move(&mut self, cell: Cell) -> Result<(), MoveError> {
        let idx = self.checked_idx(cell)?;
        if self.cells[idx].is_some() {
            return Err(MoveError::Occupied {
                row: cell.0,
                col: cell.1,
            });
        }

        self.cells[idx] = Some(self.to_move);
        if let Ok(pos) = self.unoccupied.binary_search(&cell) {
            self.unoccupied.remove(pos);
        }
        self.history.push(cell);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Take back the most recent stone, which must be at `cell`.
    ///
    /// Moves and undos must nest like a stack. On error the board is left
    /// untouched.
    pub fn undo_move(&mut self, cell: Cell) -> Result<(), MoveError> {
        let idx = self.checked_idx(cell)?;
        let (row, col) = cell;
        if self.cells[idx].is_none() {
            return Err(MoveError::NotOccupied { row, col });
        }
        if self.history.last() != Some(&cell) {
            return Err(MoveError::OutOfOrder { row, col });
        }

        self.cells[idx] = None;
        self.history.pop();
        let pos = self.unoccupied.binary_search(&cell).unwrap_or_else(|p| p);
        self.unoccupied.insert(pos, cell);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Does `color` have a chain joining its two edges?
    ///
    /// Depth-first search with an explicit stack, seeded from every stone of
    /// `color` on its starting edge (west for Blue, north for Red). The visited
    /// set is shared between seeds: a seed that fails exhausts its whole
    /// component, so nothing it touched can succeed from another seed.
    pub fn is_won(&self, color: Color) -> bool {
        let n = self.dim;
        let mut visited = vec![false; n * n];
        let mut stack = Vec::with_capacity(n * n);

        for i in 0..n {
            let seed = match color {
                Color::Blue => (i, 0),
                Color::Red => (0, i),
            };
            let si = self.idx(seed);
            if visited[si] || self.cells[si] != Some(color) {
                continue;
            }
            visited[si] = true;
            stack.push(seed);

            while let Some(cell) = stack.pop() {
                if self.on_goal_edge(cell, color) {
                    return true;
                }
                for nb in self.neighbors(cell) {
                    let ni = self.idx(nb);
                    if !visited[ni] && self.cells[ni] == Some(color) {
                        visited[ni] = true;
                        stack.push(nb);
                    }
                }
            }
        }

        false
    }

    /// Is `cell` on the edge `color` is trying to reach?
    #[inline]
    fn on_goal_edge(&self, (row, col): Cell, color: Color) -> bool {
        match color {
            Color::Blue => col + 1 == self.dim,
            Color::Red => row + 1 == self.dim,
        }
    }

    /// The connected color, if any.
    pub fn winner(&self) -> Option<Color> {
        [Color::Blue, Color::Red]
            .into_iter()
            .find(|&c| self.is_won(c))
    }

    /// Fill every empty cell, alternating colors from the player to move, in a
    /// uniformly random order.
    ///
    /// Hex cannot end in a draw, so afterwards exactly one color has won.
    pub fn random_complete(&mut self, rng: &mut fastrand::Rng) {
        if self.unoccupied.is_empty() {
            return;
        }

        let mut order = std::mem::take(&mut self.unoccupied);
        rng.shuffle(&mut order);

        for cell in order {
            let idx = self.idx(cell);
            self.cells[idx] = Some(self.to_move);
            self.history.push(cell);
            self.to_move = self.to_move.opponent();
        }
    }
}

/// Draws the board as a slanted lattice:
///
/// ```text
/// . - . - .
///  \ / \ / \
///   . - . - .
///    \ / \ / \
///     . - . - .
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.dim {
            let indent = r * 2;
            write!(f, "{:indent$}", "")?;
            for c in 0..self.dim {
                let ch = match self.cells[self.idx((r, c))] {
                    Some(Color::Blue) => 'B',
                    Some(Color::Red) => 'R',
                    None => '.',
                };
                if c + 1 < self.dim {
                    write!(f, "{ch} - ")?;
                } else {
                    writeln!(f, "{ch}")?;
                }
            }

            if r + 1 < self.dim {
                write!(f, "{:width$}\\", "", width = indent + 1)?;
                for _ in 1..self.dim {
                    write!(f, " / \\")?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{} to move", self.to_move)
    }
}
