use std::fmt;

use uuid::Uuid;

pub type GameId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl Board {
    /// Number of cells, or `None` when it does not fit in a `usize`.
    pub fn checked_size(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Number of cells. Saturates for boards too large to address, which
    /// validation rejects before any game is built on them.
    pub fn size(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of cells that don't contain a mine.
    pub fn safe_cells(&self) -> usize {
        self.size() - self.mines
    }

    pub fn contains(&self, at: CellRef) -> bool {
        at.row < self.height && at.column < self.width
    }

    /// Row-major index of an in-bounds reference.
    pub(crate) fn index(&self, at: CellRef) -> usize {
        at.row * self.width + at.column
    }

    pub(crate) fn cell_ref(&self, index: usize) -> CellRef {
        CellRef {
            row: index / self.width,
            column: index % self.width,
        }
    }

    /// The up-to-8 in-bounds neighbours of `at`.
    pub fn neighbours(&self, at: CellRef) -> impl Iterator<Item = CellRef> + use<> {
        let board = *self;
        (-1isize..=1)
            .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
            .filter(|&delta| delta != (0, 0))
            .filter_map(move |(dr, dc)| {
                let neighbour = CellRef {
                    row: at.row.checked_add_signed(dr)?,
                    column: at.column.checked_add_signed(dc)?,
                };
                board.contains(neighbour).then_some(neighbour)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// No modifiers.
    #[default]
    Default,
    /// Marked as containing a mine; cannot be revealed until cleared.
    Flagged,
    /// Marked as possibly containing a mine; can still be revealed.
    Questioned,
    Revealed,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cell {
    pub contains_mine: bool,
    pub neighbouring_mines: u8,
    pub state: CellState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Ongoing,
    Won,
    Lost,
    Resigned,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}
