use std::fmt;

use crate::{
    data::{CellRef, CellState},
    error::Result,
    logic::Game,
};

/// A single mutation applied to a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reveal(CellRef),
    Flag(CellRef),
    Question(CellRef),
    Reset(CellRef),
    Resign,
}

impl Command {
    /// The cell command that moves `at` into `state`.
    pub fn mark(at: CellRef, state: CellState) -> Self {
        match state {
            CellState::Default => Self::Reset(at),
            CellState::Flagged => Self::Flag(at),
            CellState::Questioned => Self::Question(at),
            CellState::Revealed => Self::Reveal(at),
        }
    }

    pub fn apply(&self, game: &mut Game) -> Result<()> {
        match *self {
            Self::Reveal(at) => game.update_cell(at, CellState::Revealed),
            Self::Flag(at) => game.update_cell(at, CellState::Flagged),
            Self::Question(at) => game.update_cell(at, CellState::Questioned),
            Self::Reset(at) => game.update_cell(at, CellState::Default),
            Self::Resign => game.end(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reveal(at) => write!(f, "reveal {at}"),
            Self::Flag(at) => write!(f, "flag {at}"),
            Self::Question(at) => write!(f, "question {at}"),
            Self::Reset(at) => write!(f, "reset {at}"),
            Self::Resign => f.write_str("resign"),
        }
    }
}
