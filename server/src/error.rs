use thiserror::Error;

use crate::data::{CellRef, GameId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions ({height}x{width})")]
    InvalidDimensions { height: usize, width: usize },
    #[error("board must have at least 1 mine")]
    NoMines,
    #[error("board must have at least 1 free space ({mines} mines on {size} cells)")]
    NoFreeSpace { mines: usize, size: usize },
    #[error("board of {size} cells exceeds the limit of {max}")]
    TooLarge { size: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SweeperError {
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("selection {0} is out of bounds")]
    OutOfBounds(CellRef),
    #[error("cell is already revealed")]
    AlreadyRevealed,
    #[error("cell is flagged")]
    Flagged,
    #[error("game is finished")]
    GameFinished,
    #[error("game {0} not found")]
    NotFound(GameId),
    #[error("game creation was cancelled")]
    Cancelled,
    #[error("error in mutator: {0}")]
    MutatorFailure(#[source] Box<SweeperError>),
}

/// Classification of a [`SweeperError`] that sees through store wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidBoard,
    OutOfBounds,
    AlreadyRevealed,
    Flagged,
    GameFinished,
    NotFound,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBoard => "invalid_board",
            Self::OutOfBounds => "out_of_bounds",
            Self::AlreadyRevealed => "already_revealed",
            Self::Flagged => "flagged",
            Self::GameFinished => "game_finished",
            Self::NotFound => "not_found",
            Self::Cancelled => "cancelled",
        }
    }
}

impl SweeperError {
    pub(crate) fn mutator(source: SweeperError) -> Self {
        Self::MutatorFailure(Box::new(source))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBoard(_) => ErrorKind::InvalidBoard,
            Self::OutOfBounds(_) => ErrorKind::OutOfBounds,
            Self::AlreadyRevealed => ErrorKind::AlreadyRevealed,
            Self::Flagged => ErrorKind::Flagged,
            Self::GameFinished => ErrorKind::GameFinished,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::MutatorFailure(source) => source.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SweeperError>;
