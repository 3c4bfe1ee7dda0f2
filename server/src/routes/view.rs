use sweeper_common::models::{self, BoardParams, GameStatus, GameView, Pos};

use crate::{
    data::{Board, Cell, CellRef, CellState, GameState},
    logic::Game,
};

impl From<&Cell> for models::Cell {
    fn from(value: &Cell) -> Self {
        match value.state {
            CellState::Default => Self::Hidden,
            CellState::Questioned => Self::Questioned,
            CellState::Flagged => Self::Flagged,
            CellState::Revealed if value.contains_mine => Self::Mine,
            CellState::Revealed => Self::Revealed {
                adjacent: value.neighbouring_mines,
            },
        }
    }
}

impl From<GameState> for GameStatus {
    fn from(value: GameState) -> Self {
        match value {
            GameState::Ongoing => Self::Ongoing,
            GameState::Won => Self::Won,
            GameState::Lost => Self::Lost,
            GameState::Resigned => Self::Resigned,
        }
    }
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        let board = game.board();
        Self {
            id: game.id(),
            status: game.state().into(),
            board: BoardParams {
                width: board.width,
                height: board.height,
                mines: board.mines,
            },
            field: game
                .rows()
                .map(|row| row.iter().map(models::Cell::from).collect())
                .collect(),
        }
    }
}

impl From<BoardParams> for Board {
    fn from(params: BoardParams) -> Self {
        Self {
            width: params.width,
            height: params.height,
            mines: params.mines,
        }
    }
}

impl From<Pos> for CellRef {
    fn from(pos: Pos) -> Self {
        Self::new(pos.row, pos.column)
    }
}
