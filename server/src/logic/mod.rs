use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    data::{Board, Cell, CellRef, CellState, GameId, GameState},
    error::{BoardError, Result, SweeperError},
    generator::{IdGenerator, NumberGenerator},
};

/// One game of minesweeper.
///
/// A `Game` only changes through [`Game::update_cell`] and [`Game::end`], so
/// mine placement and neighbour counts stay fixed after creation and a
/// revealed cell never goes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    state: GameState,
    board: Board,
    cells: Vec<Cell>,
}

fn validate_board(board: &Board) -> std::result::Result<(), BoardError> {
    if board.height == 0 || board.width == 0 {
        return Err(BoardError::InvalidDimensions {
            height: board.height,
            width: board.width,
        });
    }
    let size = board
        .checked_size()
        .ok_or(BoardError::InvalidDimensions {
            height: board.height,
            width: board.width,
        })?;
    if board.mines == 0 {
        return Err(BoardError::NoMines);
    }
    if board.mines >= size {
        return Err(BoardError::NoFreeSpace {
            mines: board.mines,
            size,
        });
    }
    Ok(())
}

fn draw(board: &Board, numbers: &dyn NumberGenerator) -> CellRef {
    CellRef {
        row: numbers.below(board.height),
        column: numbers.below(board.width),
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        warn!("Game creation cancelled");
        return Err(SweeperError::Cancelled);
    }
    Ok(())
}

impl Game {
    /// Lays out a new board and opens one safe cell on it.
    ///
    /// Mines are placed by rejection sampling, so a hostile or unlucky
    /// generator can keep this busy for a long time; `cancel` is checked
    /// before every draw.
    #[instrument(level = "trace", skip(cancel, ids, numbers))]
    pub fn new(
        cancel: &CancellationToken,
        ids: &dyn IdGenerator,
        numbers: &dyn NumberGenerator,
        board: Board,
    ) -> Result<Self> {
        validate_board(&board)?;

        let mut game = Self {
            id: ids.generate(),
            state: GameState::Ongoing,
            board,
            cells: vec![Cell::default(); board.size()],
        };

        game.place_mines(cancel, numbers)?;
        game.count_neighbouring_mines();

        let opening = game.draw_safe_cell(cancel, numbers)?;
        let revealed = game.reveal_cell(opening);

        info!(
            "Created game {}: {}x{} with {} mines, opened {} revealing {} cells",
            game.id, board.width, board.height, board.mines, opening, revealed
        );
        Ok(game)
    }

    fn place_mines(
        &mut self,
        cancel: &CancellationToken,
        numbers: &dyn NumberGenerator,
    ) -> Result<()> {
        let mut placed = 0;
        let mut rejected = 0usize;

        while placed < self.board.mines {
            check_cancelled(cancel)?;

            let at = draw(&self.board, numbers);
            let cell = &mut self.cells[self.board.index(at)];
            if cell.contains_mine {
                rejected += 1;
                continue;
            }
            cell.contains_mine = true;
            placed += 1;
        }

        debug!("Placed {} mines, rejected {} draws", placed, rejected);
        Ok(())
    }

    fn count_neighbouring_mines(&mut self) {
        for index in 0..self.cells.len() {
            let at = self.board.cell_ref(index);
            let count = self
                .board
                .neighbours(at)
                .filter(|&neighbour| self.cells[self.board.index(neighbour)].contains_mine)
                .count();
            self.cells[index].neighbouring_mines = count as u8;
        }
    }

    fn draw_safe_cell(
        &self,
        cancel: &CancellationToken,
        numbers: &dyn NumberGenerator,
    ) -> Result<CellRef> {
        loop {
            check_cancelled(cancel)?;

            let at = draw(&self.board, numbers);
            if !self.cells[self.board.index(at)].contains_mine {
                return Ok(at);
            }
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        if !self.board.contains(at) {
            return None;
        }
        self.cells.get(self.board.index(at))
    }

    /// Every cell with its coordinate, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.board.cell_ref(index), cell))
    }

    /// The cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.board.width)
    }

    /// Reveals `start` and, while zero-count cells keep turning up, their
    /// neighbours. Returns how many cells changed.
    ///
    /// Hitting a mine loses the game and stops immediately.
    fn reveal_cell(&mut self, start: CellRef) -> usize {
        let mut pending = vec![start];
        let mut revealed = 0;

        while let Some(at) = pending.pop() {
            let cell = &mut self.cells[self.board.index(at)];
            if cell.state == CellState::Revealed {
                continue;
            }

            cell.state = CellState::Revealed;
            revealed += 1;

            if cell.contains_mine {
                warn!("Game {} hit a mine at {} - game over!", self.id, at);
                self.state = GameState::Lost;
                return revealed;
            }

            if cell.neighbouring_mines != 0 {
                continue;
            }

            for neighbour in self.board.neighbours(at) {
                if self.cells[self.board.index(neighbour)].state != CellState::Revealed {
                    pending.push(neighbour);
                }
            }
        }

        revealed
    }

    /// Victory is obtained by revealing every safe cell or by flagging every
    /// mine without any false flags.
    fn try_win(&mut self) {
        if self.state.is_terminal() {
            return;
        }

        let mut flagged_total = 0;
        let mut flagged_correct = 0;
        let mut revealed = 0;

        for cell in &self.cells {
            match cell.state {
                CellState::Flagged => {
                    flagged_total += 1;
                    if cell.contains_mine {
                        flagged_correct += 1;
                    }
                }
                CellState::Revealed => revealed += 1,
                CellState::Default | CellState::Questioned => {}
            }
        }

        if flagged_total == flagged_correct && flagged_correct == self.board.mines {
            info!("Game {} won! All mines flagged.", self.id);
            self.state = GameState::Won;
        } else if revealed == self.board.safe_cells() {
            info!("Game {} won! All safe cells revealed.", self.id);
            self.state = GameState::Won;
        }
    }

    /// Moves the cell at `at` into `requested`, then checks for a win.
    ///
    /// `Default`, `Flagged` and `Questioned` only relabel an unrevealed cell.
    /// `Revealed` opens it, flooding through zero-count regions or losing the
    /// game on a mine. Nothing changes when an error is returned.
    #[instrument(level = "trace", skip(self), fields(game_id = %self.id))]
    pub fn update_cell(&mut self, at: CellRef, requested: CellState) -> Result<()> {
        if self.state.is_terminal() {
            debug!("Ignoring move on finished game at {}", at);
            return Err(SweeperError::GameFinished);
        }

        if !self.board.contains(at) {
            warn!("Invalid position: {}", at);
            return Err(SweeperError::OutOfBounds(at));
        }

        let index = self.board.index(at);
        match requested {
            CellState::Default | CellState::Flagged | CellState::Questioned => {
                let cell = &mut self.cells[index];
                if cell.state == CellState::Revealed {
                    return Err(SweeperError::AlreadyRevealed);
                }
                debug!("Cell {} {:?} -> {:?}", at, cell.state, requested);
                cell.state = requested;
            }
            CellState::Revealed => {
                if self.cells[index].state == CellState::Flagged {
                    return Err(SweeperError::Flagged);
                }
                let revealed = self.reveal_cell(at);
                debug!("Revealing {} opened {} cells", at, revealed);
            }
        }

        self.try_win();
        Ok(())
    }

    /// Resigns the game.
    #[instrument(level = "trace", skip(self), fields(game_id = %self.id))]
    pub fn end(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(SweeperError::GameFinished);
        }
        info!("Game {} resigned", self.id);
        self.state = GameState::Resigned;
        Ok(())
    }
}
