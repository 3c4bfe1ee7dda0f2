use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::{
    command::Command,
    data::{Board, CellRef, CellState, GameId},
    error::{BoardError, Result},
    generator::{IdGenerator, NumberGenerator},
    logic::Game,
    store::Store,
};

/// Entry point for everything the transport can do to a game.
///
/// Holds no game state of its own; cloning only copies the shared handles.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn Store>,
    ids: Arc<dyn IdGenerator>,
    numbers: Arc<dyn NumberGenerator>,
    max_cells: Option<usize>,
}

impl Service {
    pub fn new(
        store: Arc<dyn Store>,
        ids: Arc<dyn IdGenerator>,
        numbers: Arc<dyn NumberGenerator>,
    ) -> Self {
        Self {
            store,
            ids,
            numbers,
            max_cells: None,
        }
    }

    /// Refuses boards with more than `max` cells before any of them is
    /// allocated.
    pub fn with_max_cells(mut self, max: usize) -> Self {
        self.max_cells = Some(max);
        self
    }

    #[instrument(level = "trace", skip(self, cancel))]
    pub fn start_game(&self, cancel: &CancellationToken, board: Board) -> Result<Game> {
        if let (Some(max), Some(size)) = (self.max_cells, board.checked_size())
            && size > max
        {
            warn!("Refusing board of {} cells, limit is {}", size, max);
            return Err(BoardError::TooLarge { size, max }.into());
        }

        let game = Game::new(cancel, self.ids.as_ref(), self.numbers.as_ref(), board)
            .inspect_err(|err| warn!("Creating game failed: {}", err))?;

        self.store
            .save(game.clone())
            .inspect_err(|err| warn!("Saving game {} failed: {}", game.id(), err))?;

        Ok(game)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_game(&self, id: GameId) -> Result<Game> {
        self.store.get(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn end_game(&self, id: GameId) -> Result<Game> {
        self.apply(id, Command::Resign)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn make_move(&self, id: GameId, at: CellRef, action: CellState) -> Result<Game> {
        self.apply(id, Command::mark(at, action))
    }

    fn apply(&self, id: GameId, command: Command) -> Result<Game> {
        let game = self
            .store
            .mutate(id, &command)
            .inspect_err(|err| warn!("Applying {} to game {} failed: {}", command, id, err))?;

        if game.state().is_terminal() {
            info!("Game {} is now {:?} after {}", id, game.state(), command);
        }
        Ok(game)
    }
}
