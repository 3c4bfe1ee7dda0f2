use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, instrument};

use super::Store;
use crate::{
    command::Command,
    data::GameId,
    error::{Result, SweeperError},
    logic::Game,
};

/// Every game behind a single table-wide read/write lock.
///
/// Reads run in parallel; a save or mutation holds the whole table for the
/// length of its read-modify-write, even when other callers touch unrelated
/// games. [`ShardedStore`](super::ShardedStore) lifts that restriction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    #[instrument(level = "trace", skip(self, game), fields(game_id = %game.id()))]
    fn save(&self, game: Game) -> Result<()> {
        self.games.write().insert(game.id(), game);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    fn get(&self, id: GameId) -> Result<Game> {
        self.games
            .read()
            .get(&id)
            .cloned()
            .ok_or(SweeperError::NotFound(id))
    }

    #[instrument(level = "trace", skip(self), fields(command = %command))]
    fn mutate(&self, id: GameId, command: &Command) -> Result<Game> {
        let mut games = self.games.write();
        let stored = games.get_mut(&id).ok_or(SweeperError::NotFound(id))?;

        let mut game = stored.clone();
        if let Err(err) = command.apply(&mut game) {
            debug!("Command {} rejected for game {}: {}", command, id, err);
            return Err(SweeperError::mutator(err));
        }

        *stored = game.clone();
        Ok(game)
    }
}
