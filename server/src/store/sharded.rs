use std::sync::Arc;

use dashmap::{DashMap, Entry};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use super::Store;
use crate::{
    command::Command,
    data::GameId,
    error::{Result, SweeperError},
    logic::Game,
};

/// Games in a concurrent map, each behind its own mutex.
///
/// Reads and mutations hold the map shard lock only long enough to clone the
/// entry's handle, so callers working on different games never wait on each
/// other. A save over an existing id writes through that entry's mutex. Calls on
/// the same game queue on its mutex, which readers take too: a read can never
/// see a command half way through.
#[derive(Debug, Default)]
pub struct ShardedStore {
    games: DashMap<GameId, Arc<Mutex<Game>>>,
}

impl ShardedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: GameId) -> Result<Arc<Mutex<Game>>> {
        self.games
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(SweeperError::NotFound(id))
    }
}

impl Store for ShardedStore {
    #[instrument(level = "trace", skip(self, game), fields(game_id = %game.id()))]
    fn save(&self, game: Game) -> Result<()> {
        match self.games.entry(game.id()) {
            // Overwrite behind the existing mutex so a mutation already
            // holding this entry's handle commits to the live game.
            Entry::Occupied(entry) => *entry.get().lock() = game,
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(game)));
            }
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    fn get(&self, id: GameId) -> Result<Game> {
        let entry = self.entry(id)?;
        let game = entry.lock().clone();
        Ok(game)
    }

    #[instrument(level = "trace", skip(self), fields(command = %command))]
    fn mutate(&self, id: GameId, command: &Command) -> Result<Game> {
        let entry = self.entry(id)?;
        let mut stored = entry.lock();

        let mut game = stored.clone();
        if let Err(err) = command.apply(&mut game) {
            debug!("Command {} rejected for game {}: {}", command, id, err);
            return Err(SweeperError::mutator(err));
        }

        *stored = game.clone();
        Ok(game)
    }
}
