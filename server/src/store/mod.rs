//! Game storage.
//!
//! A store owns the authoritative copy of every game. Callers only ever get
//! clones back; the one way to change a stored game is [`Store::mutate`],
//! which applies a [`Command`] to a working copy under exclusive access and
//! commits it only if the command succeeds.

use std::str::FromStr;

use crate::{command::Command, data::GameId, error::Result, logic::Game};

mod memory;
mod sharded;

pub use memory::MemoryStore;
pub use sharded::ShardedStore;

pub trait Store: Send + Sync {
    /// Stores `game`, replacing any game with the same id.
    fn save(&self, game: Game) -> Result<()>;

    /// Returns a snapshot of the game, never one with a mutation half applied.
    fn get(&self, id: GameId) -> Result<Game>;

    /// Applies `command` atomically and returns the committed game.
    ///
    /// Mutations on the same game are serialized. When the command fails the
    /// stored game is left untouched and the error is wrapped in
    /// [`SweeperError::MutatorFailure`](crate::error::SweeperError::MutatorFailure).
    fn mutate(&self, id: GameId, command: &Command) -> Result<Game>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// [`MemoryStore`]: one lock for the whole table.
    Memory,
    /// [`ShardedStore`]: one lock per game.
    Sharded,
}

impl StoreKind {
    pub fn build(self) -> Box<dyn Store> {
        match self {
            Self::Memory => Box::new(MemoryStore::new()),
            Self::Sharded => Box::new(ShardedStore::new()),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sharded" => Ok(Self::Sharded),
            other => Err(format!("unknown store kind: {other}")),
        }
    }
}
