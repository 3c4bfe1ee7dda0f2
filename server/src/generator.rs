//! Sources of identifiers and random numbers injected into game creation.
//!
//! Keeping both behind traits lets the engine stay deterministic under test:
//! [`ScriptedNumbers`] lays out an exact board, [`SeededNumbers`] reproduces
//! a pseudo-random one.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::data::GameId;

pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, globally unique identifier.
    fn generate(&self) -> GameId;
}

pub trait NumberGenerator: Send + Sync {
    /// Returns a number in `[0, bound)`. `bound` is never zero.
    fn below(&self, bound: usize) -> usize;
}

impl<F> IdGenerator for F
where
    F: Fn() -> Uuid + Send + Sync,
{
    fn generate(&self) -> GameId {
        self()
    }
}

impl<F> NumberGenerator for F
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn below(&self, bound: usize) -> usize {
        self(bound)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> GameId {
        Uuid::new_v4()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadNumbers;

impl NumberGenerator for ThreadNumbers {
    fn below(&self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

#[derive(Debug)]
pub struct SeededNumbers {
    rng: Mutex<StdRng>,
}

impl SeededNumbers {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NumberGenerator for SeededNumbers {
    fn below(&self, bound: usize) -> usize {
        self.rng.lock().random_range(0..bound)
    }
}

/// Replays a fixed sequence of draws, then keeps repeating the last one.
///
/// Every value is reduced modulo the requested bound so a script can never
/// produce an out-of-range coordinate.
#[derive(Debug)]
pub struct ScriptedNumbers {
    pending: Mutex<VecDeque<usize>>,
    last: Mutex<usize>,
}

impl ScriptedNumbers {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            pending: Mutex::new(values.into_iter().collect()),
            last: Mutex::new(0),
        }
    }

    /// Draws for a board whose mines sit at `mines` and whose opening reveal
    /// lands on `opening`, in the order game creation consumes them.
    pub fn layout(mines: &[(usize, usize)], opening: (usize, usize)) -> Self {
        Self::new(
            mines
                .iter()
                .chain([&opening])
                .flat_map(|&(row, column)| [row, column]),
        )
    }
}

impl NumberGenerator for ScriptedNumbers {
    fn below(&self, bound: usize) -> usize {
        let mut last = self.last.lock();
        if let Some(value) = self.pending.lock().pop_front() {
            *last = value;
        }
        *last % bound
    }
}
