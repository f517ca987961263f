//! [`RandomSource`] implementations.

use crate::garden::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn index_below(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::rng().random_range(0..upper)
    }

    fn sample_indices(&self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut rand::rng(), length, amount.min(length)).into_vec()
    }
}

/// Reproducible generator seeded once at construction.
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    /// Creates a generator from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn index_below(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..upper)
    }
}

/// Replays a fixed list of indices, then falls back to `0`.
///
/// Each scripted value is reduced into range, so a script written for one
/// draw size stays usable for another.
#[derive(Debug, Default)]
pub struct ScriptedRandomSource {
    script: Mutex<VecDeque<usize>>,
}

impl ScriptedRandomSource {
    /// Creates a source that answers draws in the given order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Appends further draws to the script.
    pub fn push(&self, values: impl IntoIterator<Item = usize>) {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        script.extend(values);
    }

    /// Returns how many scripted draws have not been consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl RandomSource for ScriptedRandomSource {
    fn index_below(&self, upper: usize) -> usize {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        script
            .pop_front()
            .and_then(|value| value.checked_rem(upper))
            .unwrap_or(0)
    }
}
