//! Randomness port for the garden's uniform draws.
//!
//! Species picks, decay victim picks, and overflow placement all draw
//! through this trait so tests can replay exact sequences.

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// Returns an index drawn uniformly from `0..upper`.
    ///
    /// Implementations return `0` when `upper` is `0`.
    fn index_below(&self, upper: usize) -> usize;

    /// Returns `min(amount, length)` distinct indices drawn uniformly without
    /// replacement from `0..length`.
    ///
    /// The default implementation is a partial Fisher-Yates shuffle driven by
    /// [`RandomSource::index_below`].
    fn sample_indices(&self, length: usize, amount: usize) -> Vec<usize> {
        let take = amount.min(length);
        let mut pool: Vec<usize> = (0..length).collect();
        for picked in 0..take {
            let remaining = length - picked;
            let offset = self.index_below(remaining).min(remaining - 1);
            pool.swap(picked, picked + offset);
        }
        pool.truncate(take);
        pool
    }
}
