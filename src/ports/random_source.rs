//! RandomSource Port - template selection strategy.

/// Picks an index into a template pool.
///
/// Production uses a thread RNG; tests inject a seeded or fixed source so
/// composed output is reproducible.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}
