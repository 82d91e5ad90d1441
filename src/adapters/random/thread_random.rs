//! Thread-local RNG adapter for production template selection.

use rand::Rng;

use crate::ports::RandomSource;

/// Uniform selection from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_stay_in_range() {
        let random = ThreadRandom;
        for len in 1..20 {
            assert!(random.pick(len) < len);
        }
    }

    #[test]
    fn empty_pool_does_not_panic() {
        assert_eq!(ThreadRandom.pick(0), 0);
    }
}
