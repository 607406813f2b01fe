//! Randomness used by maze generation and play.
//!
//! Generation only ever asks for a uniform integer below a bound, so the
//! whole algorithm is reproducible from the sequence of `rn2` draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws consumed by the builder, placer and game session.
pub trait RandomSource {
    /// Uniform value in `0..bound`. Returns 0 if `bound` is 0.
    fn rn2(&mut self, bound: u32) -> u32;

    /// Fair coin: `true` means "left".
    fn coin(&mut self) -> bool {
        self.rn2(2) == 0
    }

    /// Choose a random element from a slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }

    /// Fisher-Yates shuffle, last index down to 1.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn rn2(&mut self, bound: u32) -> u32 {
        (**self).rn2(bound)
    }
}

/// Process-wide game generator.
///
/// Wraps ChaCha8Rng so a seed printed in debug output reproduces the maze.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn rn2(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        let left: Vec<u32> = (0..32).map(|_| a.rn2(100)).collect();
        let right: Vec<u32> = (0..32).map(|_| b.rn2(100)).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_rn2_stays_below_bound() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.rn2(0), 0);
        assert!((0..1000).all(|_| rng.rn2(3) < 3));
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = GameRng::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_empty_slice() {
        let mut rng = GameRng::new(3);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
