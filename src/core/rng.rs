//! Seeded randomness for deck shuffles and dice.
//!
//! Every game instance owns its own `GameRng`. Copying a game copies the
//! stream position too, so a copy replays exactly the same rolls; search
//! agents that want divergent rollouts call [`GameRng::fork`] instead.
//!
//! ```
//! use tabletop::core::GameRng;
//!
//! let mut rng = GameRng::new(7);
//! let mut same = rng.clone();
//! assert_eq!(rng.gen_range(0..6), same.gen_range(0..6));
//!
//! let mut branch = rng.fork();
//! let _ = branch.gen_range(0..6);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic, forkable RNG.
///
/// Serializes as a [`GameRngState`] (seed plus stream position), which
/// keeps snapshots small no matter how many numbers were drawn.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent stream.
    ///
    /// Forks are deterministic: the n-th fork of a given seed always
    /// yields the same sequence. The child seed is hashed from the parent
    /// seed and fork count, so forks of forks don't land on a sibling's
    /// stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        Self::new(splitmix64(self.seed ^ self.fork_counter.rotate_left(32)))
    }

    /// Random integer in `range`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Random index in `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Pick a random element.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Rebuild an RNG at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// SplitMix64 finaliser.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    /// Forks taken so far.
    pub fork_counter: u64,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        for _ in 0..50 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn test_clone_replays_same_sequence() {
        let mut rng = GameRng::new(9);
        rng.gen_range(0..10);

        let mut copy = rng.clone();
        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| copy.gen_range(0..1000)).collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_fork_diverges() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_nested_fork_differs_from_sibling() {
        let mut parent = GameRng::new(42);
        let mut child = parent.fork();
        let mut grandchild = child.fork();
        let mut sibling = parent.fork();

        let a: Vec<_> = (0..8).map(|_| grandchild.gen_range(0..1_000_000)).collect();
        let b: Vec<_> = (0..8).map(|_| sibling.gen_range(0..1_000_000)).collect();
        let c: Vec<_> = (0..8).map(|_| child.gen_range(0..1_000_000)).collect();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        assert_eq!(a.fork(), b.fork());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();

        rng.shuffle(&mut data);
        data.sort_unstable();

        assert_eq!(data, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_serde_restores_position() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_range(0..1000);
        }

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        let expected: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range(0..1000)).collect();
        assert_eq!(expected, actual);
    }
}
