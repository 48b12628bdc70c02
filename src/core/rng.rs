//! Deterministic shuffle randomness.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffle sequence
//! - **Forkable**: Each deck gets an independent stream from the stage's
//!   master RNG, so one rider's shuffles never perturb another's
//! - **Serializable**: O(1) state capture via the ChaCha word position,
//!   so a restored snapshot continues the exact shuffle sequence
//!
//! ## Usage
//!
//! ```
//! use peloton::core::ShuffleRng;
//!
//! let mut master = ShuffleRng::new(42);
//!
//! // Fork an independent stream for a deck
//! let mut deck_rng = master.fork();
//!
//! let mut cards = vec![1, 2, 3, 4, 5];
//! deck_rng.shuffle(&mut cards);
//!
//! // Same seed, same fork order: same shuffle outcome
//! let mut master2 = ShuffleRng::new(42);
//! let mut deck_rng2 = master2.fork();
//! let mut cards2 = vec![1, 2, 3, 4, 5];
//! deck_rng2.shuffle(&mut cards2);
//! assert_eq!(cards, cards2);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG for deck shuffling.
///
/// Uses ChaCha8 for speed while maintaining high quality randomness.
/// Serializes as its captured state so snapshots are exact.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "ShuffleRngState", from = "ShuffleRngState")]
pub struct ShuffleRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl ShuffleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    /// Used to give every deck its own shuffle stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> ShuffleRngState {
        ShuffleRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &ShuffleRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl From<ShuffleRng> for ShuffleRngState {
    fn from(rng: ShuffleRng) -> Self {
        rng.state()
    }
}

impl From<ShuffleRngState> for ShuffleRng {
    fn from(state: ShuffleRngState) -> Self {
        Self::from_state(&state)
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how
/// many shuffles have been performed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic branching.
    pub fork_counter: u64,
}
