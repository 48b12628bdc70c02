//! Per-rider deck lifecycle.
//!
//! ## Key Types
//!
//! - `Deck`: the four piles (draw, recycle, discard, hand) and every
//!   operation that moves cards between them
//! - `DrawNote`: informational note left behind by a draw that had to
//!   reshuffle or ran short of cards
//! - `HAND_SIZE`: the fixed draw size (4)

pub mod piles;

pub use piles::{Deck, DrawNote, HAND_SIZE};
