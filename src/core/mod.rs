//! Core engine types: cards, role codes, shorthand commands, errors, RNG.
//!
//! These are the building blocks shared by the deck and race layers.
//! They carry no game sequencing of their own.

pub mod card;
pub mod command;
pub mod error;
pub mod rng;

pub use card::Card;
pub use command::{parse_exhaust_commands, parse_play_commands, Command, RoleCode};
pub use error::{PelotonError, Result};
pub use rng::{ShuffleRng, ShuffleRngState};
