//! # peloton
//!
//! A turn-based game-state engine for bicycle-racing card games.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: No process-wide game state. Every operation
//!    takes the [`Stage`] it acts on; callers own the handle.
//!
//! 2. **Unguarded Mutations, Pure Legality**: Stage operations never
//!    enforce sequencing. Whether an action is legal right now is
//!    answered by the [`query`] predicates, which read state and
//!    mutate nothing.
//!
//! 3. **Deterministic Randomness**: Every deck shuffles on its own
//!    forked stream of the stage's seeded RNG, so games replay exactly
//!    and snapshots resume the same shuffle sequence.
//!
//! 4. **Recoverable Errors**: No operation is fatal. Anomalies come
//!    back as typed [`PelotonError`] values, never panics.
//!
//! ## Architecture
//!
//! A [`Stage`] owns its teams, a [`Team`] owns its riders, and a
//! [`Rider`] owns its [`Deck`]; nothing is shared between stages
//! except across the explicit [`Stage::advance`] hand-off. The engine
//! runs entirely inside synchronous calls: the presentation layer
//! applies one user action, then re-derives its view from the query
//! layer and the pile accessors.
//!
//! ## Modules
//!
//! - `core`: cards, role codes, shorthand commands, errors, RNG
//! - `deck`: the per-rider pile lifecycle (draw/play/rebuild)
//! - `race`: riders, teams, and the stage state machine
//! - `query`: pure legality predicates over a stage
//! - `report`: plain-text phase summaries
//! - `snapshot`: whole-stage binary save/restore

pub mod core;
pub mod deck;
pub mod query;
pub mod race;
pub mod report;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    parse_exhaust_commands, parse_play_commands, Card, Command, PelotonError, Result, RoleCode,
    ShuffleRng, ShuffleRngState,
};

pub use crate::deck::{Deck, DrawNote, HAND_SIZE};

pub use crate::race::{
    CarryOverEntry, CarryOverReport, Rider, Stage, StageBuilder, Team, ROULEUR_ENERGY,
    SPRINTEUR_ENERGY,
};

pub use crate::report::Reporter;
