//! Race structure: riders, teams, and the stage state machine.
//!
//! ## Key Types
//!
//! - `Rider`: a deck plus identity and per-stage flags
//! - `Team`: a roster of riders keyed by role code, with bulk
//!   shorthand actions
//! - `Stage`: all teams plus the turn/bid counters and phase
//!   operations
//! - `StageBuilder`: stage setup with seed and standard rosters
//! - `CarryOverReport`: exhaustion carry-over data from a stage
//!   transition

pub mod rider;
pub mod stage;
pub mod team;

pub use rider::{Rider, ROULEUR_ENERGY, SPRINTEUR_ENERGY};
pub use stage::{CarryOverEntry, CarryOverReport, Stage, StageBuilder};
pub use team::Team;
