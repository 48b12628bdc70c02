//! Error types for the engine.
//!
//! No operation is fatal: every anomaly is a recoverable condition
//! reported to the caller as a typed error. The one deliberate
//! exception is drawing with a non-empty hand, which stays a silent
//! no-op so callers unsure of current state can re-invoke idempotently.

use thiserror::Error;

use super::card::Card;
use super::command::RoleCode;

/// Recoverable engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PelotonError {
    /// A played card code is not in the rider's hand.
    #[error("card '{0}' is not in the hand")]
    CardNotInHand(Card),

    /// A shorthand token references a role key the team does not have.
    #[error("no rider with role code '{0}'")]
    UnknownRole(RoleCode),

    /// A shorthand token does not fit the expected shape.
    #[error("malformed shorthand token '{0}'")]
    MalformedToken(String),

    /// A team lookup by name failed.
    #[error("unknown team '{0}'")]
    UnknownTeam(String),

    /// A team with this name already exists in the stage.
    #[error("team '{0}' already exists")]
    DuplicateTeam(String),

    /// A rider with this role code already exists in the team.
    #[error("role code '{0}' is already taken")]
    DuplicateRole(RoleCode),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PelotonError>;
