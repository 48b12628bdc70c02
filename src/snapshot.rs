//! Whole-stage binary snapshots.
//!
//! A snapshot captures the complete stage object graph: every pile,
//! hand, flag, counter, and RNG position. Restoring one yields a stage
//! that is byte-for-byte equivalent, including the shuffle sequence
//! every deck will produce from here on.
//!
//! The encoding is bincode and is treated as opaque by callers; the
//! persistence layer decides where the bytes live.

use crate::core::{PelotonError, Result};
use crate::race::Stage;

/// Serialize a stage to an opaque binary blob.
pub fn save(stage: &Stage) -> Result<Vec<u8>> {
    bincode::serialize(stage).map_err(|e| PelotonError::Snapshot(e.to_string()))
}

/// Restore a stage from a blob produced by [`save`].
pub fn load(bytes: &[u8]) -> Result<Stage> {
    bincode::deserialize(bytes).map_err(|e| PelotonError::Snapshot(e.to_string()))
}
