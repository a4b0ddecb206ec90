//! Snapshot persistence.
//!
//! bincode on disk; the snapshot already contains everything resolution
//! depends on, so load-then-continue reproduces the paused run exactly.

use std::path::Path;

use combat_core::EncounterSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::Error),
}

pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &EncounterSnapshot) -> Result<(), PersistError> {
    let bytes = bincode::serialize(snapshot)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<EncounterSnapshot, PersistError> {
    let bytes = std::fs::read(path)?;
    Ok(bincode::deserialize(&bytes)?)
}
