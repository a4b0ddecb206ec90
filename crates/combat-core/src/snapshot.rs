//! Full-state snapshots and deterministic digests.
//!
//! The snapshot carries everything resolution depends on (actors, phase,
//! scheduler state including the acted guard, and the RNG stream word), so
//! restoring mid-encounter and continuing is indistinguishable from never
//! having paused. Digests are SHA-256 over the bincode encoding, the
//! acceptance check the harness compares across runs.

use sha2::{Digest, Sha256};

use crate::config::CombatConfig;
use crate::phase::PhaseMachine;
use crate::rng::{EncounterRng, EncounterSeed};
use crate::scheduler::TurnScheduler;
use crate::state::{Actor, TileMap};

/// Serializable whole-encounter state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncounterSnapshot {
    pub config: CombatConfig,
    pub seed: EncounterSeed,
    pub rng: EncounterRng,
    pub phase: PhaseMachine,
    pub scheduler: TurnScheduler,
    pub actors: Vec<Actor>,
    pub map: TileMap,
}

/// SHA-256 digest of any serializable value's bincode encoding.
///
/// bincode's encoding is deterministic for a fixed type and value, which
/// makes this digest a byte-identity check.
pub fn digest_value<T: serde::Serialize>(value: &T) -> Result<[u8; 32], bincode::Error> {
    let bytes = bincode::serialize(value)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_value_sensitive() {
        let a = digest_value(&(1u32, "spear")).unwrap();
        let b = digest_value(&(1u32, "spear")).unwrap();
        let c = digest_value(&(2u32, "spear")).unwrap();

        assert_eq!(hex::encode(a), hex::encode(b));
        assert_ne!(a, c);
    }
}
