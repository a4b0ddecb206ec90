//! Encounter state types.
//!
//! Everything here is plain data: the encounter orchestrator and the
//! resolution pipeline own all mutation.

pub mod actor;
pub mod common;
pub mod equipment;
pub mod map;

pub use actor::{Actor, BaseStats, DecisionSourceKind, HealthMeter, LifeDrain};
pub use common::{ActorId, CardinalDirection, Faction, Position};
pub use equipment::{InflictSpec, Material, Weapon};
pub use map::TileMap;
