//! Deterministic turn-phased combat kernel.
//!
//! `combat-core` defines the canonical combat rules: the phase state
//! machine, the turn scheduler, the attack resolution pipeline, and the
//! status effect engine, all driven by one seedable RNG stream per
//! encounter. The same kernel serves live interactive play, the automated
//! soak/regression bot, and the CI balance harness; given the same seed
//! and the same decision inputs, all three observe byte-identical
//! outcomes. All state mutation flows through [`Encounter`].

pub mod combat;
pub mod config;
pub mod encounter;
pub mod intent;
pub mod metrics;
pub mod phase;
pub mod provider;
pub mod rng;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod state;
pub mod status;

pub use combat::{AttackOutcome, HitRoll, SecondaryEffect};
pub use config::CombatConfig;
pub use encounter::{Encounter, EncounterView};
pub use intent::{ActionIntent, ItemKind};
pub use metrics::{CollectingSink, MetricsEvent, MetricsSink, NullSink};
pub use phase::{Phase, PhaseMachine, PhaseTransition, TurnSide};
pub use provider::{DecisionProvider, ProviderError, ProviderRegistry, WaitProvider};
pub use rng::{EncounterRng, EncounterSeed};
pub use scheduler::TurnScheduler;
#[cfg(feature = "serde")]
pub use snapshot::{EncounterSnapshot, digest_value};
pub use state::{
    Actor, ActorId, BaseStats, CardinalDirection, DecisionSourceKind, Faction, HealthMeter,
    InflictSpec, LifeDrain, Material, Position, TileMap, Weapon,
};
pub use status::{
    EffectCategory, EffectDuration, StackPolicy, StatusEffect, StatusEffectKind, StatusEffects,
    StatusTickReport,
};
