//! Metrics emission contract.
//!
//! After each resolved event the kernel calls a narrow, append-only
//! [`MetricsSink`]. The balance/telemetry layer consumes these events; it
//! never feeds back into resolution. Live play uses the no-op sink, the
//! balance harness the collecting one.

use crate::phase::Phase;
use crate::state::ActorId;
use crate::status::StatusEffectKind;

/// Structured event emitted by the kernel after each resolved step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricsEvent {
    /// A top-level or bonus attack finished resolving.
    AttackResolved {
        attacker: ActorId,
        defender: ActorId,
        hit: bool,
        critical: bool,
        damage: u32,
        is_bonus: bool,
    },

    /// A status effect applied its per-turn consequence.
    StatusTick {
        actor: ActorId,
        kind: StatusEffectKind,
        magnitude: i32,
    },

    /// A status effect expired and was removed.
    StatusExpired {
        actor: ActorId,
        kind: StatusEffectKind,
    },

    /// The phase machine advanced.
    PhaseTransition {
        from: Phase,
        to: Phase,
        cycle: u64,
    },

    /// Life drain was suppressed by the defender's ward.
    DrainBlocked { attacker: ActorId, defender: ActorId },

    /// Life drain healed the attacker.
    DrainHealed { attacker: ActorId, amount: u32 },

    /// A weapon permanently lost a point of damage.
    WeaponDegraded {
        owner: ActorId,
        remaining_damage_max: u32,
    },

    /// The defender was displaced.
    Knockback { defender: ActorId, tiles: u32 },

    /// An actor died and was retired from scheduling.
    ActorDied { actor: ActorId },

    /// A decision source errored and the turn fell back to Wait.
    ProviderFailed { actor: ActorId },
}

/// Append-only sink the kernel records events into.
pub trait MetricsSink {
    fn record(&mut self, event: &MetricsEvent);
}

/// Sink that drops every event. Production play.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn record(&mut self, _event: &MetricsEvent) {}
}

/// Sink that keeps every event in order. Harness and tests.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    events: Vec<MetricsEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MetricsEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn take(&mut self) -> Vec<MetricsEvent> {
        std::mem::take(&mut self.events)
    }
}

impl MetricsSink for CollectingSink {
    fn record(&mut self, event: &MetricsEvent) {
        self.events.push(event.clone());
    }
}
