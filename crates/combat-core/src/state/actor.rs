//! Actor state: health, stats, capabilities, and attached effects.

use super::common::{ActorId, Faction, Position};
use super::equipment::Weapon;
use crate::status::{StatusEffectKind, StatusEffects};

/// Clamped health meter.
///
/// `0 <= current <= maximum` holds at all times; damage and healing
/// saturate rather than over/underflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthMeter {
    current: u32,
    maximum: u32,
}

impl HealthMeter {
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Reduces health, clamping at 0. Returns the damage actually taken.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Restores health, clamping at maximum. Returns the amount actually
    /// healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.maximum - self.current);
        self.current += healed;
        healed
    }
}

/// Base combat stats; modifiers from effects are applied on top of these
/// by the resolution pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub accuracy: i32,
    pub evasion: i32,
    pub strength: i32,
    pub armor: i32,
    /// Relative action speed; strictly higher than the defender's grants a
    /// chance at a bonus attack.
    pub speed_ratio: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            accuracy: 5,
            evasion: 5,
            strength: 4,
            armor: 1,
            speed_ratio: 100,
        }
    }
}

/// Typed life-drain capability.
///
/// Present-or-absent on the actor rather than probed through numeric
/// attributes; absence means the actor's attacks never drain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifeDrain {
    /// Percent of damage dealt returned as healing, rounded up.
    /// 0 defers to the encounter config's `drain_percent`.
    pub percent: u32,
}

/// Which kind of decision source supplies this actor's intents.
///
/// Exactly one per live actor; the kernel treats all three identically and
/// the tag exists only so callers can wire the right provider to the right
/// actor (and for snapshots to restore that wiring).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionSourceKind {
    /// Direct human input translation.
    Human,
    /// Rule-based AI policy.
    Ai,
    /// Automated soak/regression bot policy.
    Bot,
}

/// Any schedulable combat participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub health: HealthMeter,
    pub stats: BaseStats,
    pub weapon: Weapon,
    pub status: StatusEffects,
    pub life_drain: Option<LifeDrain>,
    pub decision_source: DecisionSourceKind,
}

impl Actor {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        faction: Faction,
        position: Position,
        max_health: u32,
        stats: BaseStats,
        weapon: Weapon,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            position,
            health: HealthMeter::full(max_health),
            stats,
            weapon,
            status: StatusEffects::empty(),
            life_drain: None,
            decision_source: DecisionSourceKind::Ai,
        }
    }

    pub fn with_life_drain(mut self, drain: LifeDrain) -> Self {
        self.life_drain = Some(drain);
        self
    }

    pub fn with_decision_source(mut self, kind: DecisionSourceKind) -> Self {
        self.decision_source = kind;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    /// Flat damage bonus: strength-derived plus any permanent might oath.
    pub fn damage_bonus(&self) -> i32 {
        self.stats.strength / 2 + self.status.magnitude_of(StatusEffectKind::MightOath)
    }

    /// Extra knockback tiles granted by a permanent oath, if any.
    pub fn knockback_bonus(&self) -> u32 {
        self.status
            .magnitude_of(StatusEffectKind::KnockbackOath)
            .max(0) as u32
    }

    /// Typed accessor for the life-drain capability.
    pub fn life_drain(&self) -> Option<LifeDrain> {
        self.life_drain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusEffect;

    #[test]
    fn health_meter_saturates_both_ways() {
        let mut hp = HealthMeter::full(20);
        assert_eq!(hp.damage(25), 20);
        assert_eq!(hp.current(), 0);
        assert!(hp.is_depleted());

        assert_eq!(hp.heal(100), 20);
        assert_eq!(hp.current(), 20);
    }

    #[test]
    fn damage_bonus_includes_might_oath() {
        let mut actor = Actor::new(
            ActorId(0),
            "oathbound",
            Faction::Adventurers,
            Position::ORIGIN,
            30,
            BaseStats {
                strength: 6,
                ..BaseStats::default()
            },
            Weapon::new("club", 2, 4),
        );
        assert_eq!(actor.damage_bonus(), 3);

        actor
            .status
            .apply(StatusEffect::permanent(StatusEffectKind::MightOath, 2));
        assert_eq!(actor.damage_bonus(), 5);
    }
}
