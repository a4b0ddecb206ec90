//! Status effect engine.
//!
//! Status effects are timed or permanent modifiers attached to exactly one
//! actor. The engine owns their whole lifecycle: application with stacking
//! rules, the once-per-cycle tick, and expiry. Permanent effects carry a
//! structural duration sentinel so no consumer ever has to special-case
//! "do not decrement this one".

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Broad behavioral category of a status effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectCategory {
    /// Deals its magnitude as damage to the owner every tick.
    DamageOverTime,
    /// Prevents voluntary movement and knockback displacement.
    MobilityRestriction,
    /// Always-on stat or behavior modifier ("oaths").
    PermanentModifier,
    /// Suppresses a specific incoming mechanic while active.
    TemporaryImmunity,
}

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Fire damage over time.
    Burning,

    /// Toxin damage over time.
    Poisoned,

    /// Cannot move or be displaced.
    Rooted,

    /// Permanent oath: extra knockback tiles on the owner's attacks.
    KnockbackOath,

    /// Permanent oath: flat bonus to the owner's damage.
    MightOath,

    /// Incoming life drain is blocked while active.
    DrainWard,
}

impl StatusEffectKind {
    pub fn category(self) -> EffectCategory {
        match self {
            StatusEffectKind::Burning | StatusEffectKind::Poisoned => EffectCategory::DamageOverTime,
            StatusEffectKind::Rooted => EffectCategory::MobilityRestriction,
            StatusEffectKind::KnockbackOath | StatusEffectKind::MightOath => {
                EffectCategory::PermanentModifier
            }
            StatusEffectKind::DrainWard => EffectCategory::TemporaryImmunity,
        }
    }

    /// Stacking rule used when this kind is applied on top of itself.
    pub fn default_stacking(self) -> StackPolicy {
        match self.category() {
            EffectCategory::DamageOverTime => StackPolicy::StackMagnitude,
            EffectCategory::MobilityRestriction => StackPolicy::RefreshDuration,
            EffectCategory::PermanentModifier => StackPolicy::IgnoreIfPresent,
            EffectCategory::TemporaryImmunity => StackPolicy::RefreshDuration,
        }
    }
}

/// How a newly applied effect merges with an active effect of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackPolicy {
    /// Reset duration to the incoming effect's duration; magnitude untouched.
    RefreshDuration,
    /// Sum magnitudes, keep the longer duration.
    StackMagnitude,
    /// The incoming application is a no-op.
    IgnoreIfPresent,
}

/// Remaining lifetime of an effect.
///
/// `Permanent` is a distinct variant rather than a magic number, so the
/// tick's decrement cannot reach it by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Expires after this many ticks.
    Turns(u16),
    /// Never decremented, never expires.
    Permanent,
}

impl EffectDuration {
    fn is_expired(self) -> bool {
        matches!(self, EffectDuration::Turns(0))
    }
}

/// A single status effect attached to one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub duration: EffectDuration,
    pub magnitude: i32,
    pub stacking: StackPolicy,
}

impl StatusEffect {
    /// Timed effect with the kind's default stacking policy.
    pub fn timed(kind: StatusEffectKind, turns: u16, magnitude: i32) -> Self {
        Self {
            kind,
            duration: EffectDuration::Turns(turns),
            magnitude,
            stacking: kind.default_stacking(),
        }
    }

    /// Permanent effect with the kind's default stacking policy.
    pub fn permanent(kind: StatusEffectKind, magnitude: i32) -> Self {
        Self {
            kind,
            duration: EffectDuration::Permanent,
            magnitude,
            stacking: kind.default_stacking(),
        }
    }

    pub fn with_stacking(mut self, stacking: StackPolicy) -> Self {
        self.stacking = stacking;
        self
    }
}

/// What a single tick did to one actor's effect list.
///
/// The encounter applies `dot_damage` to the owner's health and forwards
/// the per-effect entries to the metrics sink; the engine itself never
/// touches health.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTickReport {
    /// Sum of damage-over-time magnitudes that fired this tick.
    pub dot_damage: u32,
    /// Every effect that was ticked, with the magnitude it applied.
    pub ticked: Vec<(StatusEffectKind, i32)>,
    /// Effects whose duration reached zero and were removed.
    pub expired: Vec<StatusEffectKind>,
}

/// Active status effects on one actor.
///
/// At most one effect per kind is stored; stacking policies decide how a
/// re-application merges. Bounded so actor state stays fixed-size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks whether an effect of this kind is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Active effect of the given kind, if any.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Magnitude of the given kind, or 0 when absent.
    pub fn magnitude_of(&self, kind: StatusEffectKind) -> i32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    /// True when the owner may neither move nor be displaced.
    pub fn is_immobilized(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind.category() == EffectCategory::MobilityRestriction)
    }

    /// Inserts or merges an effect per its stacking policy.
    ///
    /// Returns true when the list changed (insert, refresh, or stack);
    /// false for an `IgnoreIfPresent` no-op or a full list.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            return match existing.stacking {
                StackPolicy::RefreshDuration => {
                    existing.duration = effect.duration;
                    true
                }
                StackPolicy::StackMagnitude => {
                    existing.magnitude += effect.magnitude;
                    existing.duration = longer_of(existing.duration, effect.duration);
                    true
                }
                StackPolicy::IgnoreIfPresent => false,
            };
        }

        if self.effects.is_full() {
            tracing::warn!(kind = %effect.kind, "status effect list full, application dropped");
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Removes an effect immediately, regardless of remaining duration.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// End-of-cycle tick.
    ///
    /// Applies each effect's per-turn consequence, then decrements timed
    /// durations by exactly 1 and drops anything that reached zero.
    /// Permanent durations are untouched by construction: the decrement
    /// only matches `Turns`.
    pub fn tick(&mut self) -> StatusTickReport {
        let mut report = StatusTickReport::default();

        for effect in self.effects.iter_mut() {
            if effect.kind.category() == EffectCategory::DamageOverTime {
                report.dot_damage += effect.magnitude.max(0) as u32;
            }
            report.ticked.push((effect.kind, effect.magnitude));

            if let EffectDuration::Turns(turns) = &mut effect.duration {
                *turns = turns.saturating_sub(1);
            }
        }

        for effect in self.effects.iter().filter(|e| e.duration.is_expired()) {
            report.expired.push(effect.kind);
        }
        self.effects.retain(|e| !e.duration.is_expired());

        report
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// The later-expiring of two durations; `Permanent` dominates.
fn longer_of(a: EffectDuration, b: EffectDuration) -> EffectDuration {
    match (a, b) {
        (EffectDuration::Permanent, _) | (_, EffectDuration::Permanent) => {
            EffectDuration::Permanent
        }
        (EffectDuration::Turns(x), EffectDuration::Turns(y)) => EffectDuration::Turns(x.max(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_resets_duration_without_stacking_magnitude() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::timed(StatusEffectKind::Rooted, 2, 0));
        effects.tick();

        effects.apply(StatusEffect::timed(StatusEffectKind::Rooted, 5, 0));
        let rooted = effects.get(StatusEffectKind::Rooted).unwrap();
        assert_eq!(rooted.duration, EffectDuration::Turns(5));
        assert_eq!(rooted.magnitude, 0);
    }

    #[test]
    fn stack_magnitude_sums_and_keeps_longer_duration() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::timed(StatusEffectKind::Poisoned, 4, 2));
        effects.apply(StatusEffect::timed(StatusEffectKind::Poisoned, 2, 3));

        let poison = effects.get(StatusEffectKind::Poisoned).unwrap();
        assert_eq!(poison.magnitude, 5);
        assert_eq!(poison.duration, EffectDuration::Turns(4));
    }

    #[test]
    fn ignore_if_present_is_a_no_op() {
        let mut effects = StatusEffects::empty();
        assert!(effects.apply(StatusEffect::permanent(StatusEffectKind::KnockbackOath, 1)));
        assert!(!effects.apply(StatusEffect::permanent(StatusEffectKind::KnockbackOath, 99)));
        assert_eq!(effects.magnitude_of(StatusEffectKind::KnockbackOath), 1);
    }

    #[test]
    fn tick_decrements_and_expires_timed_effects() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::timed(StatusEffectKind::Burning, 2, 3));

        let first = effects.tick();
        assert_eq!(first.dot_damage, 3);
        assert!(first.expired.is_empty());

        let second = effects.tick();
        assert_eq!(second.dot_damage, 3);
        assert_eq!(second.expired, vec![StatusEffectKind::Burning]);
        assert!(effects.is_empty());
    }

    #[test]
    fn permanent_duration_survives_many_ticks() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::permanent(StatusEffectKind::MightOath, 2));

        for _ in 0..10_000 {
            effects.tick();
        }

        let oath = effects.get(StatusEffectKind::MightOath).unwrap();
        assert_eq!(oath.duration, EffectDuration::Permanent);
        assert_eq!(oath.magnitude, 2);
    }

    #[test]
    fn at_most_one_effect_per_kind() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::timed(StatusEffectKind::Burning, 3, 1));
        effects.apply(StatusEffect::timed(StatusEffectKind::Burning, 3, 1));
        assert_eq!(
            effects
                .iter()
                .filter(|e| e.kind == StatusEffectKind::Burning)
                .count(),
            1
        );
    }
}
