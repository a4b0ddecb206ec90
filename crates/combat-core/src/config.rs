/// Combat balance constants and tunable parameters.
///
/// One instance is owned by each [`crate::Encounter`]. Every clamp, floor,
/// and proc chance the resolution pipeline applies is read from here so the
/// balance harness can sweep values without recompiling.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Base hit chance before the accuracy/evasion differential is applied.
    pub hit_base: i32,

    /// Lower clamp on hit chance. A hit is never impossible.
    pub hit_floor: i32,

    /// Upper clamp on hit chance. A hit is never guaranteed by stats alone.
    pub hit_ceiling: i32,

    /// Minimum damage dealt on a successful hit.
    pub minimum_hit_damage: u32,

    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: u32,

    /// Percent of damage dealt returned to a life-draining attacker
    /// (rounded up).
    pub drain_percent: u32,

    /// Percent chance that a degradable weapon loses a point of damage
    /// after a damaging hit.
    pub degrade_chance_percent: u32,

    /// Percent of a weapon's original damage below which degradation can
    /// never push it.
    pub degrade_floor_percent: u32,

    /// Tiles of displacement from a knockback-capable weapon before any
    /// oath bonus is added.
    pub base_knockback: u32,

    /// Percent chance of a bonus attack when the attacker's speed ratio
    /// strictly exceeds the defender's.
    pub bonus_attack_percent: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous status effects per actor.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Maximum status effects a single weapon can inflict.
    pub const MAX_WEAPON_INFLICTS: usize = 4;

    pub fn new() -> Self {
        Self {
            hit_base: 75,
            hit_floor: 5,
            hit_ceiling: 95,
            minimum_hit_damage: 1,
            crit_multiplier: 2,
            drain_percent: 50,
            degrade_chance_percent: 10,
            degrade_floor_percent: 50,
            base_knockback: 1,
            bonus_attack_percent: 35,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
