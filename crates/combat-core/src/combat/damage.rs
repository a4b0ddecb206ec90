//! Damage computation.

use crate::config::CombatConfig;
use crate::rng::EncounterRng;
use crate::state::Actor;

/// Compute the damage of a successful hit.
///
/// # Formula
///
/// ```text
/// raw     = roll(weapon.damage_min ..= weapon.damage_max)
///         + attacker.damage_bonus()          // strength + oaths
/// reduced = raw - defender.armor
/// final   = max(reduced, minimum_hit_damage)
/// if critical: final *= crit_multiplier
/// ```
///
/// The floor applies before the critical multiplier so a critical against
/// heavy armor still doubles something.
pub fn compute_damage(
    attacker: &Actor,
    defender: &Actor,
    critical: bool,
    rng: &mut EncounterRng,
    config: &CombatConfig,
) -> u32 {
    let weapon_roll = rng.range(attacker.weapon.damage_min, attacker.weapon.damage_max);
    let raw = weapon_roll as i32 + attacker.damage_bonus();

    let reduced = raw - defender.stats.armor.max(0);
    let mut damage = reduced.max(config.minimum_hit_damage as i32) as u32;

    if critical {
        damage *= config.crit_multiplier;
    }

    damage
}
