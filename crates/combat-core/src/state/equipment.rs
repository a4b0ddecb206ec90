//! Weapons and the material degradation rules the kernel reads from them.
//!
//! Inventory and equipment schemas beyond these numeric modifiers are out
//! of scope; the pipeline only needs a damage range, a material, and the
//! secondary effects a weapon can trigger.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::status::StatusEffectKind;

/// Material a weapon is forged from.
///
/// Only some materials degrade with use; enchanted gear is exempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    Bone,
    Iron,
    Steel,
    /// Never degrades.
    Enchanted,
}

impl Material {
    pub fn is_degradable(self) -> bool {
        !matches!(self, Material::Enchanted)
    }
}

/// A status effect a weapon can apply on a damaging hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InflictSpec {
    pub kind: StatusEffectKind,
    /// Independent percent chance rolled per damaging hit.
    pub proc_percent: u32,
    /// Duration in turns of the applied effect.
    pub duration: u16,
    pub magnitude: i32,
}

/// Weapon stats the resolution pipeline reads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub damage_min: u32,
    pub damage_max: u32,
    pub material: Material,
    /// Whether a damaging hit displaces the defender.
    pub knockback: bool,
    /// Effects this weapon can inflict, each rolled independently.
    pub inflicts: ArrayVec<InflictSpec, { CombatConfig::MAX_WEAPON_INFLICTS }>,

    /// Damage ceiling as forged. Degradation floors are computed against
    /// this, never against the current (already degraded) value.
    original_damage_max: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage_min: u32, damage_max: u32) -> Self {
        let damage_max = damage_max.max(damage_min);
        Self {
            name: name.into(),
            damage_min,
            damage_max,
            material: Material::Iron,
            knockback: false,
            inflicts: ArrayVec::new(),
            original_damage_max: damage_max,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_knockback(mut self) -> Self {
        self.knockback = true;
        self
    }

    pub fn with_inflict(mut self, inflict: InflictSpec) -> Self {
        if !self.inflicts.is_full() {
            self.inflicts.push(inflict);
        }
        self
    }

    pub fn original_damage_max(&self) -> u32 {
        self.original_damage_max
    }

    /// Lowest value degradation may leave `damage_max` at.
    ///
    /// Rounded up so a nonzero original never floors to zero.
    pub fn degradation_floor(&self, config: &CombatConfig) -> u32 {
        (self.original_damage_max * config.degrade_floor_percent).div_ceil(100)
    }

    /// Permanently dulls the weapon by one point of maximum damage,
    /// respecting the floor. Returns true when the stat actually moved.
    ///
    /// Callers are responsible for the material and proc checks; this only
    /// enforces the floor invariant.
    pub fn degrade(&mut self, config: &CombatConfig) -> bool {
        let floor = self.degradation_floor(config);
        if self.damage_max <= floor {
            return false;
        }

        self.damage_max -= 1;
        self.damage_min = self.damage_min.min(self.damage_max);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrade_never_crosses_the_floor() {
        let config = CombatConfig::default();
        let mut weapon = Weapon::new("rusty sword", 4, 8);
        let floor = weapon.degradation_floor(&config);
        assert_eq!(floor, 4);

        // Far more rolls than points of damage available.
        for _ in 0..1000 {
            weapon.degrade(&config);
        }

        assert_eq!(weapon.damage_max, floor);
        assert!(weapon.damage_min <= weapon.damage_max);
        assert_eq!(weapon.original_damage_max(), 8);
    }

    #[test]
    fn degradation_floor_rounds_up() {
        let config = CombatConfig::default();
        let weapon = Weapon::new("shiv", 1, 3);
        // 3 * 50% = 1.5, floors at 2 rather than rounding down to 1.
        assert_eq!(weapon.degradation_floor(&config), 2);
    }

    #[test]
    fn enchanted_material_reports_not_degradable() {
        assert!(!Material::Enchanted.is_degradable());
        assert!(Material::Bone.is_degradable());
    }
}
