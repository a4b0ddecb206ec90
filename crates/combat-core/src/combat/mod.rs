//! Attack resolution pipeline.
//!
//! There is exactly one resolution function, [`resolve::resolve_attack`],
//! and every caller (live play, the AI, the soak bot, the balance
//! harness) goes through it identically. The five resolution steps run
//! in a fixed order that no configuration can reorder:
//!
//! 1. To-hit determination (natural extremes short-circuit)
//! 2. Damage computation
//! 3. Damage application (clamped at 0)
//! 4. Secondary effects (inflicts, life drain, degradation, knockback)
//! 5. Bonus attack check (speed-gated, nested, never third-order)

pub mod damage;
pub mod hit;
pub mod resolve;

pub use damage::compute_damage;
pub use hit::{HitRoll, determine_hit, hit_chance};
pub use resolve::{AttackOutcome, ResolveContext, SecondaryEffect, resolve_attack};
