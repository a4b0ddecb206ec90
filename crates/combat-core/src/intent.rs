//! Action intents: one turn's chosen action, produced by a decision source.

use crate::state::{ActorId, CardinalDirection};
use crate::status::StatusEffect;

/// The consumable items the kernel understands.
///
/// Inventory schemas beyond these numeric payloads are out of scope; an
/// item is just the effect it has when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Restores health to the target (defaults to the user).
    HealingDraught { amount: u32 },
    /// Applies a status effect to the target (defaults to the user).
    Philter { effect: StatusEffect },
}

/// One turn's chosen action. Immutable once submitted for the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionIntent {
    /// Attack a target with the equipped weapon.
    Attack { target: ActorId },
    /// Step one tile in a direction.
    Move { direction: CardinalDirection },
    /// Consume an item, optionally on another actor.
    UseItem {
        item: ItemKind,
        target: Option<ActorId>,
    },
    /// Do nothing this turn. Also the fail-safe substitute when a
    /// decision source errors.
    Wait,
}
