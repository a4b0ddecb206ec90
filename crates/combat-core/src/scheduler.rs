//! Turn scheduler: roster, eligibility, and the per-phase acted guard.
//!
//! The roster is insertion-ordered, never a hash iteration order, so two
//! runs enumerate actors identically. The acted set is the single
//! re-entrancy guard for the whole kernel: it is cleared exactly once, on
//! phase advance, and a second `run_phase` within the same phase finds
//! every eligible actor already marked.

use crate::phase::Phase;
use crate::state::{Actor, ActorId, Faction};

/// Scheduling state for one encounter.
///
/// All collections are plain vectors: small rosters, deterministic
/// iteration, deterministic serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnScheduler {
    /// Live schedulable actors in spawn order.
    roster: Vec<ActorId>,

    /// Actors that already acted in the current phase.
    acted: Vec<ActorId>,

    /// Dead actors, permanently barred from rescheduling.
    retired: Vec<ActorId>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor to the roster.
    ///
    /// Re-enrolling a retired id is a contract violation: death is final
    /// within an encounter.
    pub fn enroll(&mut self, id: ActorId) {
        debug_assert!(
            !self.retired.contains(&id),
            "retired {id} must never be re-enrolled"
        );
        if self.retired.contains(&id) {
            tracing::error!(%id, "attempted to re-enroll a retired actor, ignoring");
            return;
        }
        if !self.roster.contains(&id) {
            self.roster.push(id);
        }
    }

    /// Removes a dead actor from all future scheduling.
    pub fn retire(&mut self, id: ActorId) {
        self.roster.retain(|&r| r != id);
        if !self.retired.contains(&id) {
            self.retired.push(id);
        }
    }

    pub fn is_enrolled(&self, id: ActorId) -> bool {
        self.roster.contains(&id)
    }

    pub fn is_retired(&self, id: ActorId) -> bool {
        self.retired.contains(&id)
    }

    /// Roster in stable spawn order.
    pub fn roster(&self) -> &[ActorId] {
        &self.roster
    }

    /// Which faction acts in a given phase.
    fn phase_faction(phase: Phase) -> Option<Faction> {
        match phase {
            Phase::Player => Some(Faction::Adventurers),
            Phase::Enemy => Some(Faction::Horde),
            Phase::Environment => None,
        }
    }

    /// Actors eligible to act in `phase`, in roster order, excluding any
    /// that already acted this phase.
    ///
    /// For the Environment phase every live enrolled actor is "eligible":
    /// that is the set whose status effects tick.
    pub fn eligible(&self, phase: Phase, actors: &[Actor]) -> Vec<ActorId> {
        let faction = Self::phase_faction(phase);

        self.roster
            .iter()
            .copied()
            .filter(|id| !self.has_acted(*id))
            .filter(|id| {
                actors
                    .get(id.0 as usize)
                    .is_some_and(|a| a.is_alive() && faction.is_none_or(|f| a.faction == f))
            })
            .collect()
    }

    pub fn has_acted(&self, id: ActorId) -> bool {
        self.acted.contains(&id)
    }

    /// Marks an actor as having acted this phase.
    ///
    /// Returns false when the actor was already marked; processing it a
    /// second time within one phase is the scheduler's contract violation.
    pub fn mark_acted(&mut self, id: ActorId) -> bool {
        if self.has_acted(id) {
            debug_assert!(false, "{id} double-scheduled within one phase");
            tracing::error!(%id, "double-scheduling detected, turn skipped");
            return false;
        }
        self.acted.push(id);
        true
    }

    /// Clears the acted set. Called exactly once, by the encounter, when
    /// the phase advances.
    pub fn clear_acted(&mut self) {
        self.acted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, Position, Weapon};

    fn actor(id: u32, faction: Faction) -> Actor {
        Actor::new(
            ActorId(id),
            format!("t{id}"),
            faction,
            Position::new(id as i32, 0),
            10,
            BaseStats::default(),
            Weapon::new("stick", 1, 2),
        )
    }

    #[test]
    fn eligibility_follows_roster_order_and_faction() {
        let actors = vec![
            actor(0, Faction::Adventurers),
            actor(1, Faction::Horde),
            actor(2, Faction::Adventurers),
        ];
        let mut sched = TurnScheduler::new();
        for a in &actors {
            sched.enroll(a.id);
        }

        assert_eq!(
            sched.eligible(Phase::Player, &actors),
            vec![ActorId(0), ActorId(2)]
        );
        assert_eq!(sched.eligible(Phase::Enemy, &actors), vec![ActorId(1)]);
        assert_eq!(sched.eligible(Phase::Environment, &actors).len(), 3);
    }

    #[test]
    fn acted_actors_drop_out_until_cleared() {
        let actors = vec![actor(0, Faction::Adventurers), actor(1, Faction::Adventurers)];
        let mut sched = TurnScheduler::new();
        sched.enroll(ActorId(0));
        sched.enroll(ActorId(1));

        assert!(sched.mark_acted(ActorId(0)));
        assert_eq!(sched.eligible(Phase::Player, &actors), vec![ActorId(1)]);

        sched.clear_acted();
        assert_eq!(sched.eligible(Phase::Player, &actors).len(), 2);
    }

    #[test]
    fn retired_actors_never_come_back() {
        let actors = vec![actor(0, Faction::Horde)];
        let mut sched = TurnScheduler::new();
        sched.enroll(ActorId(0));
        sched.retire(ActorId(0));

        assert!(sched.eligible(Phase::Enemy, &actors).is_empty());
        assert!(sched.is_retired(ActorId(0)));
    }
}
