//! Phase state machine.
//!
//! One owned [`PhaseMachine`] instance is the single authority on the
//! current phase. Other systems query it; none of them hold a shadow flag.
//! The legacy coarse "whose side is it" view is derived from the phase on
//! demand so the two representations cannot drift apart.

/// One of the three phases in a turn cycle.
///
/// The Environment phase may be a no-op when nothing environmental is
/// active, but it is always visited, never skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Player,
    Enemy,
    Environment,
}

impl Phase {
    /// Strictly defined successor: Player → Enemy → Environment → Player.
    pub fn successor(self) -> Phase {
        match self {
            Phase::Player => Phase::Enemy,
            Phase::Enemy => Phase::Environment,
            Phase::Environment => Phase::Player,
        }
    }

    /// Coarse side view kept for callers that only care about player-side
    /// versus world-side. Derived, never stored.
    pub fn side(self) -> TurnSide {
        match self {
            Phase::Player => TurnSide::PlayerSide,
            Phase::Enemy | Phase::Environment => TurnSide::WorldSide,
        }
    }
}

/// Coarse-grained turn ownership, computed from [`Phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnSide {
    PlayerSide,
    WorldSide,
}

/// A phase transition as reported by [`PhaseMachine::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Completed full cycles; increments when wrapping back to Player.
    pub cycle: u64,
}

/// The single source of truth for the current phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseMachine {
    phase: Phase,
    cycle: u64,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Player,
            cycle: 0,
        }
    }

    /// The current phase. The only authority other systems consult.
    pub fn current(&self) -> Phase {
        self.phase
    }

    /// Coarse side view of the current phase, kept in lock-step by
    /// derivation.
    pub fn side(&self) -> TurnSide {
        self.phase.side()
    }

    /// Completed full turn cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Moves to the successor phase. Never rejected; this is the only way
    /// the phase changes.
    pub fn advance(&mut self) -> PhaseTransition {
        let from = self.phase;
        self.phase = from.successor();
        if self.phase == Phase::Player {
            self.cycle += 1;
        }

        PhaseTransition {
            from,
            to: self.phase,
            cycle: self.cycle,
        }
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
