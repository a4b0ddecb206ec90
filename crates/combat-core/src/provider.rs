//! Decision source abstraction.
//!
//! Callers plug in [`DecisionProvider`] implementations so the same kernel
//! runs with human input, a rule-based AI policy, or the soak/regression
//! bot. The kernel has no knowledge of which kind supplied an intent.

use std::collections::HashMap;

use crate::encounter::EncounterView;
use crate::intent::ActionIntent;
use crate::state::ActorId;

/// Errors a decision source may surface.
///
/// The scheduler recovers from all of these by substituting
/// [`ActionIntent::Wait`]; one broken provider never halts an encounter.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("decision source disconnected: {0}")]
    Disconnected(String),

    #[error("decision source produced no intent for {actor}")]
    NoIntent { actor: ActorId },

    #[error("decision source failed: {0}")]
    Internal(String),
}

/// Trait for providing one action intent per invocation.
///
/// Implementations may be backed by asynchronous input collection, but by
/// the time the scheduler calls `decide` they must answer synchronously;
/// resolution never suspends mid-turn.
pub trait DecisionProvider {
    /// Choose an intent for `actor` given a read-only view of the
    /// encounter.
    fn decide(
        &mut self,
        actor: ActorId,
        view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError>;
}

/// Provider that always waits. The fallback for actors with no registered
/// provider, and a useful fixture in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitProvider;

impl DecisionProvider for WaitProvider {
    fn decide(
        &mut self,
        _actor: ActorId,
        _view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError> {
        Ok(ActionIntent::Wait)
    }
}

/// Per-actor provider wiring, owned by the caller and passed into
/// `run_phase`.
///
/// Keeping providers outside the encounter keeps the kernel state purely
/// data: snapshots serialize the [`crate::state::DecisionSourceKind`] tag
/// and the caller re-wires concrete providers after a restore.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ActorId, Box<dyn DecisionProvider>>,
    fallback: WaitProvider,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the provider that will act for `actor`. Replaces any
    /// previous registration.
    pub fn register(&mut self, actor: ActorId, provider: Box<dyn DecisionProvider>) {
        self.providers.insert(actor, provider);
    }

    /// Decides for `actor`, falling back to Wait when no provider is
    /// registered.
    pub fn decide(
        &mut self,
        actor: ActorId,
        view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError> {
        match self.providers.get_mut(&actor) {
            Some(provider) => provider.decide(actor, view),
            None => self.fallback.decide(actor, view),
        }
    }
}
