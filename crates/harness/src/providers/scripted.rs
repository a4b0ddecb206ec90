//! Scripted provider: replays a fixed intent sequence.

use std::collections::VecDeque;

use combat_core::{ActionIntent, ActorId, DecisionProvider, EncounterView, ProviderError};

/// Replays a fixed sequence of intents, then waits forever.
///
/// Stands in for human input in regression fixtures: the "sequence of
/// external decision inputs" half of the determinism contract.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    queue: VecDeque<ActionIntent>,
}

impl ScriptedProvider {
    pub fn new(intents: impl IntoIterator<Item = ActionIntent>) -> Self {
        Self {
            queue: intents.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide(
        &mut self,
        _actor: ActorId,
        _view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError> {
        Ok(self.queue.pop_front().unwrap_or(ActionIntent::Wait))
    }
}
