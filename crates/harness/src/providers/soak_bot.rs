//! Automated soak/regression bot policy.

use combat_core::{
    ActionIntent, ActorId, CardinalDirection, DecisionProvider, EncounterRng, EncounterSeed,
    EncounterView, ProviderError,
};

/// Randomized but fully reproducible policy for soak runs.
///
/// The bot draws from its own seeded PCG stream, separate from the
/// encounter's: decision sources are external input, so their randomness
/// is part of the "sequence of decision inputs", not of the kernel. Given
/// the same bot seed, the emitted intent sequence is identical run to run.
#[derive(Clone, Debug)]
pub struct SoakBotProvider {
    rng: EncounterRng,
}

impl SoakBotProvider {
    pub fn new(seed: EncounterSeed) -> Self {
        Self {
            rng: EncounterRng::from_seed(seed),
        }
    }

    fn random_direction(&mut self) -> CardinalDirection {
        match self.rng.range(0, 3) {
            0 => CardinalDirection::North,
            1 => CardinalDirection::South,
            2 => CardinalDirection::East,
            _ => CardinalDirection::West,
        }
    }
}

impl DecisionProvider for SoakBotProvider {
    fn decide(
        &mut self,
        actor: ActorId,
        view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError> {
        let me = view
            .actor(actor)
            .ok_or(ProviderError::NoIntent { actor })?;

        // Mostly fight, sometimes wander, occasionally idle; weights are
        // arbitrary but fixed.
        let adjacent: Vec<ActorId> = view
            .live_enemies_of(actor)
            .iter()
            .filter(|e| me.position.chebyshev_distance(e.position) <= 1)
            .map(|e| e.id)
            .collect();

        if !adjacent.is_empty() && self.rng.chance(80) {
            let pick = self.rng.range(0, adjacent.len() as u32 - 1) as usize;
            return Ok(ActionIntent::Attack {
                target: adjacent[pick],
            });
        }

        if self.rng.chance(75) {
            return Ok(ActionIntent::Move {
                direction: self.random_direction(),
            });
        }

        Ok(ActionIntent::Wait)
    }
}
