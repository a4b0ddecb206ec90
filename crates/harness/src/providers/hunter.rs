//! Rule-based AI policy.

use combat_core::{
    ActionIntent, Actor, ActorId, CardinalDirection, DecisionProvider, EncounterView,
    ProviderError,
};

/// Simple aggressive policy: attack an adjacent enemy, otherwise close the
/// distance to the nearest one, otherwise wait.
///
/// All tie-breaks are by spawn id so the policy is deterministic without
/// consuming any randomness.
#[derive(Clone, Copy, Debug, Default)]
pub struct HunterProvider;

impl HunterProvider {
    /// Preferred target: adjacent enemy with the lowest health, ties by id.
    fn adjacent_target<'a>(actor: &Actor, enemies: &[&'a Actor]) -> Option<&'a Actor> {
        enemies
            .iter()
            .filter(|e| actor.position.chebyshev_distance(e.position) <= 1)
            .min_by_key(|e| (e.health.current(), e.id))
            .copied()
    }

    /// Nearest enemy by Chebyshev distance, ties by id.
    fn nearest_enemy<'a>(actor: &Actor, enemies: &[&'a Actor]) -> Option<&'a Actor> {
        enemies
            .iter()
            .min_by_key(|e| (actor.position.chebyshev_distance(e.position), e.id))
            .copied()
    }

    /// One unblocked step towards the target, or None when boxed in.
    fn step_towards(
        actor: &Actor,
        target: &Actor,
        view: &EncounterView<'_>,
    ) -> Option<CardinalDirection> {
        let direction = CardinalDirection::towards(actor.position, target.position)?;

        // Try the dominant axis first, then the three others in a fixed
        // order, never stepping away from the target.
        let candidates = [
            direction,
            CardinalDirection::North,
            CardinalDirection::South,
            CardinalDirection::East,
            CardinalDirection::West,
        ];
        let current_distance = actor.position.chebyshev_distance(target.position);

        candidates.into_iter().find(|&dir| {
            let next = actor.position.step(dir);
            !view.map.is_blocked(next)
                && !view.occupied(next, actor.id)
                && next.chebyshev_distance(target.position) < current_distance
        })
    }
}

impl DecisionProvider for HunterProvider {
    fn decide(
        &mut self,
        actor: ActorId,
        view: &EncounterView<'_>,
    ) -> Result<ActionIntent, ProviderError> {
        let me = view
            .actor(actor)
            .ok_or(ProviderError::NoIntent { actor })?;
        let enemies = view.live_enemies_of(actor);

        if let Some(target) = Self::adjacent_target(me, &enemies) {
            return Ok(ActionIntent::Attack { target: target.id });
        }

        if let Some(target) = Self::nearest_enemy(me, &enemies)
            && let Some(direction) = Self::step_towards(me, target, view)
        {
            return Ok(ActionIntent::Move { direction });
        }

        Ok(ActionIntent::Wait)
    }
}
