//! Encounter orchestration.
//!
//! [`Encounter`] is the kernel instance: it owns the phase machine, the
//! scheduler, the actors, the map, the RNG stream, and the metrics sink,
//! and every state mutation flows through it. Callers supply decision
//! providers per phase run; nothing here is global.

use crate::combat::{AttackOutcome, ResolveContext, resolve_attack};
use crate::config::CombatConfig;
use crate::intent::{ActionIntent, ItemKind};
use crate::metrics::{MetricsEvent, MetricsSink};
use crate::phase::{Phase, PhaseMachine, PhaseTransition, TurnSide};
use crate::provider::ProviderRegistry;
use crate::rng::{EncounterRng, EncounterSeed};
use crate::scheduler::TurnScheduler;
use crate::state::{Actor, ActorId, CardinalDirection, Position, TileMap};

/// Read-only view of encounter state handed to decision providers (and
/// anything else that only observes, like rendering).
pub struct EncounterView<'a> {
    pub phase: Phase,
    pub cycle: u64,
    pub actors: &'a [Actor],
    pub map: &'a TileMap,
    pub config: &'a CombatConfig,
}

impl<'a> EncounterView<'a> {
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    /// Live hostile actors from `id`'s point of view, in spawn order.
    pub fn live_enemies_of(&self, id: ActorId) -> Vec<&Actor> {
        let Some(actor) = self.actor(id) else {
            return Vec::new();
        };
        self.actors
            .iter()
            .filter(|a| a.is_alive() && actor.faction.is_hostile_to(a.faction))
            .collect()
    }

    /// True when a live actor other than `ignore` stands on `pos`.
    pub fn occupied(&self, pos: Position, ignore: ActorId) -> bool {
        self.actors
            .iter()
            .any(|a| a.id != ignore && a.is_alive() && a.position == pos)
    }
}

/// One combat encounter: the deterministic kernel instance.
pub struct Encounter<S: MetricsSink> {
    config: CombatConfig,
    seed: EncounterSeed,
    rng: EncounterRng,
    phase: PhaseMachine,
    scheduler: TurnScheduler,
    actors: Vec<Actor>,
    map: TileMap,
    sink: S,
}

impl<S: MetricsSink> Encounter<S> {
    /// Creates an encounter with a constructor-injected seed. The seed is
    /// the sole entropy source for the encounter's lifetime.
    pub fn new(seed: EncounterSeed, map: TileMap, config: CombatConfig, sink: S) -> Self {
        Self {
            config,
            seed,
            rng: EncounterRng::from_seed(seed),
            phase: PhaseMachine::new(),
            scheduler: TurnScheduler::new(),
            actors: Vec::new(),
            map,
            sink,
        }
    }

    /// Spawns an actor and enrolls it for scheduling.
    ///
    /// The closure receives the allocated id and must build the actor with
    /// it; ids are sequential and never reused.
    pub fn spawn(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = ActorId(self.actors.len() as u32);
        let actor = build(id);
        debug_assert_eq!(actor.id, id, "spawned actor must carry its allocated id");

        self.actors.push(actor);
        self.scheduler.enroll(id);
        id
    }

    pub fn seed(&self) -> EncounterSeed {
        self.seed
    }

    /// The current phase, per the single phase authority.
    pub fn phase(&self) -> Phase {
        self.phase.current()
    }

    /// Coarse side view, derived from the phase in lock-step.
    pub fn side(&self) -> TurnSide {
        self.phase.side()
    }

    pub fn cycle(&self) -> u64 {
        self.phase.cycle()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// True while both factions still have live combatants.
    pub fn is_contested(&self) -> bool {
        let live_adventurers = self
            .actors
            .iter()
            .any(|a| a.is_alive() && a.faction == crate::state::Faction::Adventurers);
        let live_horde = self
            .actors
            .iter()
            .any(|a| a.is_alive() && a.faction == crate::state::Faction::Horde);
        live_adventurers && live_horde
    }

    pub fn view(&self) -> EncounterView<'_> {
        EncounterView {
            phase: self.phase.current(),
            cycle: self.phase.cycle(),
            actors: &self.actors,
            map: &self.map,
            config: &self.config,
        }
    }

    /// Runs the current phase to completion.
    ///
    /// Player/Enemy phases enumerate eligible actors in stable spawn
    /// order, pull one intent each, and resolve it. The Environment phase
    /// ticks every live actor's status effects exactly once. The acted
    /// guard makes a repeated `run_phase` call within the same phase a
    /// no-op rather than a double turn.
    pub fn run_phase(&mut self, providers: &mut ProviderRegistry) -> Vec<AttackOutcome> {
        let phase = self.phase.current();

        if phase == Phase::Environment {
            self.run_environment_phase();
            return Vec::new();
        }

        let mut outcomes = Vec::new();

        // Re-evaluate eligibility each step so actors killed mid-phase
        // never act, while the acted guard keeps everyone to one turn.
        while let Some(actor) = self
            .scheduler
            .eligible(phase, &self.actors)
            .first()
            .copied()
        {
            if !self.scheduler.mark_acted(actor) {
                break;
            }

            let decided = {
                let view = self.view();
                providers.decide(actor, &view)
            };
            let intent = match decided {
                Ok(intent) => intent,
                Err(error) => {
                    // Fail-safe: a broken decision source wastes its turn,
                    // never the encounter.
                    tracing::warn!(%actor, %error, "decision source failed, substituting wait");
                    self.sink.record(&MetricsEvent::ProviderFailed { actor });
                    ActionIntent::Wait
                }
            };

            if let Some(outcome) = self.resolve_intent(actor, intent) {
                outcomes.push(outcome);
            }
        }

        outcomes
    }

    /// Advances the phase machine, clears the acted guard, and reports the
    /// transition. The only path by which the phase changes.
    pub fn advance_phase(&mut self) -> PhaseTransition {
        self.scheduler.clear_acted();
        let transition = self.phase.advance();
        self.sink.record(&MetricsEvent::PhaseTransition {
            from: transition.from,
            to: transition.to,
            cycle: transition.cycle,
        });
        transition
    }

    /// Runs one full Player → Enemy → Environment cycle.
    pub fn run_cycle(&mut self, providers: &mut ProviderRegistry) -> Vec<AttackOutcome> {
        debug_assert_eq!(self.phase.current(), Phase::Player, "cycle starts at Player");

        let mut outcomes = Vec::new();
        for _ in 0..3 {
            outcomes.extend(self.run_phase(providers));
            self.advance_phase();
        }
        outcomes
    }

    /// Runs full cycles until one side is wiped out or `max_cycles` have
    /// elapsed. Returns the cycles actually run.
    pub fn run_until_settled(
        &mut self,
        providers: &mut ProviderRegistry,
        max_cycles: u32,
    ) -> u32 {
        let mut run = 0;
        for _ in 0..max_cycles {
            if !self.is_contested() {
                break;
            }
            self.run_cycle(providers);
            run += 1;
        }
        run
    }

    /// Submits one intent for resolution. Atomic: once submitted, it runs
    /// to completion.
    fn resolve_intent(&mut self, actor: ActorId, intent: ActionIntent) -> Option<AttackOutcome> {
        match intent {
            ActionIntent::Attack { target } => Some(self.resolve_attack_intent(actor, target)),
            ActionIntent::Move { direction } => {
                self.resolve_move(actor, direction);
                None
            }
            ActionIntent::UseItem { item, target } => {
                self.resolve_use_item(actor, item, target);
                None
            }
            ActionIntent::Wait => None,
        }
    }

    fn resolve_attack_intent(&mut self, attacker: ActorId, target: ActorId) -> AttackOutcome {
        let outcome = {
            let mut ctx = ResolveContext {
                actors: &mut self.actors,
                map: &self.map,
                config: &self.config,
                rng: &mut self.rng,
                sink: &mut self.sink,
            };
            resolve_attack(&mut ctx, attacker, target)
        };

        self.retire_dead();
        outcome
    }

    fn resolve_move(&mut self, actor: ActorId, direction: CardinalDirection) {
        let Some(current) = self.actor(actor).filter(|a| a.is_alive()) else {
            return;
        };
        if current.status.is_immobilized() {
            tracing::debug!(%actor, "move suppressed: immobilized");
            return;
        }

        let next = current.position.step(direction);
        if self.map.is_blocked(next) || self.view().occupied(next, actor) {
            tracing::debug!(%actor, ?next, "move suppressed: blocked");
            return;
        }

        self.actors[actor.0 as usize].position = next;
    }

    fn resolve_use_item(&mut self, actor: ActorId, item: ItemKind, target: Option<ActorId>) {
        let target = target.unwrap_or(actor);
        let Some(recipient) = self.actors.get_mut(target.0 as usize) else {
            return;
        };
        if !recipient.is_alive() {
            return;
        }

        match item {
            ItemKind::HealingDraught { amount } => {
                recipient.health.heal(amount);
            }
            ItemKind::Philter { effect } => {
                recipient.status.apply(effect);
            }
        }
    }

    /// Environment phase: tick every live actor's status effects exactly
    /// once per cycle, in stable spawn order. Idempotent within a phase
    /// via the same acted guard as the combat phases.
    fn run_environment_phase(&mut self) {
        while let Some(actor) = self
            .scheduler
            .eligible(Phase::Environment, &self.actors)
            .first()
            .copied()
        {
            if !self.scheduler.mark_acted(actor) {
                break;
            }
            self.tick_actor(actor);
        }
    }

    fn tick_actor(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id.0 as usize) else {
            return;
        };
        if !actor.is_alive() {
            // Tick on a dead actor is a no-op.
            return;
        }

        let report = actor.status.tick();
        actor.health.damage(report.dot_damage);
        let died = !actor.is_alive();

        for (kind, magnitude) in &report.ticked {
            self.sink.record(&MetricsEvent::StatusTick {
                actor: id,
                kind: *kind,
                magnitude: *magnitude,
            });
        }
        for kind in &report.expired {
            self.sink
                .record(&MetricsEvent::StatusExpired { actor: id, kind: *kind });
        }
        if died {
            self.sink.record(&MetricsEvent::ActorDied { actor: id });
        }

        self.retire_dead();
    }

    /// Captures the full encounter state, including the RNG stream and the
    /// acted guard, for external serialization.
    #[cfg(feature = "serde")]
    pub fn snapshot(&self) -> crate::snapshot::EncounterSnapshot {
        crate::snapshot::EncounterSnapshot {
            config: self.config.clone(),
            seed: self.seed,
            rng: self.rng,
            phase: self.phase.clone(),
            scheduler: self.scheduler.clone(),
            actors: self.actors.clone(),
            map: self.map.clone(),
        }
    }

    /// Rebuilds an encounter from a snapshot.
    ///
    /// Continuing from the restored instance is bit-for-bit identical to
    /// never having paused; providers are re-wired by the caller using the
    /// actors' [`crate::state::DecisionSourceKind`] tags.
    #[cfg(feature = "serde")]
    pub fn restore(snapshot: crate::snapshot::EncounterSnapshot, sink: S) -> Self {
        Self {
            config: snapshot.config,
            seed: snapshot.seed,
            rng: snapshot.rng,
            phase: snapshot.phase,
            scheduler: snapshot.scheduler,
            actors: snapshot.actors,
            map: snapshot.map,
            sink,
        }
    }

    /// Permanently removes dead actors from scheduling. Their state stays
    /// readable; only their turns are gone.
    fn retire_dead(&mut self) {
        for actor in &self.actors {
            if !actor.is_alive() && self.scheduler.is_enrolled(actor.id) {
                self.scheduler.retire(actor.id);
            }
        }
    }
}
