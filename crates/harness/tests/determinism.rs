//! Determinism acceptance tests: fixed seed + fixed decision inputs must
//! reproduce outcomes and metrics byte-for-byte.

use combat_core::{
    ActionIntent, Actor, ActorId, AttackOutcome, BaseStats, CollectingSink, CombatConfig,
    DecisionSourceKind, Encounter, EncounterSeed, Faction, MetricsEvent, Position,
    ProviderRegistry, TileMap, Weapon,
};
use combat_harness::{Scenario, ScriptedProvider, verify_determinism};

/// The reference duel: A (30 hp, accuracy 10, evasion 2) swings a 4-8
/// weapon at B (20 hp, evasion 5) while B holds still.
fn run_duel(seed: u64) -> (Vec<AttackOutcome>, Vec<MetricsEvent>) {
    let mut encounter = Encounter::new(
        EncounterSeed(seed),
        TileMap::open(10, 10),
        CombatConfig::default(),
        CollectingSink::new(),
    );

    let a = encounter.spawn(|id| {
        Actor::new(
            id,
            "a",
            Faction::Adventurers,
            Position::new(1, 1),
            30,
            BaseStats {
                accuracy: 10,
                evasion: 2,
                strength: 4,
                armor: 0,
                speed_ratio: 100,
            },
            Weapon::new("longsword", 4, 8),
        )
        .with_decision_source(DecisionSourceKind::Human)
    });
    let b = encounter.spawn(|id| {
        Actor::new(
            id,
            "b",
            Faction::Horde,
            Position::new(2, 1),
            20,
            BaseStats {
                accuracy: 5,
                evasion: 5,
                strength: 2,
                armor: 0,
                speed_ratio: 100,
            },
            Weapon::new("claw", 2, 4),
        )
    });

    let mut providers = ProviderRegistry::new();
    providers.register(
        a,
        Box::new(ScriptedProvider::new(std::iter::repeat_n(
            ActionIntent::Attack { target: b },
            12,
        ))),
    );
    providers.register(b, Box::new(ScriptedProvider::default()));

    let mut outcomes = Vec::new();
    for _ in 0..12 {
        if !encounter.is_contested() {
            break;
        }
        outcomes.extend(encounter.run_cycle(&mut providers));
    }

    (outcomes, encounter.sink_mut().take())
}

#[test]
fn duel_is_identical_across_three_runs_with_one_seed() {
    let first = run_duel(42);
    for _ in 0..2 {
        assert_eq!(run_duel(42), first);
    }
}

#[test]
fn duel_differs_between_seed_42_and_43() {
    let (outcomes_42, _) = run_duel(42);
    let (outcomes_43, _) = run_duel(43);
    assert_ne!(outcomes_42, outcomes_43);
}

#[test]
fn duel_respects_health_floor_throughout() {
    let (outcomes, _) = run_duel(42);

    // Accumulated damage can exceed B's 20 hp on paper; the applied
    // damage in outcomes reflects the real swings, and the kernel clamps
    // at zero rather than going negative.
    assert!(outcomes.iter().all(|o| o.attacker == ActorId(0)));
    let (_, events) = run_duel(42);
    assert!(events.iter().any(|e| matches!(e, MetricsEvent::ActorDied { actor } if *actor == ActorId(1))));
}

#[test]
fn skirmish_scenario_reports_are_reproducible() {
    let scenario = Scenario::skirmish(42);
    let report = verify_determinism(&scenario, 3).expect("no drift across repeats");
    assert!(report.events.iter().any(|e| matches!(e, MetricsEvent::AttackResolved { .. })));

    let other = verify_determinism(&Scenario::skirmish(43), 3).expect("no drift across repeats");
    assert_ne!(report.digest, other.digest);
}
