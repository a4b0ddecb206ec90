//! Scenario definitions: map, placements, seed, and provider wiring.
//!
//! A scenario plus a seed is the complete input to a run; everything else
//! is derived. Scenarios serialize to JSON so CI balance checks can keep
//! them as fixtures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use combat_core::{
    ActionIntent, Actor, ActorId, BaseStats, CollectingSink, CombatConfig, DecisionSourceKind,
    Encounter, EncounterSeed, Faction, LifeDrain, Position, ProviderRegistry, StatusEffect,
    TileMap, Weapon,
};

use crate::providers::{HunterProvider, ScriptedProvider, SoakBotProvider};

/// Errors loading or saving scenario files.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("scenario io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One actor to place at encounter start.
///
/// Targets inside `script` refer to spawn order: the n-th placement gets
/// `ActorId(n)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorPlacement {
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub max_health: u32,
    pub stats: BaseStats,
    pub weapon: Weapon,
    #[serde(default)]
    pub life_drain: Option<LifeDrain>,
    pub decision_source: DecisionSourceKind,
    /// Effects active from turn one (oaths, wards).
    #[serde(default)]
    pub effects: Vec<StatusEffect>,
    /// Fixed intent sequence; overrides the decision-source default
    /// provider when present.
    #[serde(default)]
    pub script: Option<Vec<ActionIntent>>,
}

/// Complete encounter setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub seed: EncounterSeed,
    pub map_width: u32,
    pub map_height: u32,
    #[serde(default)]
    pub walls: Vec<Position>,
    pub placements: Vec<ActorPlacement>,
    /// Full turn cycles to run before the report is taken.
    pub cycles: u32,
}

impl Scenario {
    /// Built-in two-on-two fixture used by the soak binary and tests.
    pub fn skirmish(seed: u64) -> Self {
        let sword = Weapon::new("arming sword", 4, 8);
        let claw = Weapon::new("claw", 2, 5);

        Self {
            name: "skirmish".to_string(),
            seed: EncounterSeed(seed),
            map_width: 12,
            map_height: 8,
            walls: Vec::new(),
            placements: vec![
                ActorPlacement {
                    name: "veteran".to_string(),
                    faction: Faction::Adventurers,
                    position: Position::new(1, 2),
                    max_health: 30,
                    stats: BaseStats {
                        accuracy: 10,
                        evasion: 4,
                        strength: 6,
                        armor: 2,
                        speed_ratio: 120,
                    },
                    weapon: sword.clone(),
                    life_drain: None,
                    decision_source: DecisionSourceKind::Ai,
                    effects: Vec::new(),
                    script: None,
                },
                ActorPlacement {
                    name: "squire".to_string(),
                    faction: Faction::Adventurers,
                    position: Position::new(1, 5),
                    max_health: 24,
                    stats: BaseStats::default(),
                    weapon: sword,
                    life_drain: None,
                    decision_source: DecisionSourceKind::Ai,
                    effects: Vec::new(),
                    script: None,
                },
                ActorPlacement {
                    name: "ghast".to_string(),
                    faction: Faction::Horde,
                    position: Position::new(9, 3),
                    max_health: 26,
                    stats: BaseStats {
                        accuracy: 7,
                        evasion: 6,
                        strength: 5,
                        armor: 1,
                        speed_ratio: 100,
                    },
                    weapon: claw.clone(),
                    life_drain: Some(LifeDrain { percent: 0 }),
                    decision_source: DecisionSourceKind::Ai,
                    effects: Vec::new(),
                    script: None,
                },
                ActorPlacement {
                    name: "bone heap".to_string(),
                    faction: Faction::Horde,
                    position: Position::new(10, 5),
                    max_health: 20,
                    stats: BaseStats::default(),
                    weapon: claw,
                    life_drain: None,
                    decision_source: DecisionSourceKind::Bot,
                    effects: Vec::new(),
                    script: None,
                },
            ],
            cycles: 40,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    fn build_map(&self) -> TileMap {
        let mut map = TileMap::open(self.map_width, self.map_height);
        for wall in &self.walls {
            map.block(*wall);
        }
        map
    }

    /// Instantiates the encounter and the provider wiring.
    ///
    /// Bot providers are seeded from the scenario seed and the actor id so
    /// the whole run is a pure function of the scenario.
    pub fn build(&self) -> (Encounter<CollectingSink>, ProviderRegistry) {
        let mut encounter = Encounter::new(
            self.seed,
            self.build_map(),
            CombatConfig::default(),
            CollectingSink::new(),
        );
        let mut providers = ProviderRegistry::new();

        for placement in &self.placements {
            let id = encounter.spawn(|id| {
                let mut actor = Actor::new(
                    id,
                    placement.name.clone(),
                    placement.faction,
                    placement.position,
                    placement.max_health,
                    placement.stats,
                    placement.weapon.clone(),
                )
                .with_decision_source(placement.decision_source);
                if let Some(drain) = placement.life_drain {
                    actor = actor.with_life_drain(drain);
                }
                for effect in &placement.effects {
                    actor.status.apply(*effect);
                }
                actor
            });

            providers.register(id, self.provider_for(placement, id));
        }

        (encounter, providers)
    }

    fn provider_for(
        &self,
        placement: &ActorPlacement,
        id: ActorId,
    ) -> Box<dyn combat_core::DecisionProvider> {
        if let Some(script) = &placement.script {
            return Box::new(ScriptedProvider::new(script.iter().copied()));
        }

        match placement.decision_source {
            // Human sources have no input during automated runs; they
            // wait, same as the kernel's own fallback.
            DecisionSourceKind::Human => Box::new(ScriptedProvider::default()),
            DecisionSourceKind::Ai => Box::new(HunterProvider),
            DecisionSourceKind::Bot => Box::new(SoakBotProvider::new(EncounterSeed(
                self.seed.0 ^ ((id.0 as u64 + 1) << 32),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skirmish_round_trips_through_json() {
        let scenario = Scenario::skirmish(42);
        let text = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&text).unwrap();
        assert_eq!(scenario, back);
    }

    #[test]
    fn build_spawns_placements_in_order() {
        let scenario = Scenario::skirmish(42);
        let (encounter, _providers) = scenario.build();

        assert_eq!(encounter.actors().len(), 4);
        assert_eq!(encounter.actors()[0].name, "veteran");
        assert_eq!(encounter.actors()[3].faction, Faction::Horde);
    }
}
