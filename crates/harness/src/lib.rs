//! Harness for the combat kernel: providers, scenarios, and the
//! determinism acceptance check used in CI balance validation.
//!
//! This crate contains everything that *drives* the kernel but is not the
//! kernel: concrete decision providers, scenario fixtures, snapshot
//! persistence, and the soak runner that fails loudly on any seed-for-seed
//! divergence.

pub mod persist;
pub mod providers;
pub mod runner;
pub mod scenario;

pub use persist::{PersistError, load_snapshot, save_snapshot};
pub use providers::{HunterProvider, ScriptedProvider, SoakBotProvider};
pub use runner::{DriftError, RunReport, run_scenario, verify_determinism};
pub use scenario::{ActorPlacement, Scenario, ScenarioError};
