//! Scenario runner and the determinism acceptance check.
//!
//! Repeated runs of one scenario must produce identical reports; any
//! divergence means the kernel's determinism contract broke and is
//! surfaced as [`DriftError`] rather than tolerated.

use combat_core::{MetricsEvent, digest_value};

use crate::scenario::Scenario;

/// Everything observable from one run: the ordered metrics events and a
/// digest over them plus the final state.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub scenario: String,
    pub cycles_run: u32,
    pub events: Vec<MetricsEvent>,
    /// Hex SHA-256 over (final snapshot, events).
    pub digest: String,
}

impl RunReport {
    /// Short digest form for log lines. Falls back to the whole string
    /// when the digest is not the usual 64-char hex (encode-error marker).
    pub fn digest_prefix(&self) -> &str {
        self.digest.get(..16).unwrap_or(&self.digest)
    }
}

/// Determinism drift: two runs of the same scenario disagreed.
#[derive(Debug, thiserror::Error)]
#[error("determinism drift in scenario '{scenario}': run {run} digest {got} != {expected}")]
pub struct DriftError {
    pub scenario: String,
    pub run: u32,
    pub expected: String,
    pub got: String,
}

/// Runs a scenario to completion (cycle budget or one side wiped out) and
/// reports it.
pub fn run_scenario(scenario: &Scenario) -> RunReport {
    let (mut encounter, mut providers) = scenario.build();
    let cycles_run = encounter.run_until_settled(&mut providers, scenario.cycles);

    let snapshot = encounter.snapshot();
    let events = encounter.sink_mut().take();
    let digest = digest_value(&(&snapshot, &events))
        .map(hex::encode)
        // bincode encoding of plain state types cannot fail; treat it as
        // a drift marker rather than panicking mid-harness.
        .unwrap_or_else(|err| format!("encode-error:{err}"));

    RunReport {
        scenario: scenario.name.clone(),
        cycles_run,
        events,
        digest,
    }
}

/// Runs the scenario `repeats` times and verifies every report is
/// identical. The externally-checked acceptance criterion for kernel
/// changes.
pub fn verify_determinism(scenario: &Scenario, repeats: u32) -> Result<RunReport, DriftError> {
    let reference = run_scenario(scenario);

    for run in 1..repeats {
        let report = run_scenario(scenario);
        if report.digest != reference.digest || report.events != reference.events {
            return Err(DriftError {
                scenario: scenario.name.clone(),
                run,
                expected: reference.digest,
                got: report.digest,
            });
        }
    }

    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_determinism_accepts_the_builtin_scenario() {
        let scenario = Scenario::skirmish(42);
        let report = verify_determinism(&scenario, 3).unwrap();
        assert!(!report.events.is_empty());
    }

    #[test]
    fn digest_prefix_never_panics_on_short_digests() {
        let mut report = run_scenario(&Scenario::skirmish(42));
        assert_eq!(report.digest_prefix().len(), 16);

        // The encode-error marker path produces an arbitrary-length
        // string; the prefix must degrade to the whole thing.
        report.digest = "encode-error:x".to_string();
        assert_eq!(report.digest_prefix(), "encode-error:x");
    }
}
