//! CPU stress loop

use lde_entitlement::EntitlementEngine;
use serde::Serialize;

const MODULUS: u64 = 1_000_003;
/// Simulated log/output write per run
const OUTPUT_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub iterations: u64,
    pub steps: u32,
    pub acc: u64,
}

/// Run `iterations` of modular accumulation split into `steps` chunks,
/// reporting `(done, total)` after each chunk.
pub fn stress_compute<F>(
    engine: &EntitlementEngine,
    iterations: u64,
    steps: u32,
    mut progress: F,
) -> StressReport
where
    F: FnMut(u32, u32),
{
    let steps = steps.max(1);
    let chunk = (iterations / steps as u64).max(1);

    let mut acc = 0u64;
    for step in 0..steps {
        for j in 0..chunk {
            acc = (acc + j) % MODULUS;
        }
        progress(step + 1, steps);
    }

    engine.record_write(OUTPUT_BYTES);

    StressReport { iterations, steps, acc }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_engine;

    #[test]
    fn test_stress_progress_and_write() {
        let engine = test_engine();
        let mut seen = Vec::new();

        let report = stress_compute(&engine, 100, 4, |done, total| seen.push((done, total)));
        assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        // 4 chunks of 0..25
        assert_eq!(report.acc, 4 * 300);
        assert_eq!(engine.today_mb(), (0.0, 0.06));
    }

    #[test]
    fn test_zero_steps_runs_once() {
        let engine = test_engine();
        let mut calls = 0;
        let report = stress_compute(&engine, 10, 0, |_, _| calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(report.steps, 1);
        assert_eq!(report.acc, 45);
    }
}
