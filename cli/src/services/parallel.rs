//! Parallel compute demo over tokio blocking workers

use lde_entitlement::EntitlementEngine;
use serde::Serialize;
use std::sync::Arc;

pub const MAX_UNITS: usize = 200;
const MAX_WORKERS: usize = 4;
const INNER_ROUNDS: u64 = 5000;
const MODULUS: u64 = 1_000_003;
const COMPUTE_CREDITS: i64 = 5;
const PREVIEW_LEN: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ComputeReport {
    pub units: usize,
    pub workers: usize,
    pub first: Vec<u64>,
    pub last: Vec<u64>,
}

/// One unit of synthetic CPU work
pub fn heavy_compute(x: u64) -> u64 {
    let mut s = 0u64;
    for i in 0..INNER_ROUNDS {
        s = (s + x * i) % MODULUS;
    }
    s
}

pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_WORKERS)
}

/// Run `heavy_compute` over `1..=units` (capped) and award credits.
/// Outputs keep input order.
pub async fn compute(engine: Arc<EntitlementEngine>, units: usize) -> anyhow::Result<ComputeReport> {
    let units = units.min(MAX_UNITS);
    let workers = worker_count();
    let per_worker = units.div_ceil(workers).max(1);

    let inputs: Vec<u64> = (1..=units as u64).collect();
    let handles: Vec<_> = inputs
        .chunks(per_worker)
        .map(|chunk| {
            let chunk = chunk.to_vec();
            tokio::task::spawn_blocking(move || {
                chunk.into_iter().map(heavy_compute).collect::<Vec<_>>()
            })
        })
        .collect();

    let mut outputs = Vec::with_capacity(units);
    for handle in handles {
        outputs.extend(handle.await?);
    }

    let credits = {
        let engine = Arc::clone(&engine);
        tokio::task::spawn_blocking(move || engine.add_credits(COMPUTE_CREDITS)).await?
    };
    tracing::debug!(units, workers, credits, "Parallel compute finished");

    let tail_start = outputs.len().saturating_sub(PREVIEW_LEN);
    Ok(ComputeReport {
        units,
        workers,
        first: outputs.iter().take(PREVIEW_LEN).copied().collect(),
        last: outputs[tail_start..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_engine;

    #[test]
    fn test_heavy_compute() {
        assert_eq!(heavy_compute(0), 0);
        // sum of 0..5000 = 12_497_500
        assert_eq!(heavy_compute(1), 12_497_500 % MODULUS);
    }

    #[test]
    fn test_worker_count_bounded() {
        let n = worker_count();
        assert!((1..=MAX_WORKERS).contains(&n));
    }

    #[tokio::test]
    async fn test_compute_caps_units_and_awards_credits() {
        let engine = Arc::new(test_engine());
        let report = compute(Arc::clone(&engine), 500).await.unwrap();

        assert_eq!(report.units, MAX_UNITS);
        assert_eq!(report.first.len(), 5);
        assert_eq!(report.first[0], heavy_compute(1));
        assert_eq!(report.first[1], heavy_compute(2));
        assert_eq!(report.last[4], heavy_compute(200));
        assert_eq!(engine.credits(), 5);
    }

    #[tokio::test]
    async fn test_compute_zero_units() {
        let engine = Arc::new(test_engine());
        let report = compute(Arc::clone(&engine), 0).await.unwrap();
        assert!(report.first.is_empty());
        assert!(report.last.is_empty());
        assert_eq!(engine.credits(), 5);
    }
}
