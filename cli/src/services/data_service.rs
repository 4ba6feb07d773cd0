//! Mock data processing service

use lde_entitlement::workspace::bytes_to_mb;
use lde_entitlement::EntitlementEngine;
use rand::Rng;
use serde::Serialize;

const ITEM_COUNT: usize = 200;
/// Simulated read per item
const BYTES_PER_ITEM: u64 = 5 * 1024;
const SERVICE_CREDITS: i64 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct DataServiceReport {
    pub items: usize,
    pub avg: f64,
    pub bytes_mb: f64,
}

/// Average a generated dataset and account its simulated read
pub fn process_data<R: Rng>(engine: &EntitlementEngine, rng: &mut R) -> DataServiceReport {
    let values: Vec<u32> = (0..ITEM_COUNT).map(|_| rng.gen_range(1..=100)).collect();
    let sum: u64 = values.iter().map(|v| *v as u64).sum();
    let avg = sum as f64 / values.len() as f64;

    let bytes_read = values.len() as u64 * BYTES_PER_ITEM;
    engine.record_read(bytes_read);
    engine.add_credits(SERVICE_CREDITS);

    tracing::debug!(items = values.len(), avg, "Processed mock dataset");

    DataServiceReport {
        items: values.len(),
        avg: (avg * 100.0).round() / 100.0,
        bytes_mb: bytes_to_mb(bytes_read),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_engine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_process_data() {
        let engine = test_engine();
        let mut rng = StdRng::seed_from_u64(7);

        let report = process_data(&engine, &mut rng);
        assert_eq!(report.items, 200);
        assert!(report.avg >= 1.0 && report.avg <= 100.0);
        assert_eq!(report.bytes_mb, 0.98);
        assert_eq!(engine.today_mb(), (0.98, 0.0));
        assert_eq!(engine.credits(), 3);
    }
}
