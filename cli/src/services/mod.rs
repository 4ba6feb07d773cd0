//! Engine consumers exposed by the CLI

pub mod chunker;
pub mod data_service;
pub mod explainer;
pub mod parallel;
pub mod stress;

#[cfg(test)]
pub fn test_engine() -> lde_entitlement::EntitlementEngine {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    lde_entitlement::EntitlementEngine::simulated(start, lde_entitlement::PersistScope::Ledger).0
}
