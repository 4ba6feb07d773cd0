//! LDE Entitlement Engine
//!
//! Tiered resource entitlements, daily quotas, simulated storage accounting
//! and a reward credit ledger for the LDE demo application.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ENTITLEMENT ENGINE                                │
//! │                                                                         │
//! │  caller ─► lock ─► reload ─► rollover ─► mutate ─► persist ─► unlock    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │    Tier      │  │  Usage Cap   │  │  Workspace   │  │   Credit    │ │
//! │  │   Machine    │  │    Gate      │  │  Accounting  │  │   Ledger    │ │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────┘  └─────────────┘ │
//! │         │                 │                                             │
//! │  ┌──────▼─────────────────▼───────┐  ┌──────────────────────────────┐  │
//! │  │       Resource Resolver        │  │     Persistence Adapter      │  │
//! │  │  free | battery | pro bundles  │  │  JSON record, never fatal    │  │
//! │  └────────────────────────────────┘  └──────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use lde_entitlement::{EntitlementEngine, PersistScope, Tier};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let (engine, _store, clock) = EntitlementEngine::simulated(start, PersistScope::Ledger);
//!
//! for _ in 0..7 {
//!     engine.record_contribution(18);
//!     clock.advance_days(1);
//! }
//! assert_eq!(engine.tier(), Tier::Battery);
//! assert!(engine.try_consume_message());
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod credits;
pub mod engine;
pub mod error;
pub mod model;
pub mod resources;
pub mod rollover;
pub mod store;
pub mod summary;
pub mod tiers;
pub mod usage;
pub mod workspace;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use engine::EntitlementEngine;
pub use error::{EntitlementError, EntitlementResult, StoreError};
pub use model::{AccountState, Contribution, DailyIo, Tier, UsageCounters, WorkspaceUsage};
pub use resources::{resolve, CpuPriority, ResourceBundle};
pub use store::{InMemoryStore, JsonFileStore, PersistScope, StateStore, StoreLock, StoredState};
pub use summary::AccountSummary;
pub use tiers::ContributionOutcome;
pub use workspace::{DailyIoReport, DEFAULT_HISTORY_DAYS};
