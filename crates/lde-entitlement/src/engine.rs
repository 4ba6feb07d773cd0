//! Entitlement Engine
//!
//! Owns the [`AccountState`] and serializes every operation behind one lock.
//! Each operation holds the lock while it reloads writes made by other
//! processes, rolls over, mutates and writes through to the store. Engines
//! sharing a [`JsonFileStore`] across processes additionally take the store's
//! file lock for the same span, so all of them observe one total order.

use crate::clock::{Clock, ManualClock, SystemClock};
use crate::config::EngineConfig;
use crate::error::StoreError;
use crate::model::{AccountState, Tier};
use crate::resources::ResourceBundle;
use crate::store::{InMemoryStore, JsonFileStore, PersistScope, StateStore, StoreLock, StoredState};
use crate::summary::AccountSummary;
use crate::tiers::ContributionOutcome;
use crate::workspace::DailyIoReport;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resource entitlement and usage accounting engine
pub struct EntitlementEngine {
    state: Mutex<AccountState>,
    /// Last write-through failed; memory is ahead of the store
    unsaved: AtomicBool,
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    scope: PersistScope,
}

impl EntitlementEngine {
    /// Create engine with default state. Does not touch the store.
    pub fn new(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>, scope: PersistScope) -> Self {
        Self {
            state: Mutex::new(AccountState::default()),
            unsaved: AtomicBool::new(false),
            store,
            clock,
            scope,
        }
    }

    /// Open the JSON-backed engine described by `config` and load its state
    pub fn open(config: &EngineConfig) -> Self {
        info!(
            path = %config.state_path.display(),
            scope = %config.persist_scope,
            "Opening entitlement engine"
        );
        let engine = Self::new(
            Arc::new(JsonFileStore::new(config.state_path.clone())),
            Arc::new(SystemClock),
            config.persist_scope,
        );
        engine.load_state();
        engine
    }

    /// Engine over an empty in-memory store and a manual clock
    pub fn simulated(start: NaiveDate, scope: PersistScope) -> (Self, Arc<InMemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(ManualClock::new(start));
        let engine = Self::new(store.clone(), clock.clone(), scope);
        (engine, store, clock)
    }

    /// Active persist scope
    pub fn persist_scope(&self) -> PersistScope {
        self.scope
    }

    /// Reload the persisted fragment from the store.
    ///
    /// On any failure the fragment is reset to its zero value. Returns true
    /// if a record was read.
    pub fn load_state(&self) -> bool {
        let mut state = self.state.lock();
        let _guard = self.lock_store();
        let record = match self.store.load() {
            Ok(record) => record,
            Err(StoreError::Missing(location)) => {
                debug!(%location, "No stored state, using defaults");
                Self::zero_fragment(&mut state, self.scope);
                return false;
            }
            Err(err) => {
                warn!(error = %err, "Failed to load state, using defaults");
                Self::zero_fragment(&mut state, self.scope);
                return false;
            }
        };
        debug!(credits = record.credits, "Loaded stored state");
        record.apply_to(&mut state, self.scope);
        self.unsaved.store(false, Ordering::Relaxed);
        true
    }

    /// Write the persisted fragment to the store
    pub fn save_state(&self) {
        let state = self.state.lock();
        let _guard = self.lock_store();
        self.persist(&state);
    }

    fn zero_fragment(state: &mut AccountState, scope: PersistScope) {
        StoredState::capture(&AccountState::default(), scope).apply_to(state, scope);
    }

    /// Run `op` on the rolled-over state of `today`.
    ///
    /// `op` returns its result and whether it changed state. The record is
    /// written back if either the rollover or `op` changed anything.
    fn transact<R>(&self, op: impl FnOnce(&mut AccountState, NaiveDate) -> (R, bool)) -> R {
        let mut state = self.state.lock();
        let _guard = self.lock_store();
        self.sync(&mut state);

        let today = self.clock.today();
        let rolled = state.ensure_rollover(today);
        let (result, changed) = op(&mut state, today);
        if rolled || changed {
            self.persist(&state);
        }
        result
    }

    fn lock_store(&self) -> Option<StoreLock> {
        match self.store.lock() {
            Ok(guard) => Some(guard),
            Err(err) => {
                warn!(error = %err, "Failed to lock state store, continuing unlocked");
                None
            }
        }
    }

    /// Pick up records written by other engines since the last operation.
    /// Skipped while a failed write left memory ahead of the store.
    fn sync(&self, state: &mut AccountState) {
        if self.unsaved.load(Ordering::Relaxed) {
            return;
        }
        match self.store.load() {
            Ok(record) => record.apply_to(state, self.scope),
            Err(StoreError::Missing(_)) => {}
            Err(err) => debug!(error = %err, "Stored state unreadable, keeping in-memory state"),
        }
    }

    /// Write-through. Failures are logged and dropped; memory stays
    /// authoritative.
    fn persist(&self, state: &AccountState) {
        let record = StoredState::capture(state, self.scope);
        match self.store.save(&record) {
            Ok(()) => self.unsaved.store(false, Ordering::Relaxed),
            Err(err) => {
                warn!(error = %err, "Failed to persist state");
                self.unsaved.store(true, Ordering::Relaxed);
            }
        }
    }

    /// Set tier by name. Returns false, without changes, for unknown names.
    pub fn set_tier(&self, requested: &str) -> bool {
        match requested.parse::<Tier>() {
            Ok(tier) => {
                self.set_tier_to(tier);
                true
            }
            Err(err) => {
                debug!(error = %err, "Rejected tier request");
                false
            }
        }
    }

    /// Set tier
    pub fn set_tier_to(&self, tier: Tier) {
        self.transact(|state, _| {
            state.assign_tier(tier);
            ((), true)
        })
    }

    /// Current tier, downgrading an expired battery entitlement first
    pub fn tier(&self) -> Tier {
        self.transact(|state, today| state.effective_tier(today))
    }

    /// Resources of the tier in effect
    pub fn effective_resources(&self) -> ResourceBundle {
        ResourceBundle::for_tier(self.tier())
    }

    /// Consume one unit of today's quota. False means the cap is reached.
    pub fn try_consume_message(&self) -> bool {
        self.transact(|state, today| {
            let outcome = state.consume_message(today);
            (outcome.accepted, outcome.state_changed)
        })
    }

    /// Account simulated bytes written today
    pub fn record_write(&self, bytes: u64) {
        self.transact(|state, _| {
            state.workspace.add_written(bytes);
            ((), true)
        })
    }

    /// Account simulated bytes read today
    pub fn record_read(&self, bytes: u64) {
        self.transact(|state, _| {
            state.workspace.add_read(bytes);
            ((), true)
        })
    }

    /// Today's (read_mb, written_mb)
    pub fn today_mb(&self) -> (f64, f64) {
        self.transact(|state, _| (state.workspace.today_mb(), false))
    }

    /// Archived days, most recent first
    pub fn recent_history(&self, max_days: usize) -> Vec<DailyIoReport> {
        self.transact(|state, _| (state.workspace.recent_history(max_days), false))
    }

    /// Record today's battery share
    pub fn record_contribution(&self, percent: u32) -> ContributionOutcome {
        self.transact(|state, today| (state.apply_contribution(percent, today), true))
    }

    /// Add reward credits, returning the new balance
    pub fn add_credits(&self, amount: i64) -> i64 {
        self.transact(|state, _| (state.add_credits(amount), true))
    }

    /// Credit balance
    pub fn credits(&self) -> i64 {
        self.transact(|state, _| (state.credits, false))
    }

    /// Dashboard view of today
    pub fn summary(&self) -> AccountSummary {
        self.transact(|state, today| {
            let (tier, expired) = state.effective_tier(today);
            let resources = ResourceBundle::for_tier(tier);
            let (today_read_mb, today_written_mb) = state.workspace.today_mb();

            let summary = AccountSummary {
                tier,
                resources,
                messages_used_today: state.usage_counters.messages_used_today,
                messages_remaining: state.usage_counters.remaining(resources.daily_cap),
                credits: state.credits,
                today_read_mb,
                today_written_mb,
                battery_share_percent: state.contribution.battery_share_percent,
                contrib_days: state.contribution.contrib_days,
                entitlement_expires: state.contribution.entitlement_expires,
            };
            (summary, expired)
        })
    }

    /// Copy of the aggregate as of today
    pub fn snapshot(&self) -> AccountState {
        self.transact(|state, _| (state.clone(), false))
    }
}

impl std::fmt::Debug for EntitlementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementEngine")
            .field("scope", &self.scope)
            .field("state", &*self.state.lock())
            .finish()
    }
}
