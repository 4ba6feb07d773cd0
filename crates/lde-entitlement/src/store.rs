//! Persistence Adapter
//!
//! Stores a small JSON record. Under [`PersistScope::Ledger`] the record is
//! exactly `{"credits": N}`; [`PersistScope::Full`] adds the remaining
//! account fields.
//!
//! [`JsonFileStore`] guards the record with an advisory lock on a sidecar
//! `<state>.lock` file so that engines in separate processes take turns.

use crate::error::{EntitlementError, EntitlementResult, StoreError};
use crate::model::{AccountState, Contribution, Tier, UsageCounters, WorkspaceUsage};
use fs2::FileExt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default location of the state record
pub const DEFAULT_STATE_FILE: &str = "app_state.json";

/// Which part of the account the durable record carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistScope {
    /// Credit ledger only; everything else resets on restart
    #[default]
    Ledger,
    /// Whole aggregate
    Full,
}

impl fmt::Display for PersistScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ledger => write!(f, "ledger"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl FromStr for PersistScope {
    type Err = EntitlementError;

    fn from_str(s: &str) -> EntitlementResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ledger" => Ok(Self::Ledger),
            "full" => Ok(Self::Full),
            _ => Err(EntitlementError::UnknownPersistScope(s.to_string())),
        }
    }
}

/// Durable record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    /// Credit balance, present in every scope
    #[serde(default)]
    pub credits: i64,
    /// Assigned tier (full scope)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    /// Daily message counters (full scope)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_counters: Option<UsageCounters>,
    /// Live and archived I/O (full scope)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceUsage>,
    /// Contribution progress and expiry (full scope)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<Contribution>,
}

impl StoredState {
    /// Build the record for `scope` from the live state
    pub fn capture(state: &AccountState, scope: PersistScope) -> Self {
        match scope {
            PersistScope::Ledger => Self {
                credits: state.credits,
                ..Self::default()
            },
            PersistScope::Full => Self {
                credits: state.credits,
                tier: Some(state.tier),
                usage_counters: Some(state.usage_counters.clone()),
                workspace: Some(state.workspace.clone()),
                contribution: Some(state.contribution.clone()),
            },
        }
    }

    /// Overwrite the persisted fragment of `state`.
    ///
    /// Fields outside `scope` are ignored even when present in the record.
    pub fn apply_to(self, state: &mut AccountState, scope: PersistScope) {
        state.credits = self.credits;
        if scope == PersistScope::Ledger {
            return;
        }
        if let Some(tier) = self.tier {
            state.tier = tier;
        }
        if let Some(usage) = self.usage_counters {
            state.usage_counters = usage;
        }
        if let Some(workspace) = self.workspace {
            state.workspace = workspace;
        }
        if let Some(contribution) = self.contribution {
            state.contribution = contribution;
        }
    }
}

/// Exclusive hold on a store, released on drop
#[derive(Debug, Default)]
pub struct StoreLock {
    file: Option<File>,
}

impl StoreLock {
    /// Guard that excludes nobody, for stores with a single owner
    pub fn unshared() -> Self {
        Self::default()
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = FileExt::unlock(file);
        }
    }
}

/// Storage backend for the state record
pub trait StateStore: Send + Sync {
    /// Read the record
    fn load(&self) -> Result<StoredState, StoreError>;

    /// Replace the record
    fn save(&self, record: &StoredState) -> Result<(), StoreError>;

    /// Block until this caller holds the record exclusively.
    ///
    /// The engine holds the guard across load, mutate and save.
    fn lock(&self) -> Result<StoreLock, StoreError> {
        Ok(StoreLock::unshared())
    }
}

/// JSON file at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file carrying the advisory lock
    pub fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }

    fn ensure_parent(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_FILE)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<StoredState, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.display().to_string()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, record: &StoredState) -> Result<(), StoreError> {
        self.ensure_parent()?;
        // Write-then-rename: readers never observe a partial record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(record)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        FileExt::lock_exclusive(&file)?;
        Ok(StoreLock { file: Some(file) })
    }
}

/// In-memory store (for testing and embedding).
///
/// Has no cross-engine lock; share one instance with a single engine.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    record: RwLock<Option<StoredState>>,
    failing: RwLock<bool>,
    saves: RwLock<u64>,
}

impl InMemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing record
    pub fn with_record(record: StoredState) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            ..Self::default()
        }
    }

    /// Make every load and save fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }

    /// Last successfully saved record
    pub fn record(&self) -> Option<StoredState> {
        self.record.read().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u64 {
        *self.saves.read()
    }
}

impl StateStore for InMemoryStore {
    fn load(&self) -> Result<StoredState, StoreError> {
        if *self.failing.read() {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        self.record
            .read()
            .clone()
            .ok_or_else(|| StoreError::Missing("memory".into()))
    }

    fn save(&self, record: &StoredState) -> Result<(), StoreError> {
        if *self.failing.read() {
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        *self.record.write() = Some(record.clone());
        *self.saves.write() += 1;
        Ok(())
    }
}
