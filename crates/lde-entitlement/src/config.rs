//! Engine Configuration

use crate::store::{PersistScope, DEFAULT_STATE_FILE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Location of the JSON state record
    pub state_path: PathBuf,
    /// Which fields survive a restart
    pub persist_scope: PersistScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
            persist_scope: PersistScope::Ledger,
        }
    }
}

impl EngineConfig {
    /// Use `path` for the state record
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Persist `scope` of the account
    pub fn with_persist_scope(mut self, scope: PersistScope) -> Self {
        self.persist_scope = scope;
        self
    }
}
