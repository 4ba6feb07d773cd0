//! Account Data Model

use crate::error::{EntitlementError, EntitlementResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Entitlement tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Default tier
    #[default]
    Free,
    /// Earned through battery contribution
    Battery,
    /// Paid tier
    Pro,
}

impl Tier {
    /// All tiers, lowest first
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Battery, Tier::Pro];

    /// Lowercase tier name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Battery => "battery",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = EntitlementError;

    fn from_str(s: &str) -> EntitlementResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "battery" => Ok(Self::Battery),
            "pro" => Ok(Self::Pro),
            _ => Err(EntitlementError::UnknownTier(s.to_string())),
        }
    }
}

/// Daily message counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Quota-consuming operations accepted today
    pub messages_used_today: u32,
    /// Date the counters were last normalized to
    pub last_usage_date: Option<NaiveDate>,
}

/// Archived I/O totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIo {
    /// Bytes written
    pub written: u64,
    /// Bytes read
    pub read: u64,
}

/// Simulated storage I/O accounting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceUsage {
    /// Live bytes written for the current day
    pub bytes_written_today: u64,
    /// Live bytes read for the current day
    pub bytes_read_today: u64,
    /// Closed-out days
    #[serde(default)]
    pub daily_history: BTreeMap<NaiveDate, DailyIo>,
}

/// Battery contribution progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Last recorded share, 0..=100
    pub battery_share_percent: u8,
    /// Qualifying days toward the next upgrade
    pub contrib_days: u32,
    /// Last day a contribution-granted battery tier is valid
    pub entitlement_expires: Option<NaiveDate>,
}

/// The single account aggregate owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Reward credit ledger
    pub credits: i64,
    /// Current tier as stored (see [`AccountState::effective_tier`])
    pub tier: Tier,
    /// Daily quota counters
    pub usage_counters: UsageCounters,
    /// Workspace I/O accounting
    pub workspace: WorkspaceUsage,
    /// Contribution progress
    pub contribution: Contribution,
}
