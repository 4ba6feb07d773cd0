//! Account dashboard view

use crate::model::Tier;
use crate::resources::ResourceBundle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time account view for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Tier in effect today
    pub tier: Tier,
    /// That tier's resources
    pub resources: ResourceBundle,
    /// Accepted quota units today
    pub messages_used_today: u32,
    /// Units left under the daily cap
    pub messages_remaining: u32,
    /// Credit balance
    pub credits: i64,
    /// MiB read today
    pub today_read_mb: f64,
    /// MiB written today
    pub today_written_mb: f64,
    /// Last recorded battery share
    pub battery_share_percent: u8,
    /// Qualifying days toward the next grant
    pub contrib_days: u32,
    /// Last day of a contribution-granted battery tier
    pub entitlement_expires: Option<NaiveDate>,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tier={} cap={} ({} left) ROM={}MB RAM={}MB CPU={} | Today: read {} MB, written {} MB | Credits={}",
            self.tier,
            self.resources.daily_cap,
            self.messages_remaining,
            self.resources.cache_mb,
            self.resources.memory_mb,
            self.resources.cpu_priority,
            self.today_read_mb,
            self.today_written_mb,
            self.credits,
        )?;
        if let Some(expires) = self.entitlement_expires {
            write!(f, " | Battery until {}", expires)?;
        }
        Ok(())
    }
}
