//! Tier Resource Bundles

use crate::model::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CPU scheduling priority granted to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuPriority {
    /// Default scheduling
    Standard,
    /// Ahead of standard work
    High,
    /// Highest scheduling class
    Maximum,
}

impl fmt::Display for CpuPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::High => write!(f, "high"),
            Self::Maximum => write!(f, "maximum"),
        }
    }
}

/// Resources and daily quota for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    /// Workspace cache in MB
    pub cache_mb: u32,
    /// Processing memory in MB
    pub memory_mb: u32,
    /// CPU priority
    pub cpu_priority: CpuPriority,
    /// Quota-consuming operations per day
    pub daily_cap: u32,
}

impl ResourceBundle {
    /// Get bundle for tier
    pub const fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Free => Self {
                cache_mb: 500,
                memory_mb: 256,
                cpu_priority: CpuPriority::Standard,
                daily_cap: 25,
            },
            Tier::Battery => Self {
                cache_mb: 2000,
                memory_mb: 1024,
                cpu_priority: CpuPriority::High,
                daily_cap: 100,
            },
            Tier::Pro => Self {
                cache_mb: 5000,
                memory_mb: 2048,
                cpu_priority: CpuPriority::Maximum,
                daily_cap: 200,
            },
        }
    }
}

/// Resolve the bundle for a tier
pub fn resolve(tier: Tier) -> ResourceBundle {
    ResourceBundle::for_tier(tier)
}
