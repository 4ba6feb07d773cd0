//! Daily Usage Cap Gate

use crate::model::{AccountState, Tier, UsageCounters};
use crate::resources::ResourceBundle;
use chrono::NaiveDate;
use tracing::debug;

/// Result of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    /// Whether a unit of quota was consumed
    pub accepted: bool,
    /// Tier the cap was computed for
    pub tier: Tier,
    /// Cap in effect
    pub daily_cap: u32,
    /// True if anything in the state changed, including rollover and expiry
    pub state_changed: bool,
}

impl UsageCounters {
    /// Consume one unit if below `cap`
    pub fn try_consume(&mut self, cap: u32) -> bool {
        if self.messages_used_today >= cap {
            return false;
        }
        self.messages_used_today += 1;
        true
    }

    /// Units left under `cap`
    pub fn remaining(&self, cap: u32) -> u32 {
        cap.saturating_sub(self.messages_used_today)
    }
}

impl AccountState {
    /// Roll over, resolve the cap of the tier in effect, then consume one
    /// message if the cap allows it.
    pub fn consume_message(&mut self, today: NaiveDate) -> GateOutcome {
        let rolled = self.ensure_rollover(today);
        let (tier, expired) = self.effective_tier(today);
        let daily_cap = ResourceBundle::for_tier(tier).daily_cap;

        let accepted = self.usage_counters.try_consume(daily_cap);
        if !accepted {
            debug!(
                tier = %tier,
                used = self.usage_counters.messages_used_today,
                cap = daily_cap,
                "Daily cap reached"
            );
        }

        GateOutcome {
            accepted,
            tier,
            daily_cap,
            state_changed: accepted || rolled || expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_free_cap() {
        let mut state = AccountState::default();
        for _ in 0..25 {
            assert!(state.consume_message(day(1)).accepted);
        }
        let out = state.consume_message(day(1));
        assert!(!out.accepted);
        assert!(!out.state_changed);
        assert_eq!(out.daily_cap, 25);
        assert_eq!(state.usage_counters.messages_used_today, 25);
    }

    #[test]
    fn test_cap_resets_next_day() {
        let mut state = AccountState::default();
        for _ in 0..30 {
            state.consume_message(day(1));
        }
        let out = state.consume_message(day(2));
        assert!(out.accepted);
        assert_eq!(state.usage_counters.messages_used_today, 1);
    }

    #[test]
    fn test_expired_battery_uses_free_cap() {
        let mut state = AccountState::default();
        state.tier = Tier::Battery;
        state.contribution.entitlement_expires = Some(day(1));
        state.ensure_rollover(day(2));
        state.usage_counters.messages_used_today = 25;

        let out = state.consume_message(day(2));
        assert!(!out.accepted);
        assert!(out.state_changed);
        assert_eq!(out.tier, Tier::Free);
        assert_eq!(state.tier, Tier::Free);
    }

    #[test]
    fn test_downgrade_keeps_used_count() {
        let mut state = AccountState::default();
        state.assign_tier(Tier::Pro);
        for _ in 0..40 {
            assert!(state.consume_message(day(3)).accepted);
        }
        state.assign_tier(Tier::Free);
        assert!(!state.consume_message(day(3)).accepted);
        assert_eq!(state.usage_counters.remaining(25), 0);
    }
}
