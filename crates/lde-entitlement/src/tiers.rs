//! Tier State Machine
//!
//! | from    | event                         | to      |
//! |---------|-------------------------------|---------|
//! | any     | `set_tier(t)`                 | `t`     |
//! | any     | 7th contribution day          | battery |
//! | battery | read with `today > expires`   | free    |
//!
//! Expiry is evaluated lazily whenever the tier is read.

use crate::model::{AccountState, Tier};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Minimum share that counts as a contribution day
pub const CONTRIBUTION_MIN_PERCENT: u32 = 15;

/// Contribution days needed for a battery grant
pub const CONTRIBUTION_DAYS_FOR_UPGRADE: u32 = 7;

/// Length of a contribution-granted battery entitlement
pub const BATTERY_ENTITLEMENT_DAYS: u64 = 7;

/// Result of recording a contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionOutcome {
    /// Tier after the contribution
    pub tier: Tier,
    /// Recorded share, clamped to 100
    pub battery_share_percent: u8,
    /// Battery expiry, if one is set
    pub entitlement_expires: Option<NaiveDate>,
}

impl AccountState {
    /// Assign a tier. Any tier other than battery drops the expiry date.
    pub fn assign_tier(&mut self, tier: Tier) {
        if self.tier != tier {
            info!(from = %self.tier, to = %tier, "Tier changed");
        }
        self.tier = tier;
        if tier != Tier::Battery {
            self.contribution.entitlement_expires = None;
        }
    }

    /// Expiry-aware tier read.
    ///
    /// Returns the tier in effect on `today` and whether an expired battery
    /// entitlement was downgraded by this call.
    pub fn effective_tier(&mut self, today: NaiveDate) -> (Tier, bool) {
        match (self.tier, self.contribution.entitlement_expires) {
            (Tier::Battery, Some(expires)) if today > expires => {
                info!(expired = %expires, "Battery entitlement expired, reverting to free");
                self.tier = Tier::Free;
                self.contribution.entitlement_expires = None;
                (Tier::Free, true)
            }
            (tier, _) => (tier, false),
        }
    }

    /// Record today's battery share and grant battery once enough
    /// contribution days accumulate. Callers run rollover first.
    pub fn apply_contribution(&mut self, percent: u32, today: NaiveDate) -> ContributionOutcome {
        let c = &mut self.contribution;
        c.battery_share_percent = percent.min(100) as u8;
        if percent >= CONTRIBUTION_MIN_PERCENT {
            c.contrib_days = c.contrib_days.saturating_add(1);
        }

        if c.contrib_days >= CONTRIBUTION_DAYS_FOR_UPGRADE {
            let expires = today.checked_add_days(Days::new(BATTERY_ENTITLEMENT_DAYS));
            info!(
                contrib_days = c.contrib_days,
                expires = ?expires,
                "Contribution threshold reached, granting battery tier"
            );
            c.entitlement_expires = expires;
            // No carry-over of excess days
            c.contrib_days = 0;
            self.tier = Tier::Battery;
        }

        ContributionOutcome {
            tier: self.tier,
            battery_share_percent: self.contribution.battery_share_percent,
            entitlement_expires: self.contribution.entitlement_expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assign_clears_expiry_for_non_battery() {
        let mut state = AccountState::default();
        state.tier = Tier::Battery;
        state.contribution.entitlement_expires = Some(date(2024, 1, 10));

        state.assign_tier(Tier::Battery);
        assert_eq!(state.contribution.entitlement_expires, Some(date(2024, 1, 10)));

        state.assign_tier(Tier::Pro);
        assert_eq!(state.tier, Tier::Pro);
        assert_eq!(state.contribution.entitlement_expires, None);
    }

    #[test]
    fn test_expiry_downgrades_after_expiry_date() {
        let mut state = AccountState::default();
        state.tier = Tier::Battery;
        state.contribution.entitlement_expires = Some(date(2024, 1, 10));

        // Still valid on the expiry date itself
        assert_eq!(state.effective_tier(date(2024, 1, 10)), (Tier::Battery, false));

        assert_eq!(state.effective_tier(date(2024, 1, 11)), (Tier::Free, true));
        assert_eq!(state.tier, Tier::Free);
        assert_eq!(state.contribution.entitlement_expires, None);
        assert_eq!(state.effective_tier(date(2024, 1, 12)), (Tier::Free, false));
    }

    #[test]
    fn test_battery_without_expiry_never_expires() {
        let mut state = AccountState::default();
        state.assign_tier(Tier::Battery);
        assert_eq!(state.effective_tier(date(2099, 1, 1)), (Tier::Battery, false));
    }

    #[test]
    fn test_low_share_does_not_count() {
        let mut state = AccountState::default();
        let out = state.apply_contribution(14, date(2024, 2, 1));
        assert_eq!(out.battery_share_percent, 14);
        assert_eq!(state.contribution.contrib_days, 0);
        assert_eq!(out.tier, Tier::Free);
    }

    #[test]
    fn test_seventh_day_grants_battery() {
        let mut state = AccountState::default();
        for d in 1..=6 {
            let out = state.apply_contribution(18, date(2024, 2, d));
            assert_eq!(out.tier, Tier::Free);
        }
        assert_eq!(state.contribution.contrib_days, 6);

        let out = state.apply_contribution(18, date(2024, 2, 7));
        assert_eq!(out.tier, Tier::Battery);
        assert_eq!(out.entitlement_expires, Some(date(2024, 2, 14)));
        assert_eq!(state.contribution.contrib_days, 0);
    }

    #[test]
    fn test_threshold_checked_even_without_qualifying_share() {
        let mut state = AccountState::default();
        state.contribution.contrib_days = 9;

        let out = state.apply_contribution(0, date(2024, 3, 1));
        assert_eq!(out.tier, Tier::Battery);
        assert_eq!(out.battery_share_percent, 0);
        assert_eq!(state.contribution.contrib_days, 0);
    }

    #[test]
    fn test_grant_overrides_pro() {
        let mut state = AccountState::default();
        state.assign_tier(Tier::Pro);
        state.contribution.contrib_days = 6;

        let out = state.apply_contribution(100, date(2024, 3, 2));
        assert_eq!(out.tier, Tier::Battery);
        assert_eq!(out.entitlement_expires, Some(date(2024, 3, 9)));
    }

    #[test]
    fn test_share_is_clamped() {
        let mut state = AccountState::default();
        let out = state.apply_contribution(250, date(2024, 3, 3));
        assert_eq!(out.battery_share_percent, 100);
        assert_eq!(state.contribution.contrib_days, 1);
    }
}
