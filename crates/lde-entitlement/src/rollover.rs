//! Daily Rollover

use crate::model::AccountState;
use chrono::NaiveDate;
use tracing::debug;

impl AccountState {
    /// Normalize counters to `today`.
    ///
    /// Returns true if a new day was opened and state changed. A second call
    /// for the same date is a no-op.
    pub fn ensure_rollover(&mut self, today: NaiveDate) -> bool {
        let previous = self.usage_counters.last_usage_date;
        if previous == Some(today) {
            return false;
        }

        debug!(
            previous = ?previous,
            today = %today,
            messages_used = self.usage_counters.messages_used_today,
            "Daily rollover"
        );

        self.usage_counters.messages_used_today = 0;
        self.usage_counters.last_usage_date = Some(today);
        self.workspace.archive_into(previous.unwrap_or(today));

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DailyIo;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_rollover_resets_counters() {
        let mut state = AccountState::default();
        assert!(state.ensure_rollover(day(1)));
        state.usage_counters.messages_used_today = 9;

        assert!(state.ensure_rollover(day(2)));
        assert_eq!(state.usage_counters.messages_used_today, 0);
        assert_eq!(state.usage_counters.last_usage_date, Some(day(2)));
    }

    #[test]
    fn test_rollover_idempotent_same_day() {
        let mut state = AccountState::default();
        state.ensure_rollover(day(3));
        state.usage_counters.messages_used_today = 4;
        state.workspace.bytes_written_today = 12;

        let before = state.clone();
        assert!(!state.ensure_rollover(day(3)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rollover_archives_under_previous_date() {
        let mut state = AccountState::default();
        state.ensure_rollover(day(4));
        state.workspace.add_written(300);
        state.workspace.add_read(200);
        state.workspace.add_written(1);

        state.ensure_rollover(day(5));
        assert_eq!(
            state.workspace.daily_history.get(&day(4)),
            Some(&DailyIo { written: 301, read: 200 })
        );
        assert!(!state.workspace.daily_history.contains_key(&day(5)));
        assert_eq!(state.workspace.bytes_written_today, 0);
    }

    #[test]
    fn test_first_rollover_archives_under_today() {
        let mut state = AccountState::default();
        state.workspace.add_read(64);

        state.ensure_rollover(day(6));
        assert_eq!(
            state.workspace.daily_history.get(&day(6)),
            Some(&DailyIo { written: 0, read: 64 })
        );
    }

    #[test]
    fn test_rollover_merges_into_existing_entry() {
        let mut state = AccountState::default();
        state
            .workspace
            .daily_history
            .insert(day(7), DailyIo { written: 5, read: 5 });
        state.ensure_rollover(day(7));
        state.workspace.add_written(10);

        state.ensure_rollover(day(8));
        assert_eq!(
            state.workspace.daily_history[&day(7)],
            DailyIo { written: 15, read: 5 }
        );
    }
}
