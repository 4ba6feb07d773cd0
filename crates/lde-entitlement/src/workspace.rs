//! Workspace I/O Accounting
//!
//! Live counters accumulate the current day; rollover closes them out into
//! `daily_history`.

use crate::model::{DailyIo, WorkspaceUsage};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default window for [`WorkspaceUsage::recent_history`]
pub const DEFAULT_HISTORY_DAYS: usize = 7;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Convert bytes to MiB rounded to 2 decimals
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// One archived day in MiB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIoReport {
    /// Archived day
    pub date: NaiveDate,
    /// MiB read that day
    pub read_mb: f64,
    /// MiB written that day
    pub written_mb: f64,
}

impl WorkspaceUsage {
    /// Add to today's written bytes
    pub fn add_written(&mut self, bytes: u64) {
        self.bytes_written_today = self.bytes_written_today.saturating_add(bytes);
    }

    /// Add to today's read bytes
    pub fn add_read(&mut self, bytes: u64) {
        self.bytes_read_today = self.bytes_read_today.saturating_add(bytes);
    }

    /// Merge the live counters into `daily_history[day]` and zero them.
    ///
    /// Nothing is archived when both counters are zero.
    pub fn archive_into(&mut self, day: NaiveDate) {
        if self.bytes_written_today != 0 || self.bytes_read_today != 0 {
            let entry = self.daily_history.entry(day).or_insert_with(DailyIo::default);
            entry.written = entry.written.saturating_add(self.bytes_written_today);
            entry.read = entry.read.saturating_add(self.bytes_read_today);
        }
        self.bytes_written_today = 0;
        self.bytes_read_today = 0;
    }

    /// Today's (read_mb, written_mb)
    pub fn today_mb(&self) -> (f64, f64) {
        (bytes_to_mb(self.bytes_read_today), bytes_to_mb(self.bytes_written_today))
    }

    /// Archived days, most recent first, at most `max_days` entries
    pub fn recent_history(&self, max_days: usize) -> Vec<DailyIoReport> {
        self.daily_history
            .iter()
            .rev()
            .take(max_days)
            .map(|(date, io)| DailyIoReport {
                date: *date,
                read_mb: bytes_to_mb(io.read),
                written_mb: bytes_to_mb(io.written),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1_048_576), 1.0);
        assert_eq!(bytes_to_mb(64 * 1024), 0.06);
        assert_eq!(bytes_to_mb(200 * 5 * 1024), 0.98);
    }

    #[test]
    fn test_archive_is_additive() {
        let mut ws = WorkspaceUsage::default();
        ws.add_written(100);
        ws.add_read(7);
        ws.archive_into(day(1));
        ws.add_written(50);
        ws.archive_into(day(1));

        assert_eq!(ws.daily_history[&day(1)], DailyIo { written: 150, read: 7 });
        assert_eq!(ws.bytes_written_today, 0);
        assert_eq!(ws.bytes_read_today, 0);
    }

    #[test]
    fn test_archive_skips_idle_day() {
        let mut ws = WorkspaceUsage::default();
        ws.archive_into(day(2));
        assert!(ws.daily_history.is_empty());
    }

    #[test]
    fn test_recent_history_order_and_limit() {
        let mut ws = WorkspaceUsage::default();
        for d in 1..=10 {
            ws.add_read(d as u64 * 1_048_576);
            ws.archive_into(day(d));
        }

        let history = ws.recent_history(DEFAULT_HISTORY_DAYS);
        assert_eq!(history.len(), 7);
        assert_eq!(history[0].date, day(10));
        assert_eq!(history[0].read_mb, 10.0);
        assert_eq!(history[6].date, day(4));
        assert!(ws.recent_history(0).is_empty());
    }
}
