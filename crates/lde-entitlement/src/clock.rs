//! Calendar clock
//!
//! All day boundaries are UTC calendar dates.

use chrono::{Days, NaiveDate, Utc};
use parking_lot::RwLock;

/// Source of "today"
pub trait Clock: Send + Sync {
    /// Current UTC calendar date
    fn today(&self) -> NaiveDate;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Settable clock for simulated days
#[derive(Debug)]
pub struct ManualClock {
    today: RwLock<NaiveDate>,
}

impl ManualClock {
    /// Start the clock at `date`
    pub fn new(date: NaiveDate) -> Self {
        Self { today: RwLock::new(date) }
    }

    /// Jump to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.today.write() = date;
    }

    /// Move forward by `days`
    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.write();
        if let Some(next) = today.checked_add_days(Days::new(days)) {
            *today = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.read()
    }
}
