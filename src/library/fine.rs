use crate::library::LibraryError;
use chrono::{NaiveDateTime, TimeDelta};

/// Longest loan period accepted from configuration, about a hundred years.
pub const MAX_LOAN_PERIOD_DAYS: i64 = 36_500;

/// Lending rules applied by the [`Library`](crate::library::Library).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    /// Days a book may be kept before it is overdue.
    pub loan_period_days: i64,
    /// Fine charged per whole day past the due date.
    pub fine_per_day: u64,
    /// Books a single student may hold at once.
    pub max_loans: usize,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        LoanPolicy {
            loan_period_days: 14,
            fine_per_day: 1,
            max_loans: 3,
        }
    }
}

impl LoanPolicy {
    /// When a book borrowed at `borrowed` becomes overdue.
    ///
    /// # Errors
    /// Returns [`LibraryError::LoanPeriod`] if the period does not fit in the
    /// calendar range from `borrowed`.
    pub fn due_date(&self, borrowed: NaiveDateTime) -> Result<NaiveDateTime, LibraryError> {
        TimeDelta::try_days(self.loan_period_days)
            .and_then(|period| borrowed.checked_add_signed(period))
            .ok_or(LibraryError::LoanPeriod(self.loan_period_days))
    }

    /// Whole days between `due` and `returned`, zero when not past due.
    ///
    /// Partial days are truncated, so a return a few hours late counts as
    /// zero overdue days.
    pub fn overdue_days(&self, due: NaiveDateTime, returned: NaiveDateTime) -> i64 {
        if returned > due {
            (returned - due).num_days()
        } else {
            0
        }
    }

    pub fn fine_for(&self, overdue_days: i64) -> u64 {
        u64::try_from(overdue_days)
            .unwrap_or(0)
            .saturating_mul(self.fine_per_day)
    }
}
