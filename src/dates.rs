//! Date parsing for requisition/order columns.
//!
//! Stored dates are day-first `d/m/Y` (`5/1/2025` is 5 January 2025). That is
//! the single fixed convention: anything that does not parse day-first is
//! rejected rather than guessed at month-first.

use chrono::{Datelike, NaiveDate};

use crate::records::RecordError;

/// Calendar order month names, used to reindex monthly summaries so that
/// empty months still appear.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn parse_day_first(s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y")
        .map_err(|_| RecordError::InvalidDate(s.to_string()))
}

/// Whole days from requisition to order. Negative when the order predates the
/// requisition; callers warn but do not reject.
pub fn duration_days(requisition: NaiveDate, order: NaiveDate) -> i64 {
    (order - requisition).num_days()
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}
