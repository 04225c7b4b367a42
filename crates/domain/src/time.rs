//! Time and timestamp helpers.
//!
//! Two notions of time coexist: UTC [`Timestamp`]s for bookkeeping
//! (`created_at`, `last_updated`, `cancellation_time`) and zone-less
//! [`LocalDateTime`]s for the wall-clock slot of an appointment.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// UTC timestamp used for `created_at`, `last_updated`, `cancellation_time`.
pub type Timestamp = DateTime<Utc>;

/// Wall-clock date-time without a zone, as entered at the front desk.
pub type LocalDateTime = NaiveDateTime;

/// Length of every appointment slot.
pub const APPOINTMENT_DURATION_MINUTES: u32 = 60;

/// Years that keep a four-digit, unsigned text form.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Inclusive lower bound of a day: `00:00:00`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> LocalDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Inclusive upper bound of a day: `23:59:59.999999999`.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> LocalDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

/// Whether `date` falls within [`SUPPORTED_YEARS`].
#[must_use]
pub fn is_supported(date: NaiveDate) -> bool {
    SUPPORTED_YEARS.contains(&date.year())
}

/// End of a slot starting at `start`.
///
/// `None` when the slot does not fit entirely within [`SUPPORTED_YEARS`].
#[must_use]
pub fn slot_end(start: LocalDateTime) -> Option<LocalDateTime> {
    let end = start.checked_add_signed(TimeDelta::minutes(i64::from(APPOINTMENT_DURATION_MINUTES)))?;
    (is_supported(start.date()) && is_supported(end.date())).then_some(end)
}
