use crate::domain::model::{ExpiryDate, ValidationPolicy};
use chrono::{DateTime, Datelike, Utc};

/// Whether `expiry` is still usable at `now`.
///
/// By default month and year are gated separately: the month must be in
/// 1..=12 and not before the current month number, and the year must not be
/// before the current year. This means month 3 of next year is rejected
/// while it is April. With `policy.joint_expiry_check` the pair is compared
/// as a single date instead.
pub fn expiry_is_current(expiry: ExpiryDate, now: DateTime<Utc>, policy: &ValidationPolicy) -> bool {
    if !expiry.has_valid_month() {
        return false;
    }

    let current_month = now.month() as i32;
    let current_year = now.year();

    if policy.joint_expiry_check {
        return (expiry.year, expiry.month) >= (current_year, current_month);
    }

    expiry.month >= current_month && expiry.year >= current_year
}
