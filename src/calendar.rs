//! Ordinal-day calendar helpers.
//!
//! The decoder commits day-of-year as a 0-based ordinal. Month lengths come
//! from a fixed non-leap table because the time code carries no leap-year
//! information, so after February of a leap year these conversions run one
//! day ahead of the civil calendar.

/// Month lengths for a non-leap year.
pub const DAYS_IN_MONTH: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of days in the months before `month` (1-based).
#[must_use]
pub fn days_before_month(month: u16) -> u16 {
    DAYS_IN_MONTH
        .iter()
        .take(usize::from(month.saturating_sub(1)))
        .sum()
}

/// Month (1-based) containing the 0-based ordinal day `days`.
///
/// Ordinals past the end of the table saturate into December.
#[must_use]
pub fn month_of(days: u16) -> u16 {
    let mut sum = 0;
    for (idx, len) in DAYS_IN_MONTH.iter().enumerate() {
        sum += len;
        if days < sum {
            return idx as u16 + 1;
        }
    }
    12
}

/// Day within [`month_of`] for ordinal `days`, 0-based like its input.
#[must_use]
pub fn day_of_month(days: u16) -> u16 {
    days - days_before_month(month_of(days))
}
