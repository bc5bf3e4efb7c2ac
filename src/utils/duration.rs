use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::DurationUnit;

/// Converts an amount of `unit` into a fixed-length [`Duration`].
///
/// Weeks are 7 days, months 30 days and years 365 days. A missing unit or
/// [`DurationUnit::Infinite`] gives [`Duration::ZERO`], which callers must read
/// as "no expiry" rather than "already expired".
pub fn get_duration(amount: u64, unit: Option<DurationUnit>) -> Duration {
    match unit.and_then(|u| u.seconds()) {
        Some(unit_secs) => Duration::from_secs(amount.saturating_mul(unit_secs)),
        None => Duration::ZERO,
    }
}

/// Point in time at which something granted at `now` for `duration` lapses.
///
/// Returns `None` when it never lapses: a zero duration, or one too large
/// to represent as a timestamp.
pub fn expires_at(now: DateTime<Utc>, duration: Duration) -> Option<DateTime<Utc>> {
    if duration.is_zero() {
        return None;
    }
    let delta = chrono::Duration::from_std(duration).ok()?;
    now.checked_add_signed(delta)
}
