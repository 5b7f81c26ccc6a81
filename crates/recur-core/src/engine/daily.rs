//! `d <N>`: every N days counted from the anchor.

use crate::domain::{CalendarDate, RecurrenceError};

/// `anchor + k*every` for the smallest `k >= 1` that lands after `now`.
pub(super) fn next_after(
    anchor: CalendarDate,
    now: CalendarDate,
    every: u32,
) -> Result<CalendarDate, RecurrenceError> {
    let every = u64::from(every);
    let steps = match u64::try_from(now.days_since(anchor)) {
        Ok(elapsed) => elapsed / every + 1,
        // Anchor is after now: the first step already is.
        Err(_) => 1,
    };

    steps
        .checked_mul(every)
        .and_then(|days| anchor.add_days(days))
        .ok_or(RecurrenceError::DateOutOfRange { from: anchor })
}
