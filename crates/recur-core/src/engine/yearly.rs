//! `y`: same month and day every year.

use crate::domain::{CalendarDate, RecurrenceError};

/// `anchor + k years` for the smallest `k >= 1` that lands after `now`.
///
/// Each candidate is computed from the anchor, so a Feb 29 anchor clamps to
/// Feb 28 in common years and returns to Feb 29 in leap years.
pub(super) fn next_after(
    anchor: CalendarDate,
    now: CalendarDate,
) -> Result<CalendarDate, RecurrenceError> {
    // Candidates before now's year can never be after now.
    let mut years = u32::try_from(now.year() - anchor.year())
        .unwrap_or(0)
        .max(1);

    loop {
        let candidate = anchor
            .add_years(years)
            .ok_or(RecurrenceError::DateOutOfRange { from: anchor })?;
        if candidate > now {
            return Ok(candidate);
        }
        years += 1;
    }
}
