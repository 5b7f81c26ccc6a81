//! `m <days>[ <months>]`: selected days of selected months.

use tracing::debug;

use crate::domain::date::MAX_YEAR;
use crate::domain::{
    CalendarDate, MonthDays, MonthSet, RecurrenceError, RecurrenceRule, days_in_month,
};

/// A leap year, so February reports its longest length.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Walks day by day from `anchor` to the first matching date after `now`.
///
/// The walk gives up once it passes the end of the year after
/// `max(now.year, anchor.year)`, and never runs past 9999-12-31. This is a
/// search window, not a proof that no later date matches (e.g. `m 29 2`
/// only matches in leap years).
pub(super) fn next_after(
    anchor: CalendarDate,
    now: CalendarDate,
    days: MonthDays,
    months: MonthSet,
) -> Result<CalendarDate, RecurrenceError> {
    let last_year = (now.year().max(anchor.year()) + 1).min(MAX_YEAR);
    let exhausted = || RecurrenceError::NoOccurrenceFound {
        rule: RecurrenceRule::Monthly { days, months }.to_string(),
        last_year,
    };

    if !can_ever_match(days, months) {
        debug!(%days, %months, "monthly rule can never match");
        return Err(exhausted());
    }

    let mut date = anchor;
    loop {
        if date > now && months.contains(date.month()) && days.matches(date) {
            return Ok(date);
        }
        // 9999-12-31 has no successor; that also ends the window.
        match date.succ() {
            Some(next) if date.year() <= last_year => date = next,
            _ => {
                debug!(%anchor, %now, last_year, "monthly search window exhausted");
                return Err(exhausted());
            }
        }
    }
}

/// False when no allowed month is long enough for any requested day.
fn can_ever_match(days: MonthDays, months: MonthSet) -> bool {
    months.iter().any(|month| {
        days.has_offsets_from_end()
            || days
                .earliest_day()
                .is_some_and(|day| day <= days_in_month(LEAP_REFERENCE_YEAR, month))
    })
}
