//! `w <days>`: selected days of the week.

use crate::domain::{CalendarDate, RecurrenceError, WeekdaySet};

/// Earliest allowed weekday that is on/after `anchor` and after `now`.
///
/// Finds the nearest allowed weekday from the anchor; while that date is not
/// after `now`, searches again from the following day.
pub(super) fn next_after(
    anchor: CalendarDate,
    now: CalendarDate,
    days: WeekdaySet,
) -> Result<CalendarDate, RecurrenceError> {
    if days.is_empty() {
        return Err(RecurrenceError::InvalidWeekday {
            rule: "w".to_string(),
            value: String::new(),
        });
    }
    let out_of_range = || RecurrenceError::DateOutOfRange { from: anchor };

    let mut next = nearest_allowed(anchor, days).ok_or_else(out_of_range)?;
    while next <= now {
        next = next
            .succ()
            .and_then(|from| nearest_allowed(from, days))
            .ok_or_else(out_of_range)?;
    }
    Ok(next)
}

/// First allowed weekday at or after `from`, wrapping into the next week.
fn nearest_allowed(from: CalendarDate, days: WeekdaySet) -> Option<CalendarDate> {
    let current = from.weekday().num_days_from_sunday();
    let offset = match days.sunday_offsets().find(|day| *day >= current) {
        Some(day) => day - current,
        None => 7 - current + days.sunday_offsets().next()?,
    };
    from.add_days(u64::from(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecurrenceRule;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn days(rule: &str) -> WeekdaySet {
        match RecurrenceRule::parse(rule).unwrap() {
            RecurrenceRule::Weekly { days } => days,
            other => panic!("expected weekly rule, got {other:?}"),
        }
    }

    #[rstest]
    // 2024-01-01 is a Monday.
    #[case::monday_or_wednesday("w 1,3", "20240101", "20240103", "20240108")]
    #[case::same_week("w 1,3", "20240101", "20240101", "20240103")]
    #[case::sunday_is_seven("w 7", "20240101", "20240106", "20240107")]
    #[case::anchor_itself("w 1", "20240108", "20240101", "20240108")]
    #[case::wraps_week("w 2", "20240105", "20240105", "20240109")]
    #[case::wraps_year("w 5", "20241228", "20241231", "20250103")]
    #[case::every_day("w 1,2,3,4,5,6,7", "20240101", "20240131", "20240201")]
    #[case::old_anchor("w 6", "19990101", "20240101", "20240106")]
    fn finds_next_allowed_weekday(
        #[case] rule: &str,
        #[case] anchor: &str,
        #[case] now: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            next_after(date(anchor), date(now), days(rule)).unwrap(),
            date(expected)
        );
    }

    #[test]
    fn nearest_allowed_includes_start_day() {
        // Wednesday
        let wed = date("20240103");
        assert_eq!(nearest_allowed(wed, days("w 3")), Some(wed));
        assert_eq!(nearest_allowed(wed, days("w 1")), Some(date("20240108")));
        assert_eq!(nearest_allowed(wed, days("w 7")), Some(date("20240107")));
    }

    #[test]
    fn agrees_with_day_by_day_search() {
        let anchors = ["20231225", "20240101", "20240110"];
        for rule in ["w 1", "w 7", "w 2,4", "w 5,6,7", "w 3,3,1"] {
            let allowed = days(rule);
            for anchor in anchors.map(date) {
                let mut now = date("20231215");
                while now < date("20240215") {
                    let mut expected = anchor;
                    while expected <= now || !allowed.contains(expected.weekday()) {
                        expected = expected.succ().unwrap();
                    }
                    assert_eq!(
                        next_after(anchor, now, allowed).unwrap(),
                        expected,
                        "rule={rule} anchor={anchor} now={now}"
                    );
                    now = now.succ().unwrap();
                }
            }
        }
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = next_after(date("20240101"), date("20240101"), WeekdaySet::default()).unwrap_err();
        assert!(matches!(err, RecurrenceError::InvalidWeekday { .. }));
    }
}
