//! Repetition rules: the compact text form and its parsed variant.
//!
//! A rule is always parsed into a [`RecurrenceRule`] before evaluation, so
//! every validation error surfaces here and the evaluators only ever see
//! well-formed input.
//!
//! Text forms:
//! - `y` yearly
//! - `d <N>` every N days, `1 <= N <= 400`
//! - `w <d1,d2,...>` weekdays, 1 = Monday .. 7 = Sunday
//! - `m <day,...>[ <month,...>]` days `-2,-1,1..=31`, months `1..=12`

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::errors::{IntervalError, RecurrenceError};

/// Largest accepted `d <N>` interval.
pub const MAX_INTERVAL_DAYS: u32 = 400;

/// Parsed repetition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    Yearly,
    Daily { every: u32 },
    Weekly { days: WeekdaySet },
    Monthly { days: MonthDays, months: MonthSet },
}

/// The single-letter tag selecting an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Yearly,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceRule {
    /// Parse the text form, dispatching on its first character.
    pub fn parse(rule: &str) -> Result<Self, RecurrenceError> {
        let Some(tag) = rule.chars().next() else {
            return Err(RecurrenceError::EmptyRule);
        };

        match tag {
            // Anything after the tag is ignored for yearly rules.
            'y' => Ok(Self::Yearly),
            'd' => parse_daily(rule),
            'w' => parse_weekly(rule),
            'm' => parse_monthly(rule),
            _ => Err(RecurrenceError::UnknownRuleKind {
                rule: rule.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Yearly => RuleKind::Yearly,
            Self::Daily { .. } => RuleKind::Daily,
            Self::Weekly { .. } => RuleKind::Weekly,
            Self::Monthly { .. } => RuleKind::Monthly,
        }
    }
}

fn parse_daily(rule: &str) -> Result<RecurrenceRule, RecurrenceError> {
    let invalid = |reason| RecurrenceError::InvalidInterval {
        rule: rule.to_string(),
        reason,
    };

    let tokens: Vec<&str> = rule.split(' ').collect();
    let [_, every] = tokens.as_slice() else {
        return Err(invalid(IntervalError::Malformed));
    };

    let every: i64 = every
        .parse()
        .map_err(|_| invalid(IntervalError::NotANumber(every.to_string())))?;
    match u32::try_from(every) {
        Ok(n) if (1..=MAX_INTERVAL_DAYS).contains(&n) => Ok(RecurrenceRule::Daily { every: n }),
        _ => Err(invalid(IntervalError::OutOfRange(every))),
    }
}

fn parse_weekly(rule: &str) -> Result<RecurrenceRule, RecurrenceError> {
    // The tag is ASCII, so byte offset 1 is a char boundary.
    let list = rule[1..].trim();

    let mut days = WeekdaySet::default();
    for entry in list.split(',') {
        let entry = entry.trim();
        let number = entry
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=7).contains(n))
            .ok_or_else(|| RecurrenceError::InvalidWeekday {
                rule: rule.to_string(),
                value: entry.to_string(),
            })?;
        days.insert_number(number);
    }

    Ok(RecurrenceRule::Weekly { days })
}

fn parse_monthly(rule: &str) -> Result<RecurrenceRule, RecurrenceError> {
    let body = rule[1..].trim();

    let groups: Vec<&str> = body.split(' ').collect();
    let (day_group, month_group) = match groups.as_slice() {
        [days] => (*days, None),
        [days, months] => (*days, Some(*months)),
        _ => {
            return Err(RecurrenceError::InvalidMonthDay {
                value: body.to_string(),
            });
        }
    };

    let mut days = MonthDays::default();
    for entry in day_group.split(',') {
        let accepted = entry
            .parse::<i32>()
            .is_ok_and(|value| days.insert(value));
        if !accepted {
            return Err(RecurrenceError::InvalidMonthDay {
                value: entry.to_string(),
            });
        }
    }

    let months = match month_group {
        None => MonthSet::all(),
        Some(group) => {
            let mut months = MonthSet::default();
            for entry in group.split(',') {
                let accepted = entry
                    .parse::<u32>()
                    .is_ok_and(|value| months.insert(value));
                if !accepted {
                    return Err(RecurrenceError::InvalidMonth {
                        value: entry.to_string(),
                    });
                }
            }
            months
        }
    };

    Ok(RecurrenceRule::Monthly { days, months })
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical text form: lists sorted and de-duplicated, the month list
/// omitted when it covers the whole year.
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearly => f.write_str("y"),
            Self::Daily { every } => write!(f, "d {every}"),
            Self::Weekly { days } => write!(f, "w {days}"),
            Self::Monthly { days, months } if months.is_all() => write!(f, "m {days}"),
            Self::Monthly { days, months } => write!(f, "m {days} {months}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: impl Iterator<Item = i64>) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

// ========================================
// Weekday set
// ========================================

/// Set of weekdays, indexed from Sunday (Sunday = 0 .. Saturday = 6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Insert a rule-text weekday number (1 = Monday .. 7 = Sunday).
    fn insert_number(&mut self, number: u32) {
        self.0 |= 1 << (number % 7);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending Sunday-based order.
    pub fn sunday_offsets(&self) -> impl Iterator<Item = u32> + '_ {
        (0..7).filter(|bit| self.0 & (1 << *bit) != 0)
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rule text numbers days from Monday, so Sunday (bit 0) prints last as 7.
        let numbers = (1..=7).filter(|n| self.0 & (1 << (n % 7)) != 0);
        write_list(f, numbers)
    }
}

// ========================================
// Days of month
// ========================================

/// Allowed days of a month: positive day numbers and offsets from the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonthDays {
    /// Bit `n` set for day number `n` (1..=31).
    days: u32,
    /// Bit `n` set for `-n` (1 = last day, 2 = second to last).
    from_end: u8,
}

impl MonthDays {
    /// Insert a rule-text value; returns false when it is out of range.
    pub fn insert(&mut self, value: i32) -> bool {
        match value {
            1..=31 => self.days |= 1 << value,
            -2..=-1 => self.from_end |= 1 << -value,
            _ => return false,
        }
        true
    }

    pub fn matches(&self, date: CalendarDate) -> bool {
        let by_number = self.days & (1 << date.day()) != 0;
        let remaining = date.days_until_month_end() + 1;
        let by_end = remaining <= 2 && self.from_end & (1 << remaining) != 0;
        by_number || by_end
    }

    pub fn has_offsets_from_end(&self) -> bool {
        self.from_end != 0
    }

    /// Smallest positive day number, if any.
    pub fn earliest_day(&self) -> Option<u32> {
        (self.days != 0).then(|| self.days.trailing_zeros())
    }
}

impl fmt::Display for MonthDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from_end = [-2i64, -1]
            .into_iter()
            .filter(|v| self.from_end & (1 << -*v) != 0);
        let days = (1..=31i64).filter(|v| self.days & (1 << *v) != 0);
        write_list(f, from_end.chain(days))
    }
}

// ========================================
// Month set
// ========================================

/// Set of months, 1 = January .. 12 = December.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonthSet(u16);

const ALL_MONTHS: u16 = 0b1_1111_1111_1110;

impl MonthSet {
    pub fn all() -> Self {
        Self(ALL_MONTHS)
    }

    /// Insert a month number; returns false when it is out of range.
    pub fn insert(&mut self, month: u32) -> bool {
        if !(1..=12).contains(&month) {
            return false;
        }
        self.0 |= 1 << month;
        true
    }

    pub fn contains(&self, month: u32) -> bool {
        (1..=12).contains(&month) && self.0 & (1 << month) != 0
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_MONTHS
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=12).filter(|m| self.contains(*m))
    }
}

impl fmt::Display for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter().map(i64::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use rstest::rstest;

    fn parse(rule: &str) -> RecurrenceRule {
        RecurrenceRule::parse(rule).unwrap()
    }

    #[test]
    fn empty_rule_is_rejected() {
        assert_eq!(RecurrenceRule::parse(""), Err(RecurrenceError::EmptyRule));
    }

    #[rstest]
    #[case::unknown_letter("x 5")]
    #[case::uppercase("D 3")]
    #[case::leading_space(" d 3")]
    fn unknown_kind_reports_full_rule(#[case] rule: &str) {
        let err = RecurrenceRule::parse(rule).unwrap_err();
        assert_eq!(
            err,
            RecurrenceError::UnknownRuleKind {
                rule: rule.to_string()
            }
        );
    }

    #[test]
    fn yearly_has_no_parameters() {
        assert_eq!(parse("y"), RecurrenceRule::Yearly);
        assert_eq!(parse("y").kind(), RuleKind::Yearly);
    }

    #[rstest]
    #[case("d 1", 1)]
    #[case("d 7", 7)]
    #[case("d 400", 400)]
    fn daily_accepts_interval(#[case] rule: &str, #[case] every: u32) {
        assert_eq!(parse(rule), RecurrenceRule::Daily { every });
    }

    #[rstest]
    #[case::missing("d", IntervalError::Malformed)]
    #[case::extra_token("d 3 4", IntervalError::Malformed)]
    #[case::double_space("d  3", IntervalError::Malformed)]
    #[case::not_number("d x", IntervalError::NotANumber("x".to_string()))]
    #[case::zero("d 0", IntervalError::OutOfRange(0))]
    #[case::negative("d -3", IntervalError::OutOfRange(-3))]
    #[case::too_large("d 401", IntervalError::OutOfRange(401))]
    fn daily_rejects_bad_interval(#[case] rule: &str, #[case] reason: IntervalError) {
        let err = RecurrenceRule::parse(rule).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInterval);
        assert_eq!(
            err,
            RecurrenceError::InvalidInterval {
                rule: rule.to_string(),
                reason
            }
        );
    }

    #[test]
    fn weekly_maps_seven_to_sunday() {
        let RecurrenceRule::Weekly { days } = parse("w 7,1") else {
            panic!("expected weekly rule");
        };
        assert!(days.contains(Weekday::Sun));
        assert!(days.contains(Weekday::Mon));
        assert!(!days.contains(Weekday::Sat));
        assert_eq!(days.sunday_offsets().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn weekly_tolerates_duplicates_and_spacing() {
        assert_eq!(parse("w 3, 1,3"), parse("w1,3"));
        assert_eq!(parse("w 3, 1,3").to_string(), "w 1,3");
    }

    #[rstest]
    #[case::empty("w", "")]
    #[case::zero("w 0", "0")]
    #[case::eight("w 1,8", "8")]
    #[case::word("w mon", "mon")]
    #[case::trailing_comma("w 1,", "")]
    fn weekly_rejects_bad_days(#[case] rule: &str, #[case] value: &str) {
        let err = RecurrenceRule::parse(rule).unwrap_err();
        assert_eq!(
            err,
            RecurrenceError::InvalidWeekday {
                rule: rule.to_string(),
                value: value.to_string()
            }
        );
    }

    #[test]
    fn monthly_defaults_to_every_month() {
        let RecurrenceRule::Monthly { days, months } = parse("m -1,15") else {
            panic!("expected monthly rule");
        };
        assert!(months.is_all());
        assert!(days.has_offsets_from_end());
        assert_eq!(days.earliest_day(), Some(15));
    }

    #[test]
    fn monthly_with_month_filter() {
        let RecurrenceRule::Monthly { months, .. } = parse("m 1 6,12") else {
            panic!("expected monthly rule");
        };
        assert_eq!(months.iter().collect::<Vec<_>>(), vec![6, 12]);
    }

    #[rstest]
    #[case::zero("m 0", "0")]
    #[case::minus_three("m -3", "-3")]
    #[case::thirty_two("m 1,32", "32")]
    #[case::empty("m", "")]
    #[case::spaced_list("m 1, 2", "")]
    #[case::three_groups("m 1 2 3", "1 2 3")]
    fn monthly_rejects_bad_days(#[case] rule: &str, #[case] value: &str) {
        let err = RecurrenceRule::parse(rule).unwrap_err();
        assert_eq!(
            err,
            RecurrenceError::InvalidMonthDay {
                value: value.to_string()
            }
        );
    }

    #[rstest]
    #[case::zero("m 1 0", "0")]
    #[case::thirteen("m 1 1,13", "13")]
    #[case::empty_entry("m 1 1,,2", "")]
    fn monthly_rejects_bad_months(#[case] rule: &str, #[case] value: &str) {
        let err = RecurrenceRule::parse(rule).unwrap_err();
        assert_eq!(
            err,
            RecurrenceError::InvalidMonth {
                value: value.to_string()
            }
        );
    }

    #[rstest]
    #[case("y", "y")]
    #[case("d 03", "d 3")]
    #[case("w 7,3,3", "w 3,7")]
    #[case("m 15,-1,-2,1", "m -2,-1,1,15")]
    #[case("m 1 12,6", "m 1 6,12")]
    #[case("m 1 1,2,3,4,5,6,7,8,9,10,11,12", "m 1")]
    fn display_is_canonical(#[case] rule: &str, #[case] canonical: &str) {
        let parsed = parse(rule);
        assert_eq!(parsed.to_string(), canonical);
        assert_eq!(parse(canonical), parsed);
    }
}
