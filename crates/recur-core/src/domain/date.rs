//! Calendar dates without a time-of-day or timezone component.
//!
//! The wire format is a fixed 8-digit `YYYYMMDD` string. Every value of
//! [`CalendarDate`] can be written back in that format, which is why the
//! year is restricted to `0..=9999`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::RecurrenceError;

/// Last year the `YYYYMMDD` format can hold.
pub(crate) const MAX_YEAR: i32 = 9999;

/// A proleptic Gregorian date, ordered by calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a strict `YYYYMMDD` string (exactly 8 ASCII digits).
    pub fn parse(input: &str) -> Result<Self, RecurrenceError> {
        let bytes = input.as_bytes();
        if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(RecurrenceError::invalid_date(input));
        }

        // All eight bytes are ASCII digits, so slicing and parsing cannot fail.
        let field = |range: std::ops::Range<usize>| -> u32 {
            input[range]
                .bytes()
                .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
        };
        let year = field(0..4) as i32;
        Self::from_ymd(year, field(4..6), field(6..8))
            .ok_or_else(|| RecurrenceError::invalid_date(input))
    }

    /// Parse the `DD.MM.YYYY` form used in search boxes.
    ///
    /// Returns `None` for anything else, so callers can fall back to
    /// treating the input as plain text.
    pub fn parse_day_month_year(input: &str) -> Option<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
            return None;
        }
        NaiveDate::parse_from_str(input, "%d.%m.%Y")
            .ok()
            .and_then(Self::from_naive)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::from_naive)
    }

    /// Wrap a chrono date, rejecting years the `YYYYMMDD` format cannot hold.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (0..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The following calendar day.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::from_naive)
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).and_then(Self::from_naive)
    }

    /// Add whole years.
    ///
    /// Feb 29 is clamped to Feb 28 when the target year is not a leap year.
    pub fn add_years(&self, years: u32) -> Option<Self> {
        let months = years.checked_mul(12)?;
        self.0
            .checked_add_months(Months::new(months))
            .and_then(Self::from_naive)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// 0 on the last day of the month, 1 on the day before, and so on.
    pub fn days_until_month_end(&self) -> u32 {
        self.days_in_month() - self.day()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
