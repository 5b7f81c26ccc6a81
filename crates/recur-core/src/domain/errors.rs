//! Errors - 繰り返しルール評価のエラー分類
//!
//! すべてのエラーは 1 回の呼び出しに対して終端的（内部リトライなし）。
//! 呼び出し側（request layer など）はどれも「拒否されたリクエスト」として扱う。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::CalendarDate;

/// Why a `d <N>` rule was rejected.
///
/// Callers render "not a number" and "out of range" differently, so the
/// detail is kept separate from the top-level kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("expected `d <days>`")]
    Malformed,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is outside the allowed interval 1..=400")]
    OutOfRange(i64),
}

/// RecurrenceError はエンジンが返す閉じたエラー集合
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("invalid date '{input}': expected YYYYMMDD")]
    InvalidDate { input: String },

    #[error("empty repetition rule")]
    EmptyRule,

    #[error("unknown repetition rule: {rule}")]
    UnknownRuleKind { rule: String },

    #[error("invalid interval in '{rule}': {reason}")]
    InvalidInterval { rule: String, reason: IntervalError },

    #[error("invalid weekday list in '{rule}': {value}")]
    InvalidWeekday { rule: String, value: String },

    #[error("invalid day of month: {value}")]
    InvalidMonthDay { value: String },

    #[error("invalid month: {value}")]
    InvalidMonth { value: String },

    #[error("no occurrence of '{rule}' found through {last_year}")]
    NoOccurrenceFound { rule: String, last_year: i32 },

    #[error("date arithmetic from {from} leaves the YYYYMMDD range")]
    DateOutOfRange { from: CalendarDate },
}

/// ErrorKind はエラーのフラットな分類（レスポンスや CLI 出力用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDate,
    EmptyRule,
    UnknownRuleKind,
    InvalidInterval,
    InvalidWeekday,
    InvalidMonthDay,
    InvalidMonth,
    NoOccurrenceFound,
    DateOutOfRange,
}

impl RecurrenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate { .. } => ErrorKind::InvalidDate,
            Self::EmptyRule => ErrorKind::EmptyRule,
            Self::UnknownRuleKind { .. } => ErrorKind::UnknownRuleKind,
            Self::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            Self::InvalidWeekday { .. } => ErrorKind::InvalidWeekday,
            Self::InvalidMonthDay { .. } => ErrorKind::InvalidMonthDay,
            Self::InvalidMonth { .. } => ErrorKind::InvalidMonth,
            Self::NoOccurrenceFound { .. } => ErrorKind::NoOccurrenceFound,
            Self::DateOutOfRange { .. } => ErrorKind::DateOutOfRange,
        }
    }

    pub(crate) fn invalid_date(input: &str) -> Self {
        Self::InvalidDate {
            input: input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_as_snake_case() {
        let s = serde_json::to_string(&ErrorKind::UnknownRuleKind).unwrap();
        assert_eq!(s, "\"unknown_rule_kind\"");

        let s = serde_json::to_string(&ErrorKind::NoOccurrenceFound).unwrap();
        assert_eq!(s, "\"no_occurrence_found\"");
    }

    #[test]
    fn interval_detail_is_part_of_message() {
        let err = RecurrenceError::InvalidInterval {
            rule: "d x".to_string(),
            reason: IntervalError::NotANumber("x".to_string()),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidInterval);
        assert_eq!(err.to_string(), "invalid interval in 'd x': 'x' is not a number");

        let err = RecurrenceError::InvalidInterval {
            rule: "d 401".to_string(),
            reason: IntervalError::OutOfRange(401),
        };
        assert!(err.to_string().contains("401 is outside"));
    }

    #[test]
    fn unknown_kind_names_the_rule() {
        let err = RecurrenceError::UnknownRuleKind {
            rule: "x 5".to_string(),
        };
        assert_eq!(err.to_string(), "unknown repetition rule: x 5");
    }
}
