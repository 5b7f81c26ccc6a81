//! Domain model (dates, repetition rules, tasks, errors).
//!
//! - date: `CalendarDate`（YYYYMMDD）
//! - rule: `RecurrenceRule`（テキスト形式のパースと正規化）
//! - errors: エンジンのエラー分類
//! - task: タスクレコードと入力ドラフト

pub mod date;
pub mod errors;
pub mod rule;
pub mod task;

pub use self::date::{CalendarDate, days_in_month, is_leap_year};
pub use self::errors::{ErrorKind, IntervalError, RecurrenceError};
pub use self::rule::{MAX_INTERVAL_DAYS, MonthDays, MonthSet, RecurrenceRule, RuleKind, WeekdaySet};
pub use self::task::{TaskDraft, TaskId, TaskRecord};
