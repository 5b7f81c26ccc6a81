//! Clock port - 「今日」の抽象化
//!
//! # 実装
//! - **SystemClock**: ローカル時刻の日付（本番用）
//! - **FixedClock**: 固定日付（テスト用）

use chrono::Local;

use crate::domain::{CalendarDate, RecurrenceError};

/// Clock は今日の日付を提供
///
/// # テスト容易性
/// - trait により日付を差し替え可能
/// - テストでは FixedClock を使用
///
/// 日付が `YYYYMMDD` で表せない（年が 0..=9999 の外）場合は `InvalidDate`。
pub trait Clock: Send + Sync {
    fn today(&self) -> Result<CalendarDate, RecurrenceError>;
}

/// SystemClock はローカルタイムゾーンの今日を返す
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<CalendarDate, RecurrenceError> {
        let today = Local::now().date_naive();
        CalendarDate::from_naive(today).ok_or_else(|| RecurrenceError::InvalidDate {
            input: today.to_string(),
        })
    }
}

/// FixedClock は常に同じ日付を返す
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: CalendarDate,
}

impl FixedClock {
    pub fn new(today: CalendarDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Result<CalendarDate, RecurrenceError> {
        Ok(self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let day = CalendarDate::parse("20240101").unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), Ok(day));
        assert_eq!(clock.today(), Ok(day));
    }

    #[test]
    fn system_clock_returns_current_date() {
        let today = SystemClock.today().unwrap();
        assert!(today.year() >= 2024);
    }
}
