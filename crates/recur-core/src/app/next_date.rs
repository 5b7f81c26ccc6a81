//! NextDateQuery - `now` / `date` / `repeat` クエリの受け口
//!
//! HTTP 層から生のクエリパラメータを受け取り、エンジンを呼び出す。
//! エラーはすべて 400（Bad Request）として人間が読めるメッセージに変換する。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CalendarDate, ErrorKind, RecurrenceError};
use crate::engine::next_occurrence;

/// Status every rejected query is answered with.
pub const BAD_REQUEST: u16 = 400;

/// Raw query parameters of a next-date request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDateQuery {
    pub now: Option<String>,
    pub date: Option<String>,
    pub repeat: Option<String>,
}

/// A request the caller must answer with `status` and `error` as the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    #[serde(skip)]
    pub status: u16,

    pub error: String,

    /// Engine error classification; absent for missing parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl Rejection {
    fn missing(parameter: &str) -> Self {
        Self {
            status: BAD_REQUEST,
            error: format!("missing query parameter '{parameter}'"),
            kind: None,
        }
    }
}

impl From<RecurrenceError> for Rejection {
    fn from(err: RecurrenceError) -> Self {
        Self {
            status: BAD_REQUEST,
            kind: Some(err.kind()),
            error: err.to_string(),
        }
    }
}

impl NextDateQuery {
    /// Collect the known parameters; the first occurrence of each wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "now" => &mut query.now,
                "date" => &mut query.date,
                "repeat" => &mut query.repeat,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// The next date as `YYYYMMDD`, or the rejection to send back.
    ///
    /// A missing `repeat` is treated as an empty rule.
    pub fn answer(&self) -> Result<String, Rejection> {
        let now = self.now.as_deref().ok_or_else(|| Rejection::missing("now"))?;
        let date = self.date.as_deref().ok_or_else(|| Rejection::missing("date"))?;
        let repeat = self.repeat.as_deref().unwrap_or_default();

        let now = CalendarDate::parse(now)?;
        let next = next_occurrence(now, date, repeat).inspect_err(|err| {
            debug!(%now, date, repeat, error = %err, "next date rejected");
        })?;
        Ok(next.to_string())
    }
}
