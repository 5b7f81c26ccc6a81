//! TaskStore port - タスクの保存先（正本）
//!
//! TaskStore は以下を管理します：
//! - タスクの期日（date）と繰り返しルール（repeat）
//! - 完了・繰り越し時の期日の更新
//!
//! エンジンはストアに直接アクセスしません。
//! 読み出し・書き戻しは app 層（Scheduler）が行います。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CalendarDate, TaskId, TaskRecord};

/// StoreError はストア操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("store operation failed: {0}")]
    OperationFailed(String),
}

/// Which records a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Dated on or after the given day.
    Upcoming(CalendarDate),
    /// Dated exactly on the given day.
    OnDate(CalendarDate),
    /// Title or comment contains the text, ignoring ASCII case; any date.
    Text(String),
}

impl TaskFilter {
    pub fn matches(&self, record: &TaskRecord) -> bool {
        match self {
            Self::Upcoming(from) => record.date >= *from,
            Self::OnDate(date) => record.date == *date,
            Self::Text(text) => {
                let needle = text.to_ascii_lowercase();
                record.title.to_ascii_lowercase().contains(&needle)
                    || record.comment.to_ascii_lowercase().contains(&needle)
            }
        }
    }
}

/// TaskStore はタスクレコードの正本
///
/// # 設計原則
/// - 期日は常に検証済みの `CalendarDate` として保存する
/// - `repeat` はユーザーが書いたテキストのまま保存する（毎回パースし直す）
/// - `Send + Sync` を要求（複数タスクから共有できる）
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Store a new record; the record carries its own id.
    async fn insert(&self, record: TaskRecord) -> Result<(), StoreError>;

    async fn get(&self, id: TaskId) -> Result<TaskRecord, StoreError>;

    /// Replace an existing record.
    async fn update(&self, record: TaskRecord) -> Result<(), StoreError>;

    /// Persist the result of a completion/roll-over.
    async fn set_date(&self, id: TaskId, date: CalendarDate) -> Result<(), StoreError>;

    async fn delete(&self, id: TaskId) -> Result<(), StoreError>;

    /// Records matching `filter`, ordered by date, skipping `offset` and
    /// returning at most `limit`.
    async fn list(
        &self,
        filter: &TaskFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<TaskRecord>, StoreError>;
}
