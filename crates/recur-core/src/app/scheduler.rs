//! Scheduler - タスクのライフサイクル
//!
//! # 役割
//! - 作成・更新: 入力を検証し、過去の期日を今日以降に正規化して保存
//! - 完了: 繰り返しなしなら削除、繰り返しありなら次の期日へ繰り越し
//! - アジェンダ: 今日以降のタスクを期日順に返す（検索・ページング付き）
//! - 取得・削除: ID 指定
//!
//! 日付計算はすべて engine に委ね、ここでは読み書きの順序だけを決める。

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::config::SchedulerConfig;
use crate::domain::{CalendarDate, RecurrenceError, RecurrenceRule, TaskDraft, TaskId, TaskRecord};
use crate::engine::next_occurrence;
use crate::ports::{Clock, StoreError, TaskFilter, TaskStore};

/// SchedulerError は Scheduler の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task title is empty")]
    MissingTitle,

    #[error("repetition rule is {len} characters long, the limit is {max}")]
    RuleTooLong { len: usize, max: usize },

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What completing a task did to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum Completion {
    /// Non-recurring task, deleted.
    Removed,
    /// Recurring task, moved to its next due date.
    Rescheduled(CalendarDate),
}

/// Listing request for [`Scheduler::agenda`].
///
/// - `search`: `DD.MM.YYYY` lists that exact day, any other non-empty text
///   matches title or comment; absent or empty lists today and later
/// - `limit`: page size, see [`SchedulerConfig::page_size`]
/// - `page`: 1-based; absent or 0 means the first page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

impl AgendaQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Store filter for this query, relative to `today`.
    pub fn filter(&self, today: CalendarDate) -> TaskFilter {
        match self.search.as_deref() {
            None | Some("") => TaskFilter::Upcoming(today),
            Some(text) => match CalendarDate::parse_day_month_year(text) {
                Some(date) => TaskFilter::OnDate(date),
                None => TaskFilter::Text(text.to_string()),
            },
        }
    }

    /// Number of records before the requested page.
    pub fn offset(&self, limit: usize) -> usize {
        let page = self.page.filter(|page| *page >= 1).unwrap_or(1);
        (page - 1).saturating_mul(limit)
    }
}

/// Due date a draft should be stored with, relative to `today`.
///
/// - no date: today
/// - today or later: kept
/// - in the past without a rule: today
/// - in the past with a rule: the rule's next occurrence after today
pub fn resolve_due_date(
    draft: &TaskDraft,
    today: CalendarDate,
) -> Result<CalendarDate, RecurrenceError> {
    let raw = match draft.date.as_deref() {
        None | Some("") => return Ok(today),
        Some(raw) => raw,
    };

    let date = CalendarDate::parse(raw)?;
    if date >= today {
        Ok(date)
    } else if draft.repeat.is_empty() {
        Ok(today)
    } else {
        next_occurrence(today, raw, &draft.repeat)
    }
}

/// Scheduler はストアと時計を使ってタスクを管理する
///
/// # 使用例
/// ```ignore
/// let scheduler = Scheduler::new(InMemoryTaskStore::new(), SystemClock, SchedulerConfig::default());
/// let task = scheduler.create_task(TaskDraft::new("rent").with_repeat("m 1")).await?;
/// scheduler.complete_task(task.id).await?;
/// ```
pub struct Scheduler<S, C> {
    store: S,
    clock: C,
    config: SchedulerConfig,
}

impl<S: TaskStore, C: Clock> Scheduler<S, C> {
    pub fn new(store: S, clock: C, config: SchedulerConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get_task(&self, id: TaskId) -> Result<TaskRecord, SchedulerError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), SchedulerError> {
        self.store.delete(id).await?;
        info!(%id, "task deleted");
        Ok(())
    }

    /// Validate a draft and store it with its resolved due date.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<TaskRecord, SchedulerError> {
        let record = self.build_record(TaskId::new(), draft)?;
        self.store.insert(record.clone()).await?;
        info!(id = %record.id, date = %record.date, "task created");
        Ok(record)
    }

    /// Replace an existing task with a validated draft.
    pub async fn update_task(
        &self,
        id: TaskId,
        draft: TaskDraft,
    ) -> Result<TaskRecord, SchedulerError> {
        // Fail with NotFound before validating the new content.
        self.store.get(id).await?;

        let record = self.build_record(id, draft)?;
        self.store.update(record.clone()).await?;
        info!(%id, date = %record.date, "task updated");
        Ok(record)
    }

    /// Mark a task done.
    ///
    /// A non-recurring task is deleted; a recurring one moves to its next
    /// occurrence after today.
    pub async fn complete_task(&self, id: TaskId) -> Result<Completion, SchedulerError> {
        let task = self.store.get(id).await?;

        if !task.is_recurring() {
            self.store.delete(id).await?;
            info!(%id, "non-recurring task completed and removed");
            return Ok(Completion::Removed);
        }

        let today = self.clock.today()?;
        let next = next_occurrence(today, &task.date.to_string(), &task.repeat)?;
        self.store.set_date(id, next).await?;
        info!(%id, from = %task.date, to = %next, "recurring task rolled over");
        Ok(Completion::Rescheduled(next))
    }

    /// One page of tasks ordered by date: today and later, or the search
    /// results when the query has one.
    pub async fn agenda(&self, query: &AgendaQuery) -> Result<Vec<TaskRecord>, SchedulerError> {
        let today = self.clock.today()?;
        let filter = query.filter(today);
        let limit = self.config.page_size(query.limit);
        let offset = query.offset(limit);
        let tasks = self.store.list(&filter, limit, offset).await?;
        debug!(%today, ?filter, limit, offset, count = tasks.len(), "agenda listed");
        Ok(tasks)
    }

    fn build_record(&self, id: TaskId, draft: TaskDraft) -> Result<TaskRecord, SchedulerError> {
        if draft.title.trim().is_empty() {
            return Err(SchedulerError::MissingTitle);
        }

        let len = draft.repeat.chars().count();
        if len > self.config.max_rule_len {
            return Err(SchedulerError::RuleTooLong {
                len,
                max: self.config.max_rule_len,
            });
        }
        if !draft.repeat.is_empty() {
            RecurrenceRule::parse(&draft.repeat)?;
        }

        let date = resolve_due_date(&draft, self.clock.today()?)?;
        Ok(TaskRecord {
            id,
            date,
            title: draft.title,
            comment: draft.comment,
            repeat: draft.repeat,
        })
    }
}
