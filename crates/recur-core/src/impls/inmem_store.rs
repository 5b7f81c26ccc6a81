//! InMemoryTaskStore - 開発用のタスクストア
//!
//! # 実装詳細
//! - HashMap<TaskId, TaskRecord> でレコードを管理
//! - tokio::sync::Mutex で排他制御
//! - list は TaskFilter で絞り込み、(date, id) 順に並べてから offset / limit を適用

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CalendarDate, TaskId, TaskRecord};
use crate::ports::{StoreError, TaskFilter, TaskStore};

/// In-memory task store.
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    records: Arc<Mutex<HashMap<TaskId, TaskRecord>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, record: TaskRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::OperationFailed(format!(
                "duplicate task id {}",
                record.id
            )));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: TaskId) -> Result<TaskRecord, StoreError> {
        self.records
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, record: TaskRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let slot = records
            .get_mut(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        *slot = record;
        Ok(())
    }

    async fn set_date(&self, id: TaskId, date: CalendarDate) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.date = date;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<TaskRecord>, StoreError> {
        let records = self.records.lock().await;
        let mut found: Vec<&TaskRecord> = records
            .values()
            .filter(|record| filter.matches(record))
            .collect();
        found.sort_by_key(|record| (record.date, record.id));
        Ok(found.into_iter().skip(offset).take(limit).cloned().collect())
    }
}
