//! Shared recording store double for the integration suites.
#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::StreamExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tablesink::{
    BatchItem, BatchOutcome, OperationKind, ReadScope, RowEntity, RowStream, SinkError, TableStore,
};

#[derive(Debug, Clone)]
pub struct SubmitRecord {
    pub table: String,
    pub partition_key: String,
    pub kinds: Vec<OperationKind>,
    pub entities: Vec<RowEntity>,
}

/// Store double that serves seeded rows to scoped reads, applies a scripted
/// outcome per submit (success once the script runs out), and records every
/// call it sees.
#[derive(Default)]
pub struct RecordingStore {
    pub rows: Mutex<Vec<RowEntity>>,
    pub submit_script: Mutex<VecDeque<BatchOutcome>>,
    pub submits: Mutex<Vec<SubmitRecord>>,
    pub read_scopes: Mutex<Vec<ReadScope>>,
    /// Successive `table_exists` answers; `false` once exhausted.
    pub exists_script: Mutex<VecDeque<bool>>,
    pub dropped: Mutex<Vec<String>>,
    pub created: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_rows(&self, rows: impl IntoIterator<Item = RowEntity>) {
        self.rows.lock().extend(rows);
    }

    pub fn script_submit(&self, outcomes: impl IntoIterator<Item = BatchOutcome>) {
        self.submit_script.lock().extend(outcomes);
    }

    pub fn script_exists(&self, answers: impl IntoIterator<Item = bool>) {
        self.exists_script.lock().extend(answers);
    }

    pub fn submit_sizes(&self) -> Vec<usize> {
        self.submits.lock().iter().map(|s| s.entities.len()).collect()
    }
}

#[async_trait]
impl TableStore for RecordingStore {
    async fn submit_batch(
        &self,
        table: &str,
        partition_key: &str,
        items: &[BatchItem],
    ) -> BatchOutcome {
        self.submits.lock().push(SubmitRecord {
            table: table.to_string(),
            partition_key: partition_key.to_string(),
            kinds: items.iter().map(|i| i.kind).collect(),
            entities: items.iter().map(|i| i.entity.clone()).collect(),
        });
        self.submit_script
            .lock()
            .pop_front()
            .unwrap_or(BatchOutcome::Success)
    }

    async fn scoped_read(&self, _table: &str, scope: ReadScope) -> Result<RowStream, SinkError> {
        self.read_scopes.lock().push(scope);
        let rows: Vec<Result<RowEntity, SinkError>> =
            self.rows.lock().iter().cloned().map(Ok).collect();
        Ok(futures_util::stream::iter(rows).boxed())
    }

    async fn create_table(&self, table: &str) -> Result<(), SinkError> {
        self.created.lock().push(table.to_string());
        Ok(())
    }

    async fn drop_table(&self, table: &str) -> Result<(), SinkError> {
        self.dropped.lock().push(table.to_string());
        Ok(())
    }

    async fn table_exists(&self, _table: &str) -> Result<bool, SinkError> {
        Ok(self.exists_script.lock().pop_front().unwrap_or(false))
    }
}
