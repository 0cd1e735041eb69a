pub mod batch;
pub mod cancel;
pub mod config;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod store;

pub use crate::batch::{
    BATCH_CAPACITY, BatchItem, DeleteMode, Operation, OperationKind, TransactionResult,
    TypedTransactionResult,
};
pub use crate::cancel::CancelSignal;
pub use crate::config::SinkConfig;
pub use crate::entity::{RowEntity, Value, columns};
pub use crate::error::{SinkError, SinkErrorCode};
pub use crate::mapping::{RowDecodeError, RowEncodeError, TryFromRow, TryIntoRow};
pub use crate::store::{BatchOutcome, ReadScope, RowStream, TableStore};

use crate::batch::coordinator::execute_transaction;
use futures_util::StreamExt;
use std::time::Duration;
use tracing::info;

/// Update flavor shared by the update and upsert surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Merge the given properties into the stored row.
    Merge,
    /// Replace the stored row wholesale.
    Replace,
}

/// Client-side write path for one remote tabular store.
///
/// All write surfaces funnel into the batch engine: operations are grouped
/// into bounded atomic batches per partition and submitted through the
/// injected [`TableStore`]. Partial write failures are reported through the
/// returned [`TransactionResult`], never as `Err` — inspect `failed`,
/// `failed_entities`, and `messages`. `Err` is reserved for argument
/// validation, row encode/decode failures, and store-side read/lifecycle
/// errors.
///
/// No state is held between calls; durable state lives only in the remote
/// store after successful submission.
#[derive(Debug)]
pub struct TableClient<S> {
    store: S,
    config: SinkConfig,
    cancel: Option<CancelSignal>,
}

impl<S: TableStore> TableClient<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SinkConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: SinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a cancellation flag checked before each chunk submission.
    /// Cancelled calls return the partial result accumulated so far.
    pub fn with_cancel_signal(mut self, cancel: CancelSignal) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Raw surface: RowEntity in, RowEntity out.
    // ------------------------------------------------------------------

    /// Runs an arbitrary mix of operations through the engine.
    pub async fn execute(
        &self,
        table: &str,
        input: Vec<(RowEntity, Operation)>,
    ) -> TransactionResult {
        execute_transaction(&self.store, table, input, self.cancel.as_ref()).await
    }

    pub async fn insert_rows(&self, table: &str, rows: Vec<RowEntity>) -> TransactionResult {
        self.execute_uniform(table, rows, Operation::new(OperationKind::Insert))
            .await
    }

    pub async fn update_rows(
        &self,
        table: &str,
        rows: Vec<RowEntity>,
        mode: UpdateMode,
    ) -> TransactionResult {
        let kind = match mode {
            UpdateMode::Merge => OperationKind::UpdateMerge,
            UpdateMode::Replace => OperationKind::UpdateReplace,
        };
        self.execute_uniform(table, rows, Operation::new(kind)).await
    }

    pub async fn upsert_rows(
        &self,
        table: &str,
        rows: Vec<RowEntity>,
        mode: UpdateMode,
    ) -> TransactionResult {
        let kind = match mode {
            UpdateMode::Merge => OperationKind::UpsertMerge,
            UpdateMode::Replace => OperationKind::UpsertReplace,
        };
        self.execute_uniform(table, rows, Operation::new(kind)).await
    }

    pub async fn delete_rows(
        &self,
        table: &str,
        rows: Vec<RowEntity>,
        mode: DeleteMode,
    ) -> TransactionResult {
        self.execute_uniform(table, rows, Operation::delete(mode))
            .await
    }

    async fn execute_uniform(
        &self,
        table: &str,
        rows: Vec<RowEntity>,
        op: Operation,
    ) -> TransactionResult {
        let input = rows.into_iter().map(|row| (row, op)).collect();
        self.execute(table, input).await
    }

    // ------------------------------------------------------------------
    // Typed surface. Encode failures raise before any submission; only
    // failed entities are decoded back to the caller's type.
    // ------------------------------------------------------------------

    pub async fn insert<T>(
        &self,
        table: &str,
        items: &[T],
    ) -> Result<TypedTransactionResult<T>, SinkError>
    where
        T: TryIntoRow + TryFromRow,
    {
        self.execute_typed(table, items, Operation::new(OperationKind::Insert))
            .await
    }

    pub async fn update<T>(
        &self,
        table: &str,
        items: &[T],
        mode: UpdateMode,
    ) -> Result<TypedTransactionResult<T>, SinkError>
    where
        T: TryIntoRow + TryFromRow,
    {
        let kind = match mode {
            UpdateMode::Merge => OperationKind::UpdateMerge,
            UpdateMode::Replace => OperationKind::UpdateReplace,
        };
        self.execute_typed(table, items, Operation::new(kind)).await
    }

    pub async fn upsert<T>(
        &self,
        table: &str,
        items: &[T],
        mode: UpdateMode,
    ) -> Result<TypedTransactionResult<T>, SinkError>
    where
        T: TryIntoRow + TryFromRow,
    {
        let kind = match mode {
            UpdateMode::Merge => OperationKind::UpsertMerge,
            UpdateMode::Replace => OperationKind::UpsertReplace,
        };
        self.execute_typed(table, items, Operation::new(kind)).await
    }

    pub async fn delete<T>(
        &self,
        table: &str,
        items: &[T],
        mode: DeleteMode,
    ) -> Result<TypedTransactionResult<T>, SinkError>
    where
        T: TryIntoRow + TryFromRow,
    {
        self.execute_typed(table, items, Operation::delete(mode))
            .await
    }

    async fn execute_typed<T>(
        &self,
        table: &str,
        items: &[T],
        op: Operation,
    ) -> Result<TypedTransactionResult<T>, SinkError>
    where
        T: TryIntoRow + TryFromRow,
    {
        // Every row must encode before anything is submitted: a mapping
        // failure is fatal for the whole call and never enters the engine.
        let input = items
            .iter()
            .map(|item| Ok((item.try_into_row()?, op)))
            .collect::<Result<Vec<_>, RowEncodeError>>()?;
        let result = self.execute(table, input).await;
        result.into_typed()
    }

    // ------------------------------------------------------------------
    // Derived bulk operations.
    // ------------------------------------------------------------------

    /// Deletes every row matching the scope: a scoped read over identity
    /// columns, paged into batches of [`BATCH_CAPACITY`] and submitted as
    /// delete operations, with per-page results summed.
    ///
    /// With [`DeleteMode::Soft`] the read excludes already-soft-deleted rows
    /// so they are not rewritten; a hard delete includes them so the physical
    /// rows go too.
    pub async fn delete_matching(
        &self,
        table: &str,
        partition_key: Option<&str>,
        extra_filter: Option<&str>,
        mode: DeleteMode,
    ) -> Result<TransactionResult, SinkError> {
        let soft = mode == DeleteMode::Soft;
        let mut selected = vec![
            columns::PARTITION_KEY.to_string(),
            columns::ROW_KEY.to_string(),
            columns::ETAG.to_string(),
        ];
        if soft {
            selected.push(columns::DELETED.to_string());
        }
        let mut scope = ReadScope::new()
            .select(selected)
            .include_soft_deleted(!soft);
        if let Some(pk) = partition_key {
            scope = scope.partition(pk);
        }
        if let Some(filter) = extra_filter {
            scope = scope.filter(filter);
        }

        let mut rows = self.store.scoped_read(table, scope).await?;
        let mut page: Vec<RowEntity> = Vec::with_capacity(BATCH_CAPACITY);
        let mut summed = TransactionResult::default();
        while let Some(row) = rows.next().await {
            page.push(row?);
            if page.len() == BATCH_CAPACITY {
                let result = self
                    .delete_rows(table, std::mem::take(&mut page), mode)
                    .await;
                summed.merge(result);
            }
        }
        if !page.is_empty() {
            let result = self.delete_rows(table, page, mode).await;
            summed.merge(result);
        }
        Ok(summed)
    }

    /// Removes every row of one partition, by soft or hard delete.
    pub async fn clear_partition(
        &self,
        table: &str,
        partition_key: &str,
        use_soft_delete: bool,
    ) -> Result<TransactionResult, SinkError> {
        if partition_key.trim().is_empty() {
            return Err(SinkError::Validation(
                "partition key must not be empty".into(),
            ));
        }
        let mode = if use_soft_delete {
            DeleteMode::Soft
        } else {
            DeleteMode::Hard
        };
        self.delete_matching(table, Some(partition_key), None, mode)
            .await
    }

    /// Empties a table by dropping and recreating it, guaranteeing removal of
    /// any state a row-level scan might miss, at the cost of latency.
    ///
    /// After the drop, the store is polled for the table's absence at
    /// [`SinkConfig::table_clear_poll_interval_ms`] until it is confirmed
    /// gone, then the table is recreated. The poll loop is unbounded; wrap
    /// the call in `tokio::time::timeout` if the store can wedge.
    pub async fn clear_table(&self, table: &str) -> Result<(), SinkError> {
        self.store.drop_table(table).await?;
        info!(table, "table dropped; waiting for the store to confirm");

        let interval = Duration::from_millis(self.config.table_clear_poll_interval_ms);
        while self.store.table_exists(table).await? {
            tokio::time::sleep(interval).await;
        }

        self.store.create_table(table).await?;
        info!(table, "table recreated");
        Ok(())
    }
}
