//! The injected remote-store seam.
//!
//! Transport, auth, and the store's own SQL dialect live behind
//! [`TableStore`]; the engine only depends on the three behaviors specified
//! here: ordered batch submission with single-failure reporting, a lazy
//! scoped read, and the table lifecycle calls `clear_table` needs.

use crate::batch::BatchItem;
use crate::entity::{RowEntity, columns};
use crate::error::SinkError;
use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// Lazy row sequence produced by [`TableStore::scoped_read`]. Restartable by
/// issuing the read again; not resumable mid-stream.
pub type RowStream = BoxStream<'static, Result<RowEntity, SinkError>>;

/// Outcome of one batch submission attempt.
///
/// The store must attempt items in input order and stop at the first
/// failure, so `failed_index` (when present) identifies an item of the chunk
/// that was just submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every item in the chunk was applied atomically.
    Success,
    /// The store rejected one item and applied nothing. `failed_index` is the
    /// offset of the rejected item within the submitted chunk; stores that
    /// cannot attribute the failure leave it absent.
    PartialFailure {
        failed_index: Option<usize>,
        message: String,
    },
    /// Failure unrelated to any single item (transport, auth, throttling).
    FatalFailure { message: String },
}

/// Column projection and row filter for a scoped read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadScope {
    pub columns: Vec<String>,
    pub partition_key: Option<String>,
    pub row_key: Option<String>,
    pub filter: Option<String>,
    pub include_soft_deleted: bool,
}

impl ReadScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn partition(mut self, partition_key: impl Into<String>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    pub fn row(mut self, row_key: impl Into<String>) -> Self {
        self.row_key = Some(row_key.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn include_soft_deleted(mut self, include: bool) -> Self {
        self.include_soft_deleted = include;
        self
    }

    /// The combined filter text a store should apply: key-equality clauses,
    /// the caller's extra filter, and the soft-delete exclusion, joined with
    /// `and`. Key values have embedded quotes doubled.
    pub fn effective_filter(&self) -> Option<String> {
        let mut clauses = Vec::new();
        if let Some(pk) = &self.partition_key {
            clauses.push(format!(
                "{} eq '{}'",
                columns::PARTITION_KEY,
                pk.replace('\'', "''")
            ));
        }
        if let Some(rk) = &self.row_key {
            clauses.push(format!(
                "{} eq '{}'",
                columns::ROW_KEY,
                rk.replace('\'', "''")
            ));
        }
        if let Some(extra) = &self.filter {
            if clauses.is_empty() {
                clauses.push(extra.clone());
            } else {
                clauses.push(format!("({extra})"));
            }
        }
        if !self.include_soft_deleted {
            clauses.push(format!("{} ne true", columns::DELETED));
        }
        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" and "))
        }
    }
}

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Submits one ordered chunk for atomic application within
    /// `partition_key`. Infallible at the signature level: every failure mode
    /// is an outcome the engine classifies.
    async fn submit_batch(
        &self,
        table: &str,
        partition_key: &str,
        items: &[BatchItem],
    ) -> BatchOutcome;

    /// Reads rows matching `scope`, lazily.
    async fn scoped_read(&self, table: &str, scope: ReadScope) -> Result<RowStream, SinkError>;

    async fn create_table(&self, table: &str) -> Result<(), SinkError>;

    async fn drop_table(&self, table: &str) -> Result<(), SinkError>;

    async fn table_exists(&self, table: &str) -> Result<bool, SinkError>;
}
