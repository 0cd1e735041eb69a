//! The partitioned batch-transaction engine.
//!
//! A flat list of `(RowEntity, Operation)` pairs is grouped into one
//! [`BatchQueue`] per case-normalized partition key, then each queue is
//! drained in bounded chunks against the store. The store guarantees
//! atomicity only within one chunk and reports at most one failing item per
//! attempt; [`executor`] holds the shrink-and-retry protocol that drains a
//! queue under those constraints with exact pass/fail accounting.

pub mod coordinator;
pub mod encode;
pub mod executor;
pub mod grouper;
pub mod queue;
pub mod result;


pub use encode::{DeleteMode, Operation, OperationKind};
pub use queue::{BatchItem, BatchQueue};
pub use result::{TransactionResult, TypedTransactionResult};

/// Hard ceiling the store imposes on one atomic batch.
pub const BATCH_CAPACITY: usize = 100;
