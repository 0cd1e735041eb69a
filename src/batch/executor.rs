//! Drains one partition's queue against the store.
//!
//! The store applies a chunk atomically or rejects it, naming at most one
//! failing item per attempt. The drain protocol therefore shrinks around
//! reported failures: isolate the named item, record it as failed, resubmit
//! the remainder. Every failing attempt either ends the chunk or strictly
//! shrinks it, so a chunk of length K costs at most K submit attempts.

use crate::batch::BATCH_CAPACITY;
use crate::batch::queue::{BatchItem, BatchQueue};
use crate::batch::result::TransactionResult;
use crate::cancel::CancelSignal;
use crate::store::{BatchOutcome, TableStore};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStatus {
    Completed,
    /// The cancel signal fired; the queue was left partially drained and the
    /// result holds whatever was accounted for up to that point.
    Cancelled,
}

/// What one failed submission attempt means for the in-flight chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitVerdict {
    AllOk,
    /// Isolate the item at this index and retry the remainder.
    OneRemoved(usize),
    /// No usable index: the whole chunk is hopeless.
    AllFailed,
}

/// Classifies a submission outcome against the chunk that was submitted.
///
/// An index is usable only if it refers to the current chunk and leaves a
/// remainder worth retrying: a stale (out-of-bounds) index, an absent index,
/// a fatal failure, and a single-item chunk all fail the chunk whole.
fn judge(outcome: &BatchOutcome, chunk_len: usize) -> SubmitVerdict {
    match outcome {
        BatchOutcome::Success => SubmitVerdict::AllOk,
        BatchOutcome::PartialFailure {
            failed_index: Some(index),
            ..
        } if chunk_len > 1 && *index < chunk_len => SubmitVerdict::OneRemoved(*index),
        BatchOutcome::PartialFailure { .. } | BatchOutcome::FatalFailure { .. } => {
            SubmitVerdict::AllFailed
        }
    }
}

fn failure_text(outcome: &BatchOutcome) -> &str {
    match outcome {
        BatchOutcome::Success => "",
        BatchOutcome::PartialFailure { message, .. }
        | BatchOutcome::FatalFailure { message } => message,
    }
}

/// Fully drains `queue`, accounting every item into `result` exactly once as
/// passed or failed (unless cancelled first). Never returns an error: write
/// failures become failed-entity entries plus messages.
pub async fn drain_queue<S: TableStore + ?Sized>(
    store: &S,
    table: &str,
    queue: &mut BatchQueue,
    result: &mut TransactionResult,
    cancel: Option<&CancelSignal>,
) -> DrainStatus {
    let partition_key = queue.partition_key().to_string();
    while !queue.is_empty() {
        let mut chunk = queue.pop_up_to(BATCH_CAPACITY);
        while !chunk.is_empty() {
            if cancel.is_some_and(CancelSignal::is_cancelled) {
                debug!(
                    table,
                    partition_key = %partition_key,
                    remaining = chunk.len() + queue.len(),
                    "drain cancelled; returning partial result"
                );
                return DrainStatus::Cancelled;
            }

            let outcome = store.submit_batch(table, &partition_key, &chunk).await;
            match judge(&outcome, chunk.len()) {
                SubmitVerdict::AllOk => {
                    result.passed += chunk.len();
                    chunk.clear();
                }
                SubmitVerdict::OneRemoved(index) => {
                    // Relative order of the remainder is preserved.
                    let item = chunk.remove(index);
                    let text = failure_text(&outcome);
                    warn!(
                        table,
                        partition_key = %partition_key,
                        row_key = %item.entity.row_key,
                        error = text,
                        "store rejected one batch item; retrying remainder"
                    );
                    result.messages.push(format!(
                        "partition '{partition_key}': row '{}' rejected: {text}",
                        item.entity.row_key
                    ));
                    result.failed += 1;
                    result.failed_entities.push(item.entity);
                }
                SubmitVerdict::AllFailed => {
                    let text = failure_text(&outcome);
                    let row_keys = chunk
                        .iter()
                        .map(|item| item.entity.row_key.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    warn!(
                        table,
                        partition_key = %partition_key,
                        chunk_len = chunk.len(),
                        error = text,
                        "whole chunk failed"
                    );
                    result.messages.push(format!(
                        "partition '{partition_key}': batch of {} failed ({row_keys}): {text}",
                        chunk.len()
                    ));
                    result.failed += chunk.len();
                    result
                        .failed_entities
                        .extend(chunk.drain(..).map(|item| item.entity));
                }
            }
        }
    }
    DrainStatus::Completed
}
