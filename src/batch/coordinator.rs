use crate::batch::encode::Operation;
use crate::batch::executor::{DrainStatus, drain_queue};
use crate::batch::grouper::group_by_partition;
use crate::batch::result::TransactionResult;
use crate::cancel::CancelSignal;
use crate::entity::RowEntity;
use crate::store::TableStore;
use tracing::debug;

/// Runs the full engine over a flat operation list: group by partition, then
/// drain every queue into one explicit accumulator.
///
/// Partitions are mutually independent; a partition's failures never abort
/// its siblings, and each queue is drained to completion before the next
/// starts. On cancellation the partial result accumulated so far is
/// returned — partial progress is reported, never discarded. Empty input is
/// a zero-count success.
pub async fn execute_transaction<S: TableStore + ?Sized>(
    store: &S,
    table: &str,
    input: Vec<(RowEntity, Operation)>,
    cancel: Option<&CancelSignal>,
) -> TransactionResult {
    let mut result = TransactionResult::with_total(input.len());
    let queues = group_by_partition(input);
    debug!(table, partitions = queues.len(), total = result.total_entities, "transaction grouped");

    for (_, mut queue) in queues {
        let status = drain_queue(store, table, &mut queue, &mut result, cancel).await;
        if status == DrainStatus::Cancelled {
            break;
        }
    }

    debug_assert!(result.passed + result.failed <= result.total_entities);
    result
}
