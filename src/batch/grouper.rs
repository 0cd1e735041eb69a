use crate::batch::encode::{Operation, encode_operation};
use crate::batch::queue::{BatchItem, BatchQueue};
use crate::entity::RowEntity;
use std::collections::BTreeMap;

/// Splits a flat operation list into one queue per partition.
///
/// Grouping is case-insensitive: two entities whose partition keys differ
/// only by case land in the same queue (the store treats them as one
/// atomic-batch scope). Per-partition order follows input order;
/// cross-partition order is the normalized-key order of the returned map.
/// Empty input yields an empty map, which callers must treat as a
/// zero-count success.
pub fn group_by_partition(
    input: impl IntoIterator<Item = (RowEntity, Operation)>,
) -> BTreeMap<String, BatchQueue> {
    let mut queues: BTreeMap<String, BatchQueue> = BTreeMap::new();
    for (mut entity, op) in input {
        let kind = encode_operation(op, &mut entity);
        let normalized = entity.partition_key.to_lowercase();
        let queue = queues
            .entry(normalized)
            .or_insert_with(|| BatchQueue::new(entity.partition_key.clone()));
        queue.push(BatchItem { kind, entity });
    }
    queues
}

#[cfg(test)]
mod tests {
    use super::group_by_partition;
    use crate::batch::encode::{DeleteMode, Operation, OperationKind};
    use crate::entity::RowEntity;

    fn insert(pk: &str, rk: &str) -> (RowEntity, Operation) {
        (
            RowEntity::new(pk, rk),
            Operation::new(OperationKind::Insert),
        )
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(group_by_partition(Vec::new()).is_empty());
    }

    #[test]
    fn keys_differing_only_by_case_share_a_queue() {
        let queues = group_by_partition(vec![
            insert("Accounts", "a"),
            insert("ACCOUNTS", "b"),
            insert("accounts", "c"),
            insert("orders", "d"),
        ]);
        assert_eq!(queues.len(), 2);

        let accounts = &queues["accounts"];
        assert_eq!(accounts.len(), 3);
        // First-seen casing is what gets submitted.
        assert_eq!(accounts.partition_key(), "Accounts");
        assert_eq!(queues["orders"].len(), 1);
    }

    #[test]
    fn per_partition_order_is_preserved_across_interleaving() {
        let mut queues = group_by_partition(vec![
            insert("a", "1"),
            insert("b", "x"),
            insert("a", "2"),
            insert("b", "y"),
            insert("a", "3"),
        ]);
        let chunk = queues.get_mut("a").unwrap().pop_up_to(10);
        let keys: Vec<&str> = chunk.iter().map(|i| i.entity.row_key.as_str()).collect();
        assert_eq!(keys, ["1", "2", "3"]);
    }

    #[test]
    fn operations_are_encoded_while_grouping() {
        let mut queues = group_by_partition(vec![(
            RowEntity::new("p", "r"),
            Operation::delete(DeleteMode::Soft),
        )]);
        let chunk = queues.get_mut("p").unwrap().pop_up_to(1);
        assert_eq!(chunk[0].kind, OperationKind::UpdateMerge);
        assert!(chunk[0].entity.is_deleted());
    }
}
