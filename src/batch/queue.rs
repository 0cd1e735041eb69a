use crate::batch::encode::OperationKind;
use crate::entity::RowEntity;
use std::collections::VecDeque;

/// One encoded operation awaiting submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub kind: OperationKind,
    pub entity: RowEntity,
}

/// Ordered pending operations for exactly one partition.
///
/// Every item shares the queue's case-normalized partition key; the original
/// casing of the first enqueued entity is kept for submission. Queues are
/// ephemeral: created by the grouper and fully drained within one
/// coordinator call, owned by a single worker for their whole lifetime.
#[derive(Debug)]
pub struct BatchQueue {
    partition_key: String,
    items: VecDeque<BatchItem>,
}

impl BatchQueue {
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            items: VecDeque::new(),
        }
    }

    /// Partition key as first seen in the input (original casing).
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    pub fn push(&mut self, item: BatchItem) {
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes and returns up to `capacity` items, preserving input order.
    pub fn pop_up_to(&mut self, capacity: usize) -> Vec<BatchItem> {
        let take = capacity.min(self.items.len());
        self.items.drain(..take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchItem, BatchQueue};
    use crate::batch::encode::OperationKind;
    use crate::entity::RowEntity;

    fn item(row_key: &str) -> BatchItem {
        BatchItem {
            kind: OperationKind::Insert,
            entity: RowEntity::new("p", row_key),
        }
    }

    #[test]
    fn pop_up_to_preserves_order_and_bounds() {
        let mut queue = BatchQueue::new("p");
        for key in ["a", "b", "c", "d", "e"] {
            queue.push(item(key));
        }

        let chunk = queue.pop_up_to(3);
        let keys: Vec<&str> = chunk.iter().map(|i| i.entity.row_key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(queue.len(), 2);

        let rest = queue.pop_up_to(3);
        let keys: Vec<&str> = rest.iter().map(|i| i.entity.row_key.as_str()).collect();
        assert_eq!(keys, ["d", "e"]);
        assert!(queue.is_empty());
        assert!(queue.pop_up_to(3).is_empty());
    }
}
