use crate::entity::RowEntity;
use crate::error::SinkError;
use crate::mapping::TryFromRow;

/// Aggregate outcome of one coordinator call, the sole artifact returned to
/// the caller. Write failures are reported here, never as `Err`.
///
/// `passed + failed <= total_entities` always holds; equality holds when the
/// call ran to completion (no cancellation).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionResult {
    pub total_entities: usize,
    pub passed: usize,
    pub failed: usize,
    pub messages: Vec<String>,
    pub failed_entities: Vec<RowEntity>,
}

impl TransactionResult {
    pub fn with_total(total_entities: usize) -> Self {
        Self {
            total_entities,
            ..Self::default()
        }
    }

    /// True when every entity was accounted for (the call was not cancelled).
    pub fn is_complete(&self) -> bool {
        self.passed + self.failed == self.total_entities
    }

    /// Folds another result in, summing counters and appending messages and
    /// failed entities. Used to sum per-page results in bulk deletes.
    pub fn merge(&mut self, other: TransactionResult) {
        self.total_entities += other.total_entities;
        self.passed += other.passed;
        self.failed += other.failed;
        self.messages.extend(other.messages);
        self.failed_entities.extend(other.failed_entities);
    }

    /// Decodes the failed entities back to the caller's type. Successful
    /// items are never round-tripped; the caller already holds the
    /// authoritative typed source.
    pub fn into_typed<T: TryFromRow>(self) -> Result<TypedTransactionResult<T>, SinkError> {
        let failed_entities = self
            .failed_entities
            .into_iter()
            .map(|row| T::try_from_row(row).map_err(SinkError::from))
            .collect::<Result<Vec<T>, SinkError>>()?;
        Ok(TypedTransactionResult {
            total_entities: self.total_entities,
            passed: self.passed,
            failed: self.failed,
            messages: self.messages,
            failed_entities,
        })
    }
}

/// [`TransactionResult`] with the failed entities decoded to the caller's
/// object type.
#[derive(Debug, Clone)]
pub struct TypedTransactionResult<T> {
    pub total_entities: usize,
    pub passed: usize,
    pub failed: usize,
    pub messages: Vec<String>,
    pub failed_entities: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::TransactionResult;
    use crate::entity::RowEntity;

    #[test]
    fn merge_sums_counters_and_appends_lists() {
        let mut a = TransactionResult {
            total_entities: 3,
            passed: 2,
            failed: 1,
            messages: vec!["m1".into()],
            failed_entities: vec![RowEntity::new("p", "x")],
        };
        let b = TransactionResult {
            total_entities: 2,
            passed: 2,
            failed: 0,
            messages: vec!["m2".into()],
            failed_entities: Vec::new(),
        };
        a.merge(b);
        assert_eq!(a.total_entities, 5);
        assert_eq!(a.passed, 4);
        assert_eq!(a.failed, 1);
        assert_eq!(a.messages, ["m1", "m2"]);
        assert_eq!(a.failed_entities.len(), 1);
        assert!(a.is_complete());
    }

    #[test]
    fn incomplete_result_is_detectable() {
        let result = TransactionResult {
            total_entities: 4,
            passed: 1,
            failed: 1,
            ..TransactionResult::default()
        };
        assert!(!result.is_complete());
    }
}
