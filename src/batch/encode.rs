use crate::entity::RowEntity;
use serde::{Deserialize, Serialize};

/// Wire-level operation kinds understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Insert,
    UpdateMerge,
    UpdateReplace,
    UpsertMerge,
    UpsertReplace,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeleteMode {
    #[default]
    NotApplicable,
    /// Rewrite the row with `deleted = true` instead of removing it.
    Soft,
    /// Physically remove the row.
    Hard,
}

/// A logical operation as callers express it, before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub delete_mode: DeleteMode,
}

impl Operation {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            delete_mode: DeleteMode::NotApplicable,
        }
    }

    pub fn delete(mode: DeleteMode) -> Self {
        Self {
            kind: OperationKind::Delete,
            delete_mode: mode,
        }
    }
}

/// Maps a logical operation onto the wire kind the store will see.
///
/// Non-delete kinds pass through unchanged (any delete mode a caller set is
/// meaningless and ignored). A soft delete never removes a row: it becomes an
/// `UpdateMerge` and the row's deleted flag is set in place. Hard deletes
/// stay `Delete` with the row untouched. Pure and total.
pub fn encode_operation(op: Operation, entity: &mut RowEntity) -> OperationKind {
    match (op.kind, op.delete_mode) {
        (OperationKind::Delete, DeleteMode::Soft) => {
            entity.set_deleted(true);
            OperationKind::UpdateMerge
        }
        (OperationKind::Delete, _) => OperationKind::Delete,
        (kind, _) => kind,
    }
}
