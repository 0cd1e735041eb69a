//! Object ↔ row mapping seam.
//!
//! The engine itself only moves [`RowEntity`] values. Typed call sites plug
//! in through these traits; a failed encode aborts the whole call before any
//! batch is submitted, and decode runs only over the failed-entity list on
//! the way back out.

use crate::entity::RowEntity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowEncodeError {
    #[error("missing field '{field}'")]
    MissingField { field: String },
    #[error("field '{field}' not representable: {reason}")]
    Unrepresentable { field: String, reason: String },
    #[error("{message}")]
    Custom { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDecodeError {
    #[error("missing column '{column}'")]
    MissingColumn { column: String },
    #[error("column '{column}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{message}")]
    Custom { message: String },
}

pub trait TryIntoRow {
    fn try_into_row(&self) -> Result<RowEntity, RowEncodeError>;
}

pub trait TryFromRow: Sized {
    fn try_from_row(row: RowEntity) -> Result<Self, RowDecodeError>;
}

impl TryIntoRow for RowEntity {
    fn try_into_row(&self) -> Result<RowEntity, RowEncodeError> {
        Ok(self.clone())
    }
}

impl TryFromRow for RowEntity {
    fn try_from_row(row: RowEntity) -> Result<Self, RowDecodeError> {
        Ok(row)
    }
}
