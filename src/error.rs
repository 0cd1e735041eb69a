use crate::mapping::{RowDecodeError, RowEncodeError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorCode {
    Validation,
    Encode,
    Decode,
    Store,
}

impl SinkErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            SinkErrorCode::Validation => "validation",
            SinkErrorCode::Encode => "encode",
            SinkErrorCode::Decode => "decode",
            SinkErrorCode::Store => "store",
        }
    }
}

/// Failures the engine surfaces as `Err`.
///
/// Partial write failures are never errors: they are reported through
/// `TransactionResult::failed` / `failed_entities` / `messages`. An `Err`
/// here means the call could not run at all (bad argument, a row that could
/// not be encoded before submission) or a store-side read/lifecycle call
/// failed outright.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("row encode error: {0}")]
    Encode(#[from] RowEncodeError),
    #[error("row decode error: {0}")]
    Decode(#[from] RowDecodeError),
    #[error("store error: {message}")]
    Store { message: String },
}

impl SinkError {
    pub fn store(message: impl Into<String>) -> Self {
        SinkError::Store {
            message: message.into(),
        }
    }

    pub fn code(&self) -> SinkErrorCode {
        match self {
            SinkError::Validation(_) => SinkErrorCode::Validation,
            SinkError::Encode(_) => SinkErrorCode::Encode,
            SinkError::Decode(_) => SinkErrorCode::Decode,
            SinkError::Store { .. } => SinkErrorCode::Store,
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{SinkError, SinkErrorCode};
    use crate::mapping::RowDecodeError;

    #[test]
    fn error_code_strings_are_stable() {
        assert_eq!(SinkErrorCode::Validation.as_str(), "validation");
        assert_eq!(SinkErrorCode::Encode.as_str(), "encode");
        assert_eq!(SinkErrorCode::Decode.as_str(), "decode");
        assert_eq!(SinkErrorCode::Store.as_str(), "store");
    }

    #[test]
    fn error_code_str_matches_variant_mapping() {
        let err = SinkError::Validation("partition key must not be empty".into());
        assert_eq!(err.code(), SinkErrorCode::Validation);
        assert_eq!(err.code_str(), "validation");

        let err = SinkError::from(RowDecodeError::MissingColumn {
            column: "balance".into(),
        });
        assert_eq!(err.code(), SinkErrorCode::Decode);
    }
}
