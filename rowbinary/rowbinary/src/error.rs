//! Error types for the RowBinary codec.

use rowbinary_core::{DecodeError, EncodeError};
use rowbinary_types::ResolveError;

/// Errors produced by [`decode_result_set`](crate::decode_result_set),
/// [`encode_rows`](crate::encode_rows) and [`RowBinaryCodec`](crate::RowBinaryCodec).
#[derive(Debug, thiserror::Error)]
pub enum RowBinaryError {
    /// A column's type name is not registered or could not be parsed.
    #[error("cannot resolve type '{type_name}' of column {column}: {source}")]
    UnknownType {
        column: usize,
        type_name: String,
        #[source]
        source: ResolveError,
    },

    /// The header (column count, names or type names) could not be read.
    #[error("failed to read {field}: {source}")]
    Header {
        field: String,
        #[source]
        source: DecodeError,
    },

    /// A cell could not be decoded; the whole result is discarded.
    #[error("row {row}, column '{column}': {source}")]
    Row {
        row: usize,
        column: String,
        #[source]
        source: DecodeError,
    },

    /// A row to encode does not have one value per column.
    #[error("row {row} has {actual} values, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A value cannot be encoded by its column's type.
    #[error("row {row}, column {column}: {source}")]
    UnsupportedValue {
        row: usize,
        column: usize,
        #[source]
        source: EncodeError,
    },

    /// Rows could not be converted to an Arrow `RecordBatch`.
    #[cfg(feature = "arrow")]
    #[error(transparent)]
    Arrow(#[from] rowbinary_arrow::ArrowConvertError),

    /// An error returned by the user-supplied callback in
    /// [`RowBinaryCodec::for_each_record_batch`](crate::RowBinaryCodec::for_each_record_batch).
    #[error(transparent)]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}

impl RowBinaryError {
    /// Underlying wire error for header and row failures.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            RowBinaryError::Header { source, .. } | RowBinaryError::Row { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// `true` if the input ended in the middle of the header or a row.
    pub fn is_truncated(&self) -> bool {
        self.decode_error().is_some_and(DecodeError::is_truncated)
    }
}
