use arrow::{datatypes::DataType, error::ArrowError};
use rowbinary_core::ValueTypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),
    #[error("row {row} has {actual} values, schema has {expected} fields")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported Arrow data type: {0}")]
    UnsupportedDataType(DataType),
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
