//! Error types for the wire layer.

use crate::value::Value;

/// Error returned while reading values out of a [`WireCursor`](crate::WireCursor).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ended before a field or cell was complete.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A varint ran past 10 bytes or overflowed 64 bits.
    #[error("varint at offset {offset} overflows u64")]
    VarintOverflow { offset: usize },

    /// Bytes were present but do not form a valid value of the column type.
    #[error("malformed {type_name} value at offset {offset}: {detail}")]
    MalformedValue {
        type_name: String,
        offset: usize,
        detail: String,
    },
}

impl DecodeError {
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::TruncatedInput { .. })
    }
}

/// Error returned by [`ColumnType::encode`](crate::ColumnType::encode).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The value's variant cannot be represented by the column type at all.
    #[error("{type_name} cannot encode a {found} value")]
    UnsupportedValue {
        type_name: String,
        found: &'static str,
    },

    /// The variant fits but the value does not (integer range, fixed length, arity).
    #[error("value out of range for {type_name}: {detail}")]
    OutOfRange { type_name: String, detail: String },
}

impl EncodeError {
    pub fn unsupported(type_name: impl Into<String>, value: &Value) -> Self {
        Self::UnsupportedValue {
            type_name: type_name.into(),
            found: value.kind_name(),
        }
    }

    pub fn out_of_range(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::OutOfRange {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }
}

/// Typed accessor on [`Value`] was called on the wrong variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueTypeError {
    pub expected: String,
    pub found: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
