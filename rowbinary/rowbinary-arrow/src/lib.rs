//! Arrow integration layer for `rowbinary`.
//!
//! This crate has two responsibilities:
//! 1. Convert column type definitions ([`ElementDef`](rowbinary_core::ElementDef))
//!    to an Arrow `Schema`.
//! 2. Convert decoded rows (`Vec<Value>` per row) into an Arrow `RecordBatch`.
//!
//! Conventions:
//! - `Date` / `Date32` become `Date32`; `DateTime('tz')` becomes
//!   `Timestamp(Second, tz)`.
//! - `UUID` becomes `FixedSizeBinary(16)` holding the canonical big-endian bytes.
//! - Tuples become `Struct`; unnamed elements are called `1`, `2`, ...
//!
//! # Typical Flow
//! ```rust
//! use std::sync::Arc;
//!
//! use rowbinary_arrow::{result_rows_to_record_batch, type_defs_to_arrow_schema};
//! use rowbinary_core::{DataTypeDef, ElementDef, Value};
//!
//! let defs = [ElementDef::new(DataTypeDef::U8, false)];
//! let schema = Arc::new(type_defs_to_arrow_schema(&["id"], &defs));
//! let rows = vec![vec![Value::U8(1)], vec![Value::U8(2)]];
//! let batch = result_rows_to_record_batch(&schema, &rows).unwrap();
//! assert_eq!(batch.num_rows(), 2);
//! ```
pub mod arrow_convert;
pub mod error;
pub mod schema_convert;

/// Re-export of [`arrow_convert::result_rows_to_record_batch`].
pub use arrow_convert::result_rows_to_record_batch;
/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-exports from [`schema_convert`].
pub use schema_convert::{element_def_to_datatype, type_defs_to_arrow_schema};
