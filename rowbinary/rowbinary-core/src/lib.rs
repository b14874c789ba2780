//! Wire-level building blocks shared by the RowBinary codec crates.
//!
//! This crate provides the dynamic cell [`Value`], the structural type
//! description ([`DataTypeDef`] / [`ElementDef`]), the [`WireCursor`] used to
//! read a buffer front to back, the LEB128 [`varint`] codec and the
//! [`ColumnType`] trait every wire type implements.

mod column_type;
mod cursor;
mod error;
mod type_def;
mod value;
pub mod varint;

pub use column_type::{ColumnType, ColumnTypeRef, NullPolicy};
pub use cursor::WireCursor;
pub use error::{DecodeError, EncodeError, ValueTypeError};
pub use type_def::{DataTypeDef, ElementDef, FieldDef};
pub use value::Value;
