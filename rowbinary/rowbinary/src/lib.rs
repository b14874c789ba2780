//! ClickHouse `RowBinaryWithNamesAndTypes` decoder and `RowBinary` encoder.
//!
//! Column types are resolved by name through a
//! [`TypeRegistry`](rowbinary_types::TypeRegistry), so any type registered
//! there (built-in or custom) can be decoded and encoded.
//!
//! ```rust
//! use rowbinary::{RowBinaryCodec, core::Value};
//!
//! let codec = RowBinaryCodec::new();
//! let buffer = [
//!     2, 2, b'i', b'd', 4, b'n', b'a', b'm', b'e',
//!     5, b'U', b'I', b'n', b't', b'8', 6, b'S', b't', b'r', b'i', b'n', b'g',
//!     1, 1, b'a',
//! ];
//! let result = codec.decode(&buffer).unwrap();
//! assert_eq!(result.column_names(), ["id", "name"]);
//! assert_eq!(result.rows(), [vec![Value::U8(1), Value::string("a")]]);
//! ```

mod codec;
mod decoder;
mod encoder;
mod error;
mod result_set;

pub use codec::{RowBinaryCodec, RowBinaryCodecBuilder};
pub use decoder::{Header, RowDecoder, decode_result_set, read_header};
pub use encoder::{InsertColumns, encode_result_set, encode_rows, resolve_columns, write_header};
pub use error::RowBinaryError;
pub use result_set::ResultSet;
pub use rowbinary_core::NullPolicy;

#[cfg(feature = "arrow")]
pub use rowbinary_arrow as arrow;
pub use rowbinary_core as core;
pub use rowbinary_types as types;
