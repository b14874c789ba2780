//! Column type contract shared by the decoder, the encoder and the registry.

use std::{fmt, sync::Arc};

use crate::{
    cursor::WireCursor,
    error::{DecodeError, EncodeError},
    type_def::ElementDef,
    value::Value,
};

/// How a wire null marker of a `Nullable(T)` column is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Null markers decode to [`Value::Null`].
    #[default]
    Null,
    /// Null markers decode to the inner type's zero value (`0`, `""`, ...).
    Zero,
}

/// One wire type: how a single cell is laid out in a RowBinary row.
///
/// Implementations are immutable and shared between concurrent decode and
/// encode calls, usually as a [`ColumnTypeRef`] handed out by a type registry.
pub trait ColumnType: fmt::Debug + Send + Sync {
    /// Canonical type name, e.g. `Nullable(String)`.
    fn name(&self) -> String;

    /// Structural description used by schema converters.
    fn type_def(&self) -> ElementDef;

    /// Value a null marker decodes to under [`NullPolicy::Zero`].
    fn zero_value(&self) -> Value;

    /// Smallest number of bytes one cell can occupy on the wire.
    ///
    /// Used to reject element counts that cannot possibly fit in the
    /// remaining buffer and to detect zero-width rows.
    fn min_wire_len(&self) -> usize {
        1
    }

    /// Decode one cell at the cursor, advancing it past the cell.
    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError>;

    /// Append the encoding of one cell to `out`.
    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

/// Shared handle to a resolved column type.
pub type ColumnTypeRef = Arc<dyn ColumnType>;
