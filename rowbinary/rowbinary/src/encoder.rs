//! `RowBinary` insert payload encoding.

use rowbinary_core::{ColumnTypeRef, Value, varint};
use rowbinary_types::TypeRegistry;
use tracing::debug;

use crate::{
    error::RowBinaryError,
    result_set::{ResultSet, check_shape},
};

/// Column types for an insert payload, either already resolved or as type names.
#[derive(Debug, Clone, Copy)]
pub enum InsertColumns<'a> {
    Types(&'a [ColumnTypeRef]),
    Names(&'a [&'a str]),
}

impl<'a> From<&'a [ColumnTypeRef]> for InsertColumns<'a> {
    fn from(types: &'a [ColumnTypeRef]) -> Self {
        InsertColumns::Types(types)
    }
}

impl<'a> From<&'a [&'a str]> for InsertColumns<'a> {
    fn from(names: &'a [&'a str]) -> Self {
        InsertColumns::Names(names)
    }
}

/// Resolve type names in column order.
pub fn resolve_columns<S: AsRef<str>>(
    registry: &TypeRegistry,
    type_names: &[S],
) -> Result<Vec<ColumnTypeRef>, RowBinaryError> {
    type_names
        .iter()
        .enumerate()
        .map(|(column, name)| {
            let name = name.as_ref();
            registry
                .resolve(name)
                .map_err(|source| RowBinaryError::UnknownType {
                    column,
                    type_name: name.to_string(),
                    source,
                })
        })
        .collect()
}

/// Encode rows as a headerless `RowBinary` payload.
///
/// Every row is shape-checked before any cell is written, and any failure
/// returns an error instead of a partial payload.
pub fn encode_rows(
    registry: &TypeRegistry,
    rows: &[Vec<Value>],
    columns: InsertColumns<'_>,
) -> Result<Vec<u8>, RowBinaryError> {
    let mut out = Vec::new();
    match columns {
        InsertColumns::Types(types) => write_rows(types, rows, &mut out)?,
        InsertColumns::Names(names) => {
            let types = resolve_columns(registry, names)?;
            write_rows(&types, rows, &mut out)?;
        }
    }
    debug!(rows = rows.len(), bytes = out.len(), "encoded RowBinary payload");
    Ok(out)
}

/// Encode a full `RowBinaryWithNamesAndTypes` buffer: header followed by rows.
///
/// Decoding the output with the same registry yields an equal result set.
pub fn encode_result_set(result_set: &ResultSet) -> Result<Vec<u8>, RowBinaryError> {
    let mut out = Vec::new();
    write_header(
        result_set.column_names(),
        result_set.column_types(),
        &mut out,
    );
    write_rows(result_set.column_types(), result_set.rows(), &mut out)?;
    debug!(
        rows = result_set.num_rows(),
        bytes = out.len(),
        "encoded RowBinaryWithNamesAndTypes buffer"
    );
    Ok(out)
}

/// Append the column count, names and canonical type names.
pub fn write_header(names: &[String], types: &[ColumnTypeRef], out: &mut Vec<u8>) {
    varint::write_varint(names.len() as u64, out);
    for name in names {
        varint::write_length_prefixed_bytes(name.as_bytes(), out);
    }
    for ty in types {
        varint::write_length_prefixed_bytes(ty.name().as_bytes(), out);
    }
}

/// Shape-check, then append every row. On error `out` is restored to its
/// original length.
fn write_rows(
    types: &[ColumnTypeRef],
    rows: &[Vec<Value>],
    out: &mut Vec<u8>,
) -> Result<(), RowBinaryError> {
    check_shape(types.len(), rows)?;
    let start = out.len();
    for (row, values) in rows.iter().enumerate() {
        for (column, (ty, value)) in types.iter().zip(values).enumerate() {
            if let Err(source) = ty.encode(value, out) {
                out.truncate(start);
                return Err(RowBinaryError::UnsupportedValue {
                    row,
                    column,
                    source,
                });
            }
        }
    }
    Ok(())
}
