//! `RowBinaryWithNamesAndTypes` decoding.
//!
//! ```text
//! varint k | k × (varint len, name) | k × (varint len, type name) | row*
//! ```
//!
//! Rows have no framing of their own: decoding stops when the buffer is
//! exhausted exactly on a row boundary.

use rowbinary_core::{ColumnTypeRef, DecodeError, NullPolicy, Value, WireCursor};
use rowbinary_types::TypeRegistry;
use tracing::{debug, trace};

use crate::{error::RowBinaryError, result_set::ResultSet};

/// Column names and resolved types read from a result header.
#[derive(Debug, Clone)]
pub struct Header {
    pub names: Vec<String>,
    pub types: Vec<ColumnTypeRef>,
}

impl Header {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Streaming row decoder over one result buffer.
///
/// The header is read and every type resolved in [`RowDecoder::new`]; rows are
/// then yielded one at a time. After the first error the iterator is fused.
#[derive(Debug)]
pub struct RowDecoder<'a> {
    cursor: WireCursor<'a>,
    header: Header,
    nulls: NullPolicy,
    row: usize,
    done: bool,
}

impl<'a> RowDecoder<'a> {
    pub fn new(
        registry: &TypeRegistry,
        buffer: &'a [u8],
        nulls: NullPolicy,
    ) -> Result<Self, RowBinaryError> {
        let mut cursor = WireCursor::new(buffer);
        let header = read_header(registry, &mut cursor)?;

        // Rows that occupy no bytes would never exhaust the buffer.
        let done = header.types.iter().all(|t| t.min_wire_len() == 0);
        if done && !cursor.is_exhausted() {
            debug!(
                columns = header.len(),
                trailing = cursor.remaining(),
                "zero-width rows; ignoring trailing bytes"
            );
        }

        Ok(Self {
            cursor,
            header,
            nulls,
            row: 0,
            done,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn into_header(self) -> Header {
        self.header
    }

    /// Number of rows yielded so far.
    pub fn rows_read(&self) -> usize {
        self.row
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn decode_row(&mut self) -> Result<Vec<Value>, RowBinaryError> {
        let start = self.cursor.position();
        let mut values = Vec::with_capacity(self.header.len());
        for (name, ty) in self.header.names.iter().zip(&self.header.types) {
            let value = ty
                .decode(&mut self.cursor, self.nulls)
                .map_err(|source| RowBinaryError::Row {
                    row: self.row,
                    column: name.clone(),
                    source,
                })?;
            values.push(value);
        }
        trace!(
            row = self.row,
            bytes = self.cursor.position() - start,
            "decoded row"
        );
        self.row += 1;
        Ok(values)
    }
}

impl Iterator for RowDecoder<'_> {
    type Item = Result<Vec<Value>, RowBinaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.is_exhausted() {
            self.done = true;
            return None;
        }
        let row = self.decode_row();
        self.done = row.is_err();
        Some(row)
    }
}

impl std::iter::FusedIterator for RowDecoder<'_> {}

/// Decode a complete `RowBinaryWithNamesAndTypes` buffer.
///
/// Either every row decodes or an error is returned; there is no partial
/// result. With zero columns the result has zero rows and any bytes after the
/// header are ignored.
pub fn decode_result_set(
    registry: &TypeRegistry,
    buffer: &[u8],
    nulls: NullPolicy,
) -> Result<ResultSet, RowBinaryError> {
    let mut decoder = RowDecoder::new(registry, buffer, nulls)?;
    let rows = decoder.by_ref().collect::<Result<Vec<_>, _>>()?;
    debug!(rows = rows.len(), bytes = buffer.len(), "decoded result set");
    let Header { names, types } = decoder.into_header();
    Ok(ResultSet::from_parts(names, types, rows))
}

/// Read the column count, names and type names, resolving each type as soon
/// as it is read.
pub fn read_header(
    registry: &TypeRegistry,
    cursor: &mut WireCursor<'_>,
) -> Result<Header, RowBinaryError> {
    let count = cursor
        .read_varint()
        .map_err(|source| header_error("column count", source))?;
    let count = usize::try_from(count)
        .map_err(|_| header_error("column count", cursor.truncated(usize::MAX)))?;
    // Each name and type name needs at least its one-byte length prefix.
    cursor
        .ensure(count.saturating_mul(2))
        .map_err(|source| header_error("column count", source))?;

    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let name = read_utf8(cursor)
            .map_err(|source| header_error(format!("name of column {i}"), source))?;
        names.push(name);
    }

    let mut types = Vec::with_capacity(count);
    let mut type_names = Vec::with_capacity(count);
    for i in 0..count {
        let type_name = read_utf8(cursor)
            .map_err(|source| header_error(format!("type of column {i}"), source))?;
        let ty = registry
            .resolve(&type_name)
            .map_err(|source| RowBinaryError::UnknownType {
                column: i,
                type_name: type_name.clone(),
                source,
            })?;
        types.push(ty);
        type_names.push(type_name);
    }

    debug!(columns = count, types = ?type_names, "read RowBinary header");
    Ok(Header { names, types })
}

fn read_utf8(cursor: &mut WireCursor<'_>) -> Result<String, DecodeError> {
    let offset = cursor.position();
    let raw = cursor.read_length_prefixed_bytes()?;
    match std::str::from_utf8(raw) {
        Ok(s) => Ok(s.to_string()),
        Err(e) => Err(DecodeError::MalformedValue {
            type_name: "String".to_string(),
            offset,
            detail: e.to_string(),
        }),
    }
}

fn header_error(field: impl Into<String>, source: DecodeError) -> RowBinaryError {
    RowBinaryError::Header {
        field: field.into(),
        source,
    }
}
