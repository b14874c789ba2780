use std::sync::Arc;

use bytes::BufMut;
use rowbinary_core::{
    ColumnType, ColumnTypeRef, DataTypeDef, DecodeError, ElementDef, EncodeError, NullPolicy,
    Value, WireCursor, varint,
};

use crate::{
    error::ResolveError,
    registry::TypeRegistry,
    type_name::{TypeArg, TypeExpr},
};

/// Length-prefixed byte string.
///
/// Valid UTF-8 decodes to [`Value::String`], anything else to [`Value::Bytes`]
/// so no input is rejected or altered.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl ColumnType for StringType {
    fn name(&self) -> String {
        "String".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::String, false)
    }

    fn zero_value(&self) -> Value {
        Value::string("")
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        let raw = cursor.read_length_prefixed_bytes()?;
        Ok(match std::str::from_utf8(raw) {
            Ok(s) => Value::String(Arc::from(s)),
            Err(_) => Value::Bytes(Arc::from(raw)),
        })
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match value {
            Value::String(s) => varint::write_length_prefixed_bytes(s.as_bytes(), out),
            Value::Bytes(b) => varint::write_length_prefixed_bytes(b, out),
            other => return Err(EncodeError::unsupported("String", other)),
        }
        Ok(())
    }
}

/// Exactly `len` bytes; shorter values are zero-padded on encode.
#[derive(Debug, Clone, Copy)]
pub struct FixedStringType {
    len: usize,
}

impl FixedStringType {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn fixed_len(&self) -> usize {
        self.len
    }
}

impl ColumnType for FixedStringType {
    fn name(&self) -> String {
        format!("FixedString({})", self.len)
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::FixedBytes(self.len), false)
    }

    fn zero_value(&self) -> Value {
        Value::Bytes(Arc::from(vec![0u8; self.len]))
    }

    fn min_wire_len(&self) -> usize {
        self.len
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::Bytes(Arc::from(cursor.read_bytes(self.len)?)))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let raw: &[u8] = match value {
            Value::String(s) => s.as_bytes(),
            Value::Bytes(b) => b,
            other => return Err(EncodeError::unsupported(self.name(), other)),
        };
        if raw.len() > self.len {
            return Err(EncodeError::out_of_range(
                self.name(),
                format!("{} bytes exceed fixed length {}", raw.len(), self.len),
            ));
        }
        out.put_slice(raw);
        out.put_bytes(0, self.len - raw.len());
        Ok(())
    }
}

pub(super) fn build_fixed_string(
    expr: &TypeExpr,
    _registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    match expr.args.as_slice() {
        [TypeArg::Int(n)] if *n > 0 => {
            let len = usize::try_from(*n).map_err(|_| expr.invalid("length too large"))?;
            Ok(Arc::new(FixedStringType::new(len)))
        }
        _ => Err(expr.invalid("FixedString expects one positive length argument")),
    }
}
