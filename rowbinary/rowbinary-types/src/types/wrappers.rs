//! `Nullable`, `LowCardinality` and the zero-width `Nothing` type.

use std::sync::Arc;

use bytes::BufMut;
use rowbinary_core::{
    ColumnType, ColumnTypeRef, DataTypeDef, DecodeError, ElementDef, EncodeError, NullPolicy,
    Value, WireCursor,
};

use crate::{error::ResolveError, registry::TypeRegistry, type_name::TypeExpr};

/// Marker byte preceding every `Nullable(T)` cell.
const NOT_NULL: u8 = 0;
const NULL: u8 = 1;

/// Type of a bare `NULL` literal; occupies no bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingType;

impl ColumnType for NothingType {
    fn name(&self) -> String {
        "Nothing".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Nothing, true)
    }

    fn zero_value(&self) -> Value {
        Value::Null
    }

    fn min_wire_len(&self) -> usize {
        0
    }

    fn decode(&self, _cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::Null)
    }

    fn encode(&self, value: &Value, _out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if value.is_null() {
            return Ok(());
        }
        Err(EncodeError::unsupported("Nothing", value))
    }
}

/// One marker byte (`0` = value follows, anything else = null) then the inner cell.
#[derive(Debug, Clone)]
pub struct NullableType {
    inner: ColumnTypeRef,
}

impl NullableType {
    pub fn new(inner: ColumnTypeRef) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &ColumnTypeRef {
        &self.inner
    }
}

impl ColumnType for NullableType {
    fn name(&self) -> String {
        format!("Nullable({})", self.inner.name())
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(self.inner.type_def().data_type, true)
    }

    fn zero_value(&self) -> Value {
        self.inner.zero_value()
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError> {
        if cursor.read_u8()? == NOT_NULL {
            return self.inner.decode(cursor, nulls);
        }
        Ok(match nulls {
            NullPolicy::Null => Value::Null,
            NullPolicy::Zero => self.inner.zero_value(),
        })
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if value.is_null() {
            out.put_u8(NULL);
            return Ok(());
        }
        out.put_u8(NOT_NULL);
        self.inner.encode(value, out)
    }
}

/// Dictionary-encoded in the native format; RowBinary cells are identical to `T`.
#[derive(Debug, Clone)]
pub struct LowCardinalityType {
    inner: ColumnTypeRef,
}

impl LowCardinalityType {
    pub fn new(inner: ColumnTypeRef) -> Self {
        Self { inner }
    }
}

impl ColumnType for LowCardinalityType {
    fn name(&self) -> String {
        format!("LowCardinality({})", self.inner.name())
    }

    fn type_def(&self) -> ElementDef {
        self.inner.type_def()
    }

    fn zero_value(&self) -> Value {
        self.inner.zero_value()
    }

    fn min_wire_len(&self) -> usize {
        self.inner.min_wire_len()
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError> {
        self.inner.decode(cursor, nulls)
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.inner.encode(value, out)
    }
}

pub(super) fn build_nullable(
    expr: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    let args = expr.type_args(1)?;
    let inner = registry.resolve_expr(args[0])?;
    let def = inner.type_def();
    if def.nullable && def.data_type != DataTypeDef::Nothing {
        return Err(expr.invalid(format!("{} is already nullable", inner.name())));
    }
    if !def.data_type.is_primitive() {
        return Err(expr.invalid(format!("{} cannot be inside Nullable", inner.name())));
    }
    Ok(Arc::new(NullableType::new(inner)))
}

pub(super) fn build_low_cardinality(
    expr: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    let args = expr.type_args(1)?;
    let inner = registry.resolve_expr(args[0])?;
    Ok(Arc::new(LowCardinalityType::new(inner)))
}
