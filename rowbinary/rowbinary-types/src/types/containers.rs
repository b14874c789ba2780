//! `Array(T)`, `Tuple(T1, ..., Tn)` and `Map(K, V)`.

use std::sync::Arc;

use rowbinary_core::{
    ColumnType, ColumnTypeRef, DataTypeDef, DecodeError, ElementDef, EncodeError, FieldDef,
    NullPolicy, Value, WireCursor, varint,
};

use crate::{
    error::ResolveError,
    registry::TypeRegistry,
    type_name::{TypeArg, TypeExpr},
};

/// Read an element count and reject it if the remaining bytes cannot hold
/// that many items of at least `min_item_len` bytes each.
fn read_count(cursor: &mut WireCursor<'_>, min_item_len: usize) -> Result<usize, DecodeError> {
    let count = cursor.read_varint()?;
    let count = usize::try_from(count).map_err(|_| cursor.truncated(usize::MAX))?;
    cursor.ensure(count.saturating_mul(min_item_len.max(1)))?;
    Ok(count)
}

/// Varint element count followed by the elements.
#[derive(Debug, Clone)]
pub struct ArrayType {
    element: ColumnTypeRef,
}

impl ArrayType {
    pub fn new(element: ColumnTypeRef) -> Self {
        Self { element }
    }
}

impl ColumnType for ArrayType {
    fn name(&self) -> String {
        format!("Array({})", self.element.name())
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Array(Box::new(self.element.type_def())), false)
    }

    fn zero_value(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError> {
        let count = read_count(cursor, self.element.min_wire_len())?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.element.decode(cursor, nulls)?);
        }
        Ok(Value::Array(items))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let Value::Array(items) = value else {
            return Err(EncodeError::unsupported(self.name(), value));
        };
        varint::write_varint(items.len() as u64, out);
        for item in items {
            self.element.encode(item, out)?;
        }
        Ok(())
    }
}

/// Elements back to back, no prefix. Element names only affect the type name.
#[derive(Debug, Clone)]
pub struct TupleType {
    elements: Vec<(Option<String>, ColumnTypeRef)>,
}

impl TupleType {
    pub fn new(elements: Vec<(Option<String>, ColumnTypeRef)>) -> Self {
        Self { elements }
    }

    pub fn arity(&self) -> usize {
        self.elements.len()
    }
}

impl ColumnType for TupleType {
    fn name(&self) -> String {
        let parts: Vec<String> = self
            .elements
            .iter()
            .map(|(name, ty)| match name {
                Some(name) => format!("{name} {}", ty.name()),
                None => ty.name(),
            })
            .collect();
        format!("Tuple({})", parts.join(", "))
    }

    fn type_def(&self) -> ElementDef {
        let fields = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, (name, ty))| FieldDef {
                name: name.clone().unwrap_or_else(|| (i + 1).to_string()),
                element: ty.type_def(),
            })
            .collect();
        ElementDef::new(DataTypeDef::Tuple(fields), false)
    }

    fn zero_value(&self) -> Value {
        Value::Tuple(self.elements.iter().map(|(_, ty)| ty.zero_value()).collect())
    }

    fn min_wire_len(&self) -> usize {
        self.elements
            .iter()
            .map(|(_, ty)| ty.min_wire_len())
            .fold(0, usize::saturating_add)
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError> {
        let mut items = Vec::with_capacity(self.elements.len());
        for (_, ty) in &self.elements {
            items.push(ty.decode(cursor, nulls)?);
        }
        Ok(Value::Tuple(items))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let Value::Tuple(items) = value else {
            return Err(EncodeError::unsupported(self.name(), value));
        };
        if items.len() != self.elements.len() {
            return Err(EncodeError::out_of_range(
                self.name(),
                format!("tuple has {} elements, expected {}", items.len(), self.elements.len()),
            ));
        }
        for ((_, ty), item) in self.elements.iter().zip(items) {
            ty.encode(item, out)?;
        }
        Ok(())
    }
}

/// Varint entry count followed by key/value pairs.
#[derive(Debug, Clone)]
pub struct MapType {
    key: ColumnTypeRef,
    value: ColumnTypeRef,
}

impl MapType {
    pub fn new(key: ColumnTypeRef, value: ColumnTypeRef) -> Self {
        Self { key, value }
    }
}

impl ColumnType for MapType {
    fn name(&self) -> String {
        format!("Map({}, {})", self.key.name(), self.value.name())
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(
            DataTypeDef::Map {
                key: Box::new(self.key.type_def()),
                value: Box::new(self.value.type_def()),
            },
            false,
        )
    }

    fn zero_value(&self) -> Value {
        Value::Map(Vec::new())
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, nulls: NullPolicy) -> Result<Value, DecodeError> {
        let entry_len = self.key.min_wire_len().saturating_add(self.value.min_wire_len());
        let count = read_count(cursor, entry_len)?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.key.decode(cursor, nulls)?;
            let value = self.value.decode(cursor, nulls)?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let Value::Map(entries) = value else {
            return Err(EncodeError::unsupported(self.name(), value));
        };
        varint::write_varint(entries.len() as u64, out);
        for (key, value) in entries {
            self.key.encode(key, out)?;
            self.value.encode(value, out)?;
        }
        Ok(())
    }
}

pub(super) fn build_array(
    expr: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    let args = expr.type_args(1)?;
    Ok(Arc::new(ArrayType::new(registry.resolve_expr(args[0])?)))
}

pub(super) fn build_tuple(
    expr: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    if expr.args.is_empty() {
        return Err(expr.invalid("Tuple needs at least one element"));
    }
    let elements = expr
        .args
        .iter()
        .map(|arg| match arg {
            TypeArg::Type(ty) => Ok((None, registry.resolve_expr(ty)?)),
            TypeArg::Named(name, ty) => Ok((Some(name.clone()), registry.resolve_expr(ty)?)),
            other => Err(expr.invalid(format!("unexpected tuple element `{other}`"))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Arc::new(TupleType::new(elements)))
}

pub(super) fn build_map(
    expr: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    let args = expr.type_args(2)?;
    let key = registry.resolve_expr(args[0])?;
    let value = registry.resolve_expr(args[1])?;
    Ok(Arc::new(MapType::new(key, value)))
}
