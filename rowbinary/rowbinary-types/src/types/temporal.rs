use std::sync::Arc;

use bytes::BufMut;
use rowbinary_core::{
    ColumnType, ColumnTypeRef, DataTypeDef, DecodeError, ElementDef, EncodeError, NullPolicy,
    Value, WireCursor,
};

use crate::{
    error::ResolveError,
    registry::TypeRegistry,
    type_name::{TypeArg, TypeExpr},
};

/// Days since epoch as `UInt16`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

/// Days since epoch as `Int32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date32Type;

/// Seconds since epoch as `UInt32`, with an optional display time zone.
#[derive(Debug, Clone, Default)]
pub struct DateTimeType {
    timezone: Option<String>,
}

impl DateTimeType {
    pub fn new(timezone: Option<String>) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }
}

fn date_days(type_name: &str, value: &Value) -> Result<i128, EncodeError> {
    match value {
        Value::Date(d) => Ok(i128::from(*d)),
        other => other
            .as_integer()
            .ok_or_else(|| EncodeError::unsupported(type_name, other)),
    }
}

impl ColumnType for DateType {
    fn name(&self) -> String {
        "Date".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Date, false)
    }

    fn zero_value(&self) -> Value {
        Value::Date(0)
    }

    fn min_wire_len(&self) -> usize {
        2
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::Date(i32::from(cursor.read_u16_le()?)))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let days = date_days("Date", value)?;
        let days = u16::try_from(days).map_err(|_| {
            EncodeError::out_of_range("Date", format!("{days} days is outside 1970-01-01..2149-06-06"))
        })?;
        out.put_u16_le(days);
        Ok(())
    }
}

impl ColumnType for Date32Type {
    fn name(&self) -> String {
        "Date32".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Date, false)
    }

    fn zero_value(&self) -> Value {
        Value::Date(0)
    }

    fn min_wire_len(&self) -> usize {
        4
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::Date(cursor.read_i32_le()?))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let days = date_days("Date32", value)?;
        let days = i32::try_from(days)
            .map_err(|_| EncodeError::out_of_range("Date32", format!("{days} days does not fit")))?;
        out.put_i32_le(days);
        Ok(())
    }
}

impl ColumnType for DateTimeType {
    fn name(&self) -> String {
        match &self.timezone {
            Some(tz) => format!("DateTime({})", TypeArg::Str(tz.clone())),
            None => "DateTime".to_string(),
        }
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::DateTime(self.timezone.clone()), false)
    }

    fn zero_value(&self) -> Value {
        Value::DateTime(0)
    }

    fn min_wire_len(&self) -> usize {
        4
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::DateTime(i64::from(cursor.read_u32_le()?)))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let seconds = match value {
            Value::DateTime(s) => i128::from(*s),
            other => other
                .as_integer()
                .ok_or_else(|| EncodeError::unsupported(self.name(), other))?,
        };
        let seconds = u32::try_from(seconds).map_err(|_| {
            EncodeError::out_of_range(self.name(), format!("{seconds} seconds does not fit UInt32"))
        })?;
        out.put_u32_le(seconds);
        Ok(())
    }
}

pub(super) fn build_datetime(
    expr: &TypeExpr,
    _registry: &TypeRegistry,
) -> Result<ColumnTypeRef, ResolveError> {
    match expr.args.as_slice() {
        [] => Ok(Arc::new(DateTimeType::new(None))),
        [TypeArg::Str(tz)] => Ok(Arc::new(DateTimeType::new(Some(tz.clone())))),
        _ => Err(expr.invalid("DateTime expects an optional time zone string")),
    }
}
