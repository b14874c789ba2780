use std::borrow::Cow;

use arrow::datatypes::{DataType, TimeUnit};
use rowbinary_core::{Value, ValueTypeError};

pub(super) enum ScalarValue<'a> {
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Utf8(Option<Cow<'a, str>>),
    Binary(Option<Cow<'a, [u8]>>),
    FixedSizeBinary(Option<Cow<'a, [u8]>>),
    Date32(Option<i32>),
    TimestampSecond(Option<i64>),
}

/// Scalar for a leaf data type; `Ok(None)` for nested types.
pub(super) fn scalar_value_for_datatype<'a>(
    dt: &DataType,
    value: &'a Value,
) -> Result<Option<ScalarValue<'a>>, ValueTypeError> {
    Ok(Some(match dt {
        DataType::Null => ScalarValue::Null,
        DataType::Boolean => ScalarValue::Boolean(value.try_bool()?),
        DataType::Int8 => ScalarValue::Int8(value.try_i8()?),
        DataType::Int16 => ScalarValue::Int16(value.try_i16()?),
        DataType::Int32 => ScalarValue::Int32(value.try_i32()?),
        DataType::Int64 => ScalarValue::Int64(value.try_i64()?),
        DataType::UInt8 => ScalarValue::UInt8(value.try_u8()?),
        DataType::UInt16 => ScalarValue::UInt16(value.try_u16()?),
        DataType::UInt32 => ScalarValue::UInt32(value.try_u32()?),
        DataType::UInt64 => ScalarValue::UInt64(value.try_u64()?),
        DataType::Float32 => ScalarValue::Float32(value.try_f32()?),
        DataType::Float64 => ScalarValue::Float64(value.try_f64()?),
        DataType::Utf8 => ScalarValue::Utf8(text(value)?),
        DataType::Binary => ScalarValue::Binary(binary(value)?),
        DataType::FixedSizeBinary(_) => ScalarValue::FixedSizeBinary(binary(value)?),
        DataType::Date32 => ScalarValue::Date32(value.try_date()?),
        DataType::Timestamp(TimeUnit::Second, _) => {
            ScalarValue::TimestampSecond(value.try_datetime()?)
        }
        _ => return Ok(None),
    }))
}

/// `String` columns decode non-UTF-8 payloads as bytes; render them lossily.
fn text(value: &Value) -> Result<Option<Cow<'_, str>>, ValueTypeError> {
    match value {
        Value::String(s) => Ok(Some(Cow::Borrowed(&**s))),
        Value::Bytes(b) => Ok(Some(String::from_utf8_lossy(b))),
        Value::Null => Ok(None),
        other => Err(other.type_mismatch("String")),
    }
}

fn binary(value: &Value) -> Result<Option<Cow<'_, [u8]>>, ValueTypeError> {
    match value {
        Value::Bytes(b) => Ok(Some(Cow::Borrowed(&**b))),
        Value::String(s) => Ok(Some(Cow::Borrowed(s.as_bytes()))),
        Value::Uuid(u) => Ok(Some(Cow::Owned(u.to_be_bytes().to_vec()))),
        Value::Null => Ok(None),
        other => Err(other.type_mismatch("Bytes")),
    }
}
