use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, FixedSizeBinaryBuilder,
        Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
        ListBuilder, MapBuilder, NullBuilder, StringBuilder, StructBuilder,
        TimestampSecondBuilder, UInt8Builder, UInt16Builder, UInt32Builder, UInt64Builder,
    },
    datatypes::{DataType, Fields},
};
use rowbinary_core::Value;

use super::{
    builder::entry_fields,
    scalar::{ScalarValue, scalar_value_for_datatype},
};
use crate::error::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty, $dt:expr) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .ok_or_else(|| ArrowConvertError::UnsupportedDataType($dt.clone()))?
    };
}

fn append_scalar_dyn(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    scalar: ScalarValue<'_>,
) -> Result<(), ArrowConvertError> {
    match scalar {
        ScalarValue::Null => cast_builder!(builder, NullBuilder, dt).append_null(),
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder, dt).append_option(v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder, dt).append_option(v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder, dt).append_option(v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder, dt).append_option(v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder, dt).append_option(v),
        ScalarValue::UInt8(v) => cast_builder!(builder, UInt8Builder, dt).append_option(v),
        ScalarValue::UInt16(v) => cast_builder!(builder, UInt16Builder, dt).append_option(v),
        ScalarValue::UInt32(v) => cast_builder!(builder, UInt32Builder, dt).append_option(v),
        ScalarValue::UInt64(v) => cast_builder!(builder, UInt64Builder, dt).append_option(v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder, dt).append_option(v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder, dt).append_option(v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder, dt).append_option(v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder, dt).append_option(v),
        ScalarValue::FixedSizeBinary(v) => {
            let b = cast_builder!(builder, FixedSizeBinaryBuilder, dt);
            match v {
                Some(bytes) => b.append_value(bytes)?,
                None => b.append_null(),
            }
        }
        ScalarValue::Date32(v) => cast_builder!(builder, Date32Builder, dt).append_option(v),
        ScalarValue::TimestampSecond(v) => {
            cast_builder!(builder, TimestampSecondBuilder, dt).append_option(v)
        }
    }
    Ok(())
}

fn append_list_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    elem_dt: &DataType,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    match value {
        Value::Array(items) => {
            for item in items {
                append_value_to_builder(child_builder, elem_dt, item)?;
            }
            Ok(true)
        }
        Value::Null => Ok(false),
        _ => Err(value.type_mismatch("Array").into()),
    }
}

fn append_map_entries(
    map_builder: &mut MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>,
    fields: &Fields,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    match value {
        Value::Map(entries) => {
            for (key, map_value) in entries {
                append_value_to_builder(map_builder.keys(), fields[0].data_type(), key)?;
                append_value_to_builder(map_builder.values(), fields[1].data_type(), map_value)?;
            }
            Ok(true)
        }
        Value::Null => Ok(false),
        _ => Err(value.type_mismatch("Map").into()),
    }
}

pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    if let Some(scalar) = scalar_value_for_datatype(dt, value)? {
        return append_scalar_dyn(builder, dt, scalar);
    }

    match dt {
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>, dt);
            let valid = append_list_elements(b.values(), field.data_type(), value)?;
            b.append(valid);
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder, dt);
            match value {
                Value::Tuple(children) => {
                    for (i, field) in fields.iter().enumerate() {
                        let child_value = children.get(i).unwrap_or(&Value::Null);
                        append_value_to_struct_field(b, i, field.data_type(), child_value)?;
                    }
                    b.append(true);
                }
                Value::Null => {
                    for (i, field) in fields.iter().enumerate() {
                        append_value_to_struct_field(b, i, field.data_type(), &Value::Null)?;
                    }
                    b.append(false);
                }
                _ => return Err(value.type_mismatch("Tuple").into()),
            }
        }
        DataType::Map(entry_field, _) => {
            let fields = entry_fields(entry_field)?;
            let b = cast_builder!(
                builder,
                MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>,
                dt
            );
            let valid = append_map_entries(b, fields, value)?;
            b.append(valid)?;
        }
        other => return Err(ArrowConvertError::UnsupportedDataType(other.clone())),
    }
    Ok(())
}

fn append_value_to_struct_field(
    sb: &mut StructBuilder,
    index: usize,
    dt: &DataType,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    append_value_to_builder(&mut sb.field_builders_mut()[index], dt, value)
}
