use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, FixedSizeBinaryBuilder,
        Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
        ListBuilder, MapBuilder, MapFieldNames, NullBuilder, StringBuilder, StructBuilder,
        TimestampSecondBuilder, UInt8Builder, UInt16Builder, UInt32Builder, UInt64Builder,
    },
    datatypes::{DataType, Field, Fields, TimeUnit},
};

use crate::error::ArrowConvertError;

pub(super) fn make_builder(
    dt: &DataType,
    capacity: usize,
) -> Result<Box<dyn ArrayBuilder>, ArrowConvertError> {
    let builder: Box<dyn ArrayBuilder> = match dt {
        DataType::Null => Box::new(NullBuilder::new()),
        DataType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        DataType::Int8 => Box::new(Int8Builder::with_capacity(capacity)),
        DataType::Int16 => Box::new(Int16Builder::with_capacity(capacity)),
        DataType::Int32 => Box::new(Int32Builder::with_capacity(capacity)),
        DataType::Int64 => Box::new(Int64Builder::with_capacity(capacity)),
        DataType::UInt8 => Box::new(UInt8Builder::with_capacity(capacity)),
        DataType::UInt16 => Box::new(UInt16Builder::with_capacity(capacity)),
        DataType::UInt32 => Box::new(UInt32Builder::with_capacity(capacity)),
        DataType::UInt64 => Box::new(UInt64Builder::with_capacity(capacity)),
        DataType::Float32 => Box::new(Float32Builder::with_capacity(capacity)),
        DataType::Float64 => Box::new(Float64Builder::with_capacity(capacity)),
        DataType::Utf8 => Box::new(StringBuilder::with_capacity(capacity, 64)),
        DataType::Binary => Box::new(BinaryBuilder::with_capacity(capacity, 64)),
        DataType::FixedSizeBinary(len) => {
            Box::new(FixedSizeBinaryBuilder::with_capacity(capacity, *len))
        }
        DataType::Date32 => Box::new(Date32Builder::with_capacity(capacity)),
        DataType::Timestamp(TimeUnit::Second, _) => {
            Box::new(TimestampSecondBuilder::with_capacity(capacity).with_data_type(dt.clone()))
        }
        DataType::List(field) => {
            let child = make_builder(field.data_type(), capacity)?;
            Box::new(ListBuilder::new(child).with_field(field.clone()))
        }
        DataType::Struct(fields) => {
            let child_builders = fields
                .iter()
                .map(|f| make_builder(f.data_type(), capacity))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(StructBuilder::new(fields.clone(), child_builders))
        }
        DataType::Map(entry_field, _) => {
            let fields = entry_fields(entry_field)?;
            let (key_field, value_field) = (&fields[0], &fields[1]);
            let key_builder = make_builder(key_field.data_type(), capacity)?;
            let value_builder = make_builder(value_field.data_type(), capacity)?;
            Box::new(
                MapBuilder::new(
                    Some(MapFieldNames {
                        entry: entry_field.name().to_string(),
                        key: key_field.name().to_string(),
                        value: value_field.name().to_string(),
                    }),
                    key_builder,
                    value_builder,
                )
                .with_keys_field(key_field.clone())
                .with_values_field(value_field.clone()),
            )
        }
        other => return Err(ArrowConvertError::UnsupportedDataType(other.clone())),
    };
    Ok(builder)
}

/// Key and value fields of a `Map` entry struct.
pub(super) fn entry_fields(entry_field: &Field) -> Result<&Fields, ArrowConvertError> {
    match entry_field.data_type() {
        DataType::Struct(fields) if fields.len() == 2 => Ok(fields),
        other => Err(ArrowConvertError::UnsupportedDataType(other.clone())),
    }
}
