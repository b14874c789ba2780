use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use rowbinary_core::{DataTypeDef, ElementDef, FieldDef};

// ---------------------------------------------------------------------------
// Convert column type definitions to an Arrow schema
// ---------------------------------------------------------------------------

/// Converts result columns (names plus type definitions) into an Arrow `Schema`.
///
/// `names` and `defs` are paired by position; extra entries on either side
/// are ignored.
pub fn type_defs_to_arrow_schema<S: AsRef<str>>(names: &[S], defs: &[ElementDef]) -> Schema {
    let arrow_fields: Vec<Field> = names
        .iter()
        .zip(defs)
        .map(|(name, def)| element_def_to_arrow_field(name.as_ref(), def))
        .collect();
    Schema::new(arrow_fields)
}

fn element_def_to_arrow_field(name: &str, elem: &ElementDef) -> Field {
    Field::new(name, element_def_to_datatype(elem), elem.nullable)
}

fn field_def_to_arrow_field(f: &FieldDef) -> Field {
    element_def_to_arrow_field(&f.name, &f.element)
}

/// Arrow data type for one column or nested element.
pub fn element_def_to_datatype(elem: &ElementDef) -> DataType {
    match &elem.data_type {
        DataTypeDef::Nothing => DataType::Null,
        DataTypeDef::Bool => DataType::Boolean,
        DataTypeDef::I8 => DataType::Int8,
        DataTypeDef::I16 => DataType::Int16,
        DataTypeDef::I32 => DataType::Int32,
        DataTypeDef::I64 => DataType::Int64,
        DataTypeDef::U8 => DataType::UInt8,
        DataTypeDef::U16 => DataType::UInt16,
        DataTypeDef::U32 => DataType::UInt32,
        DataTypeDef::U64 => DataType::UInt64,
        DataTypeDef::F32 => DataType::Float32,
        DataTypeDef::F64 => DataType::Float64,
        DataTypeDef::String => DataType::Utf8,
        DataTypeDef::FixedBytes(len) => {
            i32::try_from(*len).map_or(DataType::Binary, DataType::FixedSizeBinary)
        }
        DataTypeDef::Uuid => DataType::FixedSizeBinary(16),
        DataTypeDef::Date => DataType::Date32,
        DataTypeDef::DateTime(tz) => {
            DataType::Timestamp(TimeUnit::Second, tz.as_deref().map(Arc::from))
        }
        DataTypeDef::Array(elem) => {
            let child_dt = element_def_to_datatype(elem);
            DataType::List(Arc::new(Field::new("item", child_dt, elem.nullable)))
        }
        DataTypeDef::Tuple(fields) => {
            let arrow_fields: Vec<Field> = fields.iter().map(field_def_to_arrow_field).collect();
            DataType::Struct(arrow_fields.into())
        }
        DataTypeDef::Map { key, value } => {
            let key_field = Field::new("key", element_def_to_datatype(key), false);
            let val_field = Field::new("value", element_def_to_datatype(value), value.nullable);
            let entry_struct = DataType::Struct(vec![key_field, val_field].into());
            let entry_field = Field::new("entries", entry_struct, false);
            DataType::Map(Arc::new(entry_field), false)
        }
    }
}
