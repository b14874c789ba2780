//! Conversion from decoded result rows to Arrow `RecordBatch`.

mod append;
mod builder;
mod scalar;

use arrow::{
    array::ArrayRef,
    datatypes::{DataType, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use rowbinary_core::Value;

use crate::error::ArrowConvertError;

/// Convert decoded rows to a RecordBatch.
///
/// Each row must hold one value per field of `schema`, in field order.
/// Empty `rows` produce an empty batch.
///
/// # Errors
/// - [`ArrowConvertError::RowWidth`] if a row's length differs from the field count.
/// - [`ArrowConvertError::ValueType`] if a value does not match its field's data type.
/// - [`ArrowConvertError::UnsupportedDataType`] for data types the converter cannot build.
/// - [`ArrowConvertError::Arrow`] if Arrow rejects the arrays, e.g. a null in a
///   non-nullable field.
pub fn result_rows_to_record_batch(
    schema: &SchemaRef,
    rows: &[Vec<Value>],
) -> Result<RecordBatch, ArrowConvertError> {
    let fields = schema.fields();
    if let Some((row, values)) = rows
        .iter()
        .enumerate()
        .find(|(_, values)| values.len() != fields.len())
    {
        return Err(ArrowConvertError::RowWidth {
            row,
            expected: fields.len(),
            actual: values.len(),
        });
    }

    let arrays = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let values = rows.iter().map(|row| &row[i]);
            build_array_from_values(field.data_type(), values, rows.len())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    Ok(RecordBatch::try_new_with_options(
        schema.clone(),
        arrays,
        &options,
    )?)
}

fn build_array_from_values<'a>(
    dt: &DataType,
    values: impl Iterator<Item = &'a Value>,
    len: usize,
) -> Result<ArrayRef, ArrowConvertError> {
    let capacity = match dt {
        DataType::List(_) | DataType::Map(_, _) => len.saturating_mul(4),
        _ => len,
    };
    let mut builder = builder::make_builder(dt, capacity)?;
    for value in values {
        append::append_value_to_builder(&mut builder, dt, value)?;
    }
    Ok(builder.finish())
}
