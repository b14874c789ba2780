use std::sync::Arc;

use arrow::{
    array::{
        Array, BooleanArray, Date32Array, FixedSizeBinaryArray, Int32Array, ListArray, MapArray,
        NullArray, StringArray, StructArray, TimestampSecondArray, UInt8Array,
    },
    datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit},
};
use rowbinary_arrow::{ArrowConvertError, result_rows_to_record_batch};
use rowbinary_core::Value;

fn test_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt8, false),
        Field::new("name", DataType::Utf8, true),
        Field::new(
            "list_i32",
            DataType::List(Arc::new(Field::new("item", DataType::Int32, true))),
            false,
        ),
        Field::new(
            "map_str_i32",
            DataType::Map(
                Arc::new(Field::new(
                    "entries",
                    DataType::Struct(
                        vec![
                            Field::new("key", DataType::Utf8, false),
                            Field::new("value", DataType::Int32, true),
                        ]
                        .into(),
                    ),
                    false,
                )),
                false,
            ),
            false,
        ),
        Field::new(
            "tuple",
            DataType::Struct(
                vec![
                    Field::new("a", DataType::Int32, false),
                    Field::new("b", DataType::Utf8, true),
                ]
                .into(),
            ),
            false,
        ),
    ]))
}

#[test]
fn result_rows_to_record_batch_mixed_types() {
    let schema = test_schema();
    let rows = vec![
        vec![
            Value::U8(1),
            Value::string("a"),
            Value::Array(vec![Value::I32(1), Value::Null]),
            Value::Map(vec![
                (Value::string("k1"), Value::I32(11)),
                (Value::string("k2"), Value::I32(22)),
            ]),
            Value::Tuple(vec![Value::I32(7), Value::string("ok")]),
        ],
        vec![
            Value::U8(2),
            Value::Null,
            Value::Array(vec![]),
            Value::Map(vec![]),
            Value::Tuple(vec![Value::I32(8), Value::Null]),
        ],
    ];

    let batch = result_rows_to_record_batch(&schema, &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 5);

    let ids = batch
        .column(0)
        .as_any()
        .downcast_ref::<UInt8Array>()
        .unwrap();
    assert_eq!(ids.value(1), 2);

    let names = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(names.value(0), "a");
    assert!(names.is_null(1));

    let list = batch
        .column(2)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(list.value_offsets(), &[0, 2, 2]);
    let items = list.values().as_any().downcast_ref::<Int32Array>().unwrap();
    assert_eq!(items.value(0), 1);
    assert!(items.is_null(1));

    let map = batch.column(3).as_any().downcast_ref::<MapArray>().unwrap();
    assert_eq!(map.value_offsets(), &[0, 2, 2]);

    let tuple = batch
        .column(4)
        .as_any()
        .downcast_ref::<StructArray>()
        .unwrap();
    let a = tuple
        .column(0)
        .as_any()
        .downcast_ref::<Int32Array>()
        .unwrap();
    let b = tuple
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!((a.value(0), a.value(1)), (7, 8));
    assert_eq!(b.value(0), "ok");
    assert!(b.is_null(1));
}

#[test]
fn temporal_uuid_and_bytes() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("d", DataType::Date32, false),
        Field::new(
            "ts",
            DataType::Timestamp(TimeUnit::Second, Some("UTC".into())),
            false,
        ),
        Field::new("uuid", DataType::FixedSizeBinary(16), false),
        Field::new("fixed", DataType::FixedSizeBinary(2), true),
        Field::new("raw", DataType::Utf8, false),
        Field::new("flag", DataType::Boolean, false),
        Field::new("nothing", DataType::Null, true),
    ]));
    let uuid = 0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10u128;
    let rows = vec![vec![
        Value::Date(19_000),
        Value::DateTime(1_700_000_000),
        Value::Uuid(uuid),
        Value::bytes(b"ab"),
        Value::bytes([0x61u8, 0xff]),
        Value::Bool(true),
        Value::Null,
    ]];

    let batch = result_rows_to_record_batch(&schema, &rows).unwrap();

    let d = batch
        .column(0)
        .as_any()
        .downcast_ref::<Date32Array>()
        .unwrap();
    assert_eq!(d.value(0), 19_000);

    let ts = batch
        .column(1)
        .as_any()
        .downcast_ref::<TimestampSecondArray>()
        .unwrap();
    assert_eq!(ts.value(0), 1_700_000_000);
    assert_eq!(ts.timezone(), Some("UTC"));

    let u = batch
        .column(2)
        .as_any()
        .downcast_ref::<FixedSizeBinaryArray>()
        .unwrap();
    assert_eq!(u.value(0), &uuid.to_be_bytes());

    let fixed = batch
        .column(3)
        .as_any()
        .downcast_ref::<FixedSizeBinaryArray>()
        .unwrap();
    assert_eq!(fixed.value(0), b"ab");

    let raw = batch
        .column(4)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(raw.value(0), "a\u{fffd}");

    let flag = batch
        .column(5)
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert!(flag.value(0));

    assert!(batch.column(6).as_any().downcast_ref::<NullArray>().is_some());
}

#[test]
fn empty_rows_produce_empty_batch() {
    let batch = result_rows_to_record_batch(&test_schema(), &[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 5);

    let no_columns = Arc::new(Schema::empty());
    let batch = result_rows_to_record_batch(&no_columns, &[vec![], vec![]]).unwrap();
    assert_eq!(batch.num_rows(), 2);
}

#[test]
fn value_type_mismatch_is_an_error() {
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::UInt8, false)]));
    let err = result_rows_to_record_batch(&schema, &[vec![Value::string("x")]]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::ValueType(_)));
    assert_eq!(
        format!("{err}"),
        "value type mismatch: expected U8, found String"
    );
}

#[test]
fn row_width_mismatch_is_an_error() {
    let err = result_rows_to_record_batch(&test_schema(), &[vec![Value::U8(1)]]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::RowWidth {
            row: 0,
            expected: 5,
            actual: 1
        }
    ));
}

#[test]
fn null_in_non_nullable_field_is_rejected() {
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::UInt8, false)]));
    let err = result_rows_to_record_batch(&schema, &[vec![Value::Null]]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::Arrow(_)));
}

#[test]
fn unsupported_arrow_type_is_an_error() {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "unsupported",
        DataType::Float16,
        true,
    )]));
    let err = result_rows_to_record_batch(&schema, &[vec![Value::Null]]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::UnsupportedDataType(DataType::Float16)
    ));
}

#[test]
fn fixed_size_binary_length_mismatch_is_an_error() {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "fixed",
        DataType::FixedSizeBinary(4),
        false,
    )]));
    let err = result_rows_to_record_batch(&schema, &[vec![Value::bytes(b"ab")]]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::Arrow(_)));
}
