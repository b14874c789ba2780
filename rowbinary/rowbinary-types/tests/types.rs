use rowbinary_core::{
    ColumnTypeRef, DataTypeDef, DecodeError, ElementDef, EncodeError, FieldDef, NullPolicy, Value,
    WireCursor,
};
use rowbinary_types::TypeRegistry;

fn resolve(name: &str) -> ColumnTypeRef {
    TypeRegistry::with_default_types()
        .resolve(name)
        .unwrap_or_else(|e| panic!("{name}: {e}"))
}

fn encode(name: &str, value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    resolve(name).encode(value, &mut out).unwrap();
    out
}

/// Decode one cell and require the whole buffer to be consumed.
fn decode_with(name: &str, bytes: &[u8], nulls: NullPolicy) -> Value {
    let mut cursor = WireCursor::new(bytes);
    let value = resolve(name).decode(&mut cursor, nulls).unwrap();
    assert!(cursor.is_exhausted(), "{name}: {} bytes left", cursor.remaining());
    value
}

fn decode(name: &str, bytes: &[u8]) -> Value {
    decode_with(name, bytes, NullPolicy::Null)
}

fn decode_err(name: &str, bytes: &[u8]) -> DecodeError {
    let mut cursor = WireCursor::new(bytes);
    resolve(name)
        .decode(&mut cursor, NullPolicy::Null)
        .unwrap_err()
}

// ── fixed width ──────────────────────────────────────────────────────────────

#[test]
fn integers_are_little_endian() {
    assert_eq!(decode("UInt8", &[0xff]), Value::U8(255));
    assert_eq!(decode("Int8", &[0xff]), Value::I8(-1));
    assert_eq!(decode("UInt16", &[0x34, 0x12]), Value::U16(0x1234));
    assert_eq!(decode("Int32", &(-5i32).to_le_bytes()), Value::I32(-5));
    assert_eq!(
        decode("UInt64", &u64::MAX.to_le_bytes()),
        Value::U64(u64::MAX)
    );
    assert_eq!(encode("Int16", &Value::I16(-2)), vec![0xfe, 0xff]);
}

#[test]
fn integer_encode_accepts_any_fitting_width() {
    assert_eq!(encode("UInt8", &Value::I64(7)), vec![7]);
    assert_eq!(encode("Int64", &Value::U8(7)), 7i64.to_le_bytes().to_vec());
    assert_eq!(encode("UInt8", &Value::Bool(true)), vec![1]);

    let mut out = Vec::new();
    let err = resolve("UInt8")
        .encode(&Value::I32(256), &mut out)
        .unwrap_err();
    assert!(matches!(err, EncodeError::OutOfRange { .. }));
    let err = resolve("UInt32")
        .encode(&Value::I8(-1), &mut out)
        .unwrap_err();
    assert!(matches!(err, EncodeError::OutOfRange { .. }));
    assert!(out.is_empty());
}

#[test]
fn floats_round_trip_bit_exact() {
    let bytes = encode("Float64", &Value::F64(-0.25));
    assert_eq!(bytes, (-0.25f64).to_le_bytes().to_vec());
    assert_eq!(decode("Float64", &bytes), Value::F64(-0.25));
    assert_eq!(decode("Float32", &1.5f32.to_le_bytes()), Value::F32(1.5));
    assert_eq!(encode("Float32", &Value::I32(2)), 2.0f32.to_le_bytes().to_vec());
}

#[test]
fn bool_treats_any_nonzero_byte_as_true() {
    assert_eq!(decode("Bool", &[0]), Value::Bool(false));
    assert_eq!(decode("Bool", &[1]), Value::Bool(true));
    assert_eq!(decode("Bool", &[7]), Value::Bool(true));
    assert_eq!(encode("Bool", &Value::Bool(true)), vec![1]);
    assert_eq!(encode("Bool", &Value::U8(0)), vec![0]);
}

#[test]
fn uuid_writes_high_half_first() {
    let uuid = 0x0011_2233_4455_6677_8899_aabb_ccdd_eeffu128;
    let mut expected = 0x0011_2233_4455_6677u64.to_le_bytes().to_vec();
    expected.extend_from_slice(&0x8899_aabb_ccdd_eeffu64.to_le_bytes());
    assert_eq!(encode("UUID", &Value::Uuid(uuid)), expected);
    assert_eq!(decode("UUID", &expected), Value::Uuid(uuid));
}

#[test]
fn dates_and_datetimes() {
    assert_eq!(decode("Date", &[0x01, 0x00]), Value::Date(1));
    assert_eq!(decode("Date32", &(-1i32).to_le_bytes()), Value::Date(-1));
    assert_eq!(
        decode("DateTime('UTC')", &1_700_000_000u32.to_le_bytes()),
        Value::DateTime(1_700_000_000)
    );
    assert_eq!(encode("Date", &Value::Date(19_000)), 19_000u16.to_le_bytes().to_vec());

    let mut out = Vec::new();
    let err = resolve("Date").encode(&Value::Date(-1), &mut out).unwrap_err();
    assert!(matches!(err, EncodeError::OutOfRange { .. }));
}

#[test]
fn truncated_fixed_width_reports_needed_bytes() {
    assert_eq!(
        decode_err("UInt32", &[1, 2]),
        DecodeError::TruncatedInput {
            offset: 0,
            needed: 4,
            remaining: 2
        }
    );
    assert!(decode_err("UUID", &[0; 15]).is_truncated());
}

// ── strings ──────────────────────────────────────────────────────────────────

#[test]
fn string_is_length_prefixed() {
    assert_eq!(encode("String", &Value::string("bb")), vec![2, b'b', b'b']);
    assert_eq!(decode("String", &[2, b'b', b'b']), Value::string("bb"));
    assert_eq!(decode("String", &[0]), Value::string(""));
}

#[test]
fn string_keeps_invalid_utf8_as_bytes() {
    assert_eq!(decode("String", &[2, 0xff, 0xfe]), Value::bytes([0xffu8, 0xfe]));
    assert_eq!(encode("String", &Value::bytes([0xffu8])), vec![1, 0xff]);
}

#[test]
fn string_length_past_end_is_truncated() {
    let err = decode_err("String", &[5, b'a']);
    assert_eq!(
        err,
        DecodeError::TruncatedInput {
            offset: 1,
            needed: 5,
            remaining: 1
        }
    );
}

#[test]
fn fixed_string_pads_and_rejects_overflow() {
    assert_eq!(
        encode("FixedString(4)", &Value::string("ab")),
        vec![b'a', b'b', 0, 0]
    );
    assert_eq!(
        decode("FixedString(3)", b"xyz"),
        Value::bytes(b"xyz")
    );

    let mut out = Vec::new();
    let err = resolve("FixedString(2)")
        .encode(&Value::string("abc"), &mut out)
        .unwrap_err();
    assert!(matches!(err, EncodeError::OutOfRange { .. }));
}

// ── wrappers ─────────────────────────────────────────────────────────────────

#[test]
fn nullable_marker_byte() {
    assert_eq!(decode("Nullable(UInt8)", &[0, 9]), Value::U8(9));
    assert_eq!(decode("Nullable(UInt8)", &[1]), Value::Null);
    assert_eq!(encode("Nullable(String)", &Value::Null), vec![1]);
    assert_eq!(
        encode("Nullable(String)", &Value::string("a")),
        vec![0, 1, b'a']
    );
}

#[test]
fn null_policy_zero_substitutes_zero_value() {
    assert_eq!(
        decode_with("Nullable(UInt32)", &[1], NullPolicy::Zero),
        Value::U32(0)
    );
    assert_eq!(
        decode_with("Nullable(String)", &[1], NullPolicy::Zero),
        Value::string("")
    );
    assert_eq!(
        decode_with(
            "Array(Nullable(Int8))",
            &[2, 1, 0, 0xff],
            NullPolicy::Zero
        ),
        Value::Array(vec![Value::I8(0), Value::I8(-1)])
    );
}

#[test]
fn nullable_type_def_is_flagged() {
    assert_eq!(
        resolve("Nullable(DateTime('UTC'))").type_def(),
        ElementDef::new(DataTypeDef::DateTime(Some("UTC".into())), true)
    );
    assert_eq!(
        resolve("LowCardinality(Nullable(String))").type_def(),
        ElementDef::new(DataTypeDef::String, true)
    );
}

#[test]
fn low_cardinality_is_transparent() {
    assert_eq!(
        encode("LowCardinality(String)", &Value::string("x")),
        encode("String", &Value::string("x"))
    );
    assert_eq!(
        decode("LowCardinality(Nullable(String))", &[1]),
        Value::Null
    );
}

#[test]
fn nothing_is_zero_width() {
    assert_eq!(decode("Nothing", &[]), Value::Null);
    assert_eq!(decode("Nullable(Nothing)", &[1]), Value::Null);
    assert!(encode("Nothing", &Value::Null).is_empty());
    assert_eq!(resolve("Nothing").min_wire_len(), 0);
}

// ── containers ───────────────────────────────────────────────────────────────

#[test]
fn array_has_varint_count() {
    let value = Value::Array(vec![Value::U8(1), Value::U8(2), Value::U8(3)]);
    let bytes = encode("Array(UInt8)", &value);
    assert_eq!(bytes, vec![3, 1, 2, 3]);
    assert_eq!(decode("Array(UInt8)", &bytes), value);
    assert_eq!(decode("Array(String)", &[0]), Value::Array(vec![]));
}

#[test]
fn array_count_larger_than_buffer_is_rejected_up_front() {
    // Count 2^35 with only three bytes following.
    let mut bytes = Vec::new();
    rowbinary_core::varint::write_varint(1 << 35, &mut bytes);
    bytes.extend_from_slice(&[1, 2, 3]);
    let err = decode_err("Array(UInt64)", &bytes);
    assert!(err.is_truncated(), "{err}");
}

#[test]
fn nested_arrays() {
    // Second inner array is missing entirely.
    let err = decode_err("Array(Array(UInt8))", &[2, 1, 0x0a]);
    assert!(err.is_truncated());

    let value = Value::Array(vec![
        Value::Array(vec![Value::string("a")]),
        Value::Array(vec![]),
    ]);
    let bytes = encode("Array(Array(String))", &value);
    assert_eq!(bytes, vec![2, 1, 1, b'a', 0]);
    assert_eq!(decode("Array(Array(String))", &bytes), value);
}

#[test]
fn tuple_is_unprefixed() {
    let value = Value::Tuple(vec![Value::U8(1), Value::string("x")]);
    let bytes = encode("Tuple(UInt8, String)", &value);
    assert_eq!(bytes, vec![1, 1, b'x']);
    assert_eq!(decode("Tuple(id UInt8, name String)", &bytes), value);

    let mut out = Vec::new();
    let err = resolve("Tuple(UInt8, String)")
        .encode(&Value::Tuple(vec![Value::U8(1)]), &mut out)
        .unwrap_err();
    assert!(matches!(err, EncodeError::OutOfRange { .. }));
}

#[test]
fn tuple_type_def_names_elements() {
    assert_eq!(
        resolve("Tuple(id UInt8, Nullable(String))").type_def(),
        ElementDef::new(
            DataTypeDef::Tuple(vec![
                FieldDef::new("id", DataTypeDef::U8, false),
                FieldDef::new("2", DataTypeDef::String, true),
            ]),
            false
        )
    );
}

#[test]
fn map_entries_in_order() {
    let value = Value::Map(vec![
        (Value::string("b"), Value::U8(2)),
        (Value::string("a"), Value::U8(1)),
    ]);
    let bytes = encode("Map(String, UInt8)", &value);
    assert_eq!(bytes, vec![2, 1, b'b', 2, 1, b'a', 1]);
    assert_eq!(decode("Map(String, UInt8)", &bytes), value);
}

#[test]
fn container_zero_values() {
    assert_eq!(resolve("Array(UInt8)").zero_value(), Value::Array(vec![]));
    assert_eq!(resolve("Map(String, UInt8)").zero_value(), Value::Map(vec![]));
    assert_eq!(
        resolve("Tuple(UInt8, String)").zero_value(),
        Value::Tuple(vec![Value::U8(0), Value::string("")])
    );
}

#[test]
fn encode_rejects_wrong_variant() {
    let mut out = Vec::new();
    for (name, value) in [
        ("UInt8", Value::string("1")),
        ("String", Value::U8(1)),
        ("Array(UInt8)", Value::U8(1)),
        ("Map(String, UInt8)", Value::Array(vec![])),
        ("UUID", Value::string("x")),
        ("Nothing", Value::U8(0)),
    ] {
        let err = resolve(name).encode(&value, &mut out).unwrap_err();
        assert!(
            matches!(err, EncodeError::UnsupportedValue { .. }),
            "{name}: {err}"
        );
    }
}

#[test]
fn tuple_width_saturates() {
    let huge = format!("FixedString({})", i64::MAX);
    let tuple = resolve(&format!("Tuple({huge}, {huge}, UInt8)"));
    assert_eq!(tuple.min_wire_len(), usize::MAX);
}
