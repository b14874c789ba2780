use rowbinary_core::{
    DecodeError, WireCursor,
    varint::{
        MAX_VARINT_BYTES, read_length_prefixed_bytes, read_varint, varint_len, write_varint,
        write_length_prefixed_bytes,
    },
};

#[test]
fn varint_round_trips_boundary_values() {
    let values = [
        0u64,
        1,
        127,
        128,
        (1 << 14) - 1,
        1 << 14,
        1 << 21,
        1 << 35,
        u64::from(u32::MAX),
        u64::MAX,
    ];
    for value in values {
        let mut out = Vec::new();
        write_varint(value, &mut out);
        assert_eq!(out.len(), varint_len(value), "length of {value}");

        let mut cursor = WireCursor::new(&out);
        assert_eq!(read_varint(&mut cursor).unwrap(), value);
        assert!(cursor.is_exhausted(), "{value} left bytes behind");
    }
}

#[test]
fn varint_known_encodings() {
    let mut out = Vec::new();
    write_varint(300, &mut out);
    assert_eq!(out, vec![0xAC, 0x02]);

    out.clear();
    write_varint(127, &mut out);
    assert_eq!(out, vec![0x7F]);

    out.clear();
    write_varint(128, &mut out);
    assert_eq!(out, vec![0x80, 0x01]);

    out.clear();
    write_varint(u64::MAX, &mut out);
    assert_eq!(out.len(), MAX_VARINT_BYTES);
}

#[test]
fn varint_without_terminator_is_truncated() {
    let buf = [0x80, 0x80];
    let mut cursor = WireCursor::new(&buf);
    let err = read_varint(&mut cursor).expect_err("no terminating byte");
    assert!(matches!(
        err,
        DecodeError::TruncatedInput {
            offset: 0,
            remaining: 2,
            ..
        }
    ));
    assert_eq!(cursor.position(), 0);
}

#[test]
fn varint_on_empty_buffer_is_truncated() {
    let mut cursor = WireCursor::new(&[]);
    assert!(read_varint(&mut cursor).unwrap_err().is_truncated());
}

#[test]
fn varint_longer_than_ten_bytes_overflows() {
    let mut buf = vec![0xFF; 10];
    buf.push(0x01);
    let mut cursor = WireCursor::new(&buf);
    assert_eq!(
        read_varint(&mut cursor).unwrap_err(),
        DecodeError::VarintOverflow { offset: 0 }
    );
}

#[test]
fn varint_tenth_byte_above_one_overflows() {
    let mut buf = vec![0xFF; 9];
    buf.push(0x02);
    let mut cursor = WireCursor::new(&buf);
    assert!(matches!(
        read_varint(&mut cursor),
        Err(DecodeError::VarintOverflow { .. })
    ));
}

#[test]
fn varint_reads_are_contiguous() {
    let mut out = Vec::new();
    write_varint(5, &mut out);
    write_varint(1 << 21, &mut out);
    write_varint(0, &mut out);

    let mut cursor = WireCursor::new(&out);
    assert_eq!(cursor.read_varint().unwrap(), 5);
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.read_varint().unwrap(), 1 << 21);
    assert_eq!(cursor.position(), 5);
    assert_eq!(cursor.read_varint().unwrap(), 0);
    assert!(cursor.is_exhausted());
}

#[test]
fn length_prefixed_bytes_round_trip() {
    let mut out = Vec::new();
    write_length_prefixed_bytes(b"", &mut out);
    write_length_prefixed_bytes(b"hello", &mut out);
    let long = vec![7u8; 300];
    write_length_prefixed_bytes(&long, &mut out);

    let mut cursor = WireCursor::new(&out);
    assert_eq!(read_length_prefixed_bytes(&mut cursor).unwrap(), b"");
    assert_eq!(read_length_prefixed_bytes(&mut cursor).unwrap(), b"hello");
    assert_eq!(
        read_length_prefixed_bytes(&mut cursor).unwrap(),
        long.as_slice()
    );
    assert!(cursor.is_exhausted());
}

#[test]
fn length_prefixed_bytes_short_payload_is_truncated() {
    let buf = [0x05, b'a', b'b'];
    let mut cursor = WireCursor::new(&buf);
    let err = read_length_prefixed_bytes(&mut cursor).expect_err("3 bytes missing");
    assert_eq!(
        err,
        DecodeError::TruncatedInput {
            offset: 1,
            needed: 5,
            remaining: 2
        }
    );
}

#[test]
fn huge_length_prefix_is_truncated_not_allocated() {
    let mut out = Vec::new();
    write_varint(u64::MAX, &mut out);
    out.extend_from_slice(b"tiny");
    let mut cursor = WireCursor::new(&out);
    assert!(
        read_length_prefixed_bytes(&mut cursor)
            .unwrap_err()
            .is_truncated()
    );
}
