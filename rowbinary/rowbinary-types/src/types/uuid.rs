use bytes::BufMut;
use rowbinary_core::{
    ColumnType, DataTypeDef, DecodeError, ElementDef, EncodeError, NullPolicy, Value, WireCursor,
};

/// 128-bit UUID stored as two little-endian `UInt64` halves, high half first.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidType;

impl ColumnType for UuidType {
    fn name(&self) -> String {
        "UUID".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Uuid, false)
    }

    fn zero_value(&self) -> Value {
        Value::Uuid(0)
    }

    fn min_wire_len(&self) -> usize {
        16
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        cursor.ensure(16)?;
        let high = cursor.read_u64_le()?;
        let low = cursor.read_u64_le()?;
        Ok(Value::Uuid((u128::from(high) << 64) | u128::from(low)))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let Value::Uuid(v) = value else {
            return Err(EncodeError::unsupported("UUID", value));
        };
        out.put_u64_le((*v >> 64) as u64);
        out.put_u64_le(*v as u64);
        Ok(())
    }
}
