//! Fixed-width little-endian integers, floats and `Bool`.

use bytes::BufMut;
use rowbinary_core::{
    ColumnType, DataTypeDef, DecodeError, ElementDef, EncodeError, NullPolicy, Value, WireCursor,
};

/// Integers of any width are accepted on encode as long as they fit.
macro_rules! integer_type {
    ($(#[$meta:meta])* $name:ident, $family:literal, $variant:ident, $ty:ty, $read:ident, $put:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ColumnType for $name {
            fn name(&self) -> String {
                $family.to_string()
            }

            fn type_def(&self) -> ElementDef {
                ElementDef::new(DataTypeDef::$variant, false)
            }

            fn zero_value(&self) -> Value {
                Value::$variant(0)
            }

            fn min_wire_len(&self) -> usize {
                size_of::<$ty>()
            }

            fn decode(
                &self,
                cursor: &mut WireCursor<'_>,
                _nulls: NullPolicy,
            ) -> Result<Value, DecodeError> {
                Ok(Value::$variant(cursor.$read()?))
            }

            fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
                let v: $ty = match value {
                    Value::$variant(v) => *v,
                    Value::Bool(b) => <$ty>::from(*b),
                    other => {
                        let wide = other
                            .as_integer()
                            .ok_or_else(|| EncodeError::unsupported($family, other))?;
                        <$ty>::try_from(wide).map_err(|_| {
                            EncodeError::out_of_range($family, format!("{wide} does not fit"))
                        })?
                    }
                };
                out.$put(v);
                Ok(())
            }
        }
    };
}

macro_rules! float_type {
    ($(#[$meta:meta])* $name:ident, $family:literal, $variant:ident, $ty:ty, $read:ident, $put:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ColumnType for $name {
            fn name(&self) -> String {
                $family.to_string()
            }

            fn type_def(&self) -> ElementDef {
                ElementDef::new(DataTypeDef::$variant, false)
            }

            fn zero_value(&self) -> Value {
                Value::$variant(0.0)
            }

            fn min_wire_len(&self) -> usize {
                size_of::<$ty>()
            }

            fn decode(
                &self,
                cursor: &mut WireCursor<'_>,
                _nulls: NullPolicy,
            ) -> Result<Value, DecodeError> {
                Ok(Value::$variant(cursor.$read()?))
            }

            #[allow(clippy::unnecessary_cast)]
            fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
                let v = match value {
                    Value::F32(v) => *v as $ty,
                    Value::F64(v) => *v as $ty,
                    other => match other.as_integer() {
                        Some(i) => i as $ty,
                        None => return Err(EncodeError::unsupported($family, other)),
                    },
                };
                out.$put(v);
                Ok(())
            }
        }
    };
}

integer_type!(Int8Type, "Int8", I8, i8, read_i8, put_i8);
integer_type!(Int16Type, "Int16", I16, i16, read_i16_le, put_i16_le);
integer_type!(Int32Type, "Int32", I32, i32, read_i32_le, put_i32_le);
integer_type!(Int64Type, "Int64", I64, i64, read_i64_le, put_i64_le);
integer_type!(UInt8Type, "UInt8", U8, u8, read_u8, put_u8);
integer_type!(UInt16Type, "UInt16", U16, u16, read_u16_le, put_u16_le);
integer_type!(UInt32Type, "UInt32", U32, u32, read_u32_le, put_u32_le);
integer_type!(UInt64Type, "UInt64", U64, u64, read_u64_le, put_u64_le);
float_type!(Float32Type, "Float32", F32, f32, read_f32_le, put_f32_le);
float_type!(Float64Type, "Float64", F64, f64, read_f64_le, put_f64_le);

/// One byte; any non-zero byte decodes as `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolType;

impl ColumnType for BoolType {
    fn name(&self) -> String {
        "Bool".to_string()
    }

    fn type_def(&self) -> ElementDef {
        ElementDef::new(DataTypeDef::Bool, false)
    }

    fn zero_value(&self) -> Value {
        Value::Bool(false)
    }

    fn decode(&self, cursor: &mut WireCursor<'_>, _nulls: NullPolicy) -> Result<Value, DecodeError> {
        Ok(Value::Bool(cursor.read_u8()? != 0))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let v = match value {
            Value::Bool(b) => *b,
            other => match other.as_integer() {
                Some(0) => false,
                Some(1) => true,
                Some(n) => return Err(EncodeError::out_of_range("Bool", format!("{n} is not 0 or 1"))),
                None => return Err(EncodeError::unsupported("Bool", other)),
            },
        };
        out.put_u8(u8::from(v));
        Ok(())
    }
}
