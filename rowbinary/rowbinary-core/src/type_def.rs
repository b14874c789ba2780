use std::fmt::{Display, Formatter, Result};

/// Structural description of a column type, independent of its wire layout.
///
/// Variant names mirror [`Value`](crate::Value) where a one-to-one mapping exists.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTypeDef {
    Nothing,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    FixedBytes(usize),
    Uuid,
    Date,
    DateTime(Option<String>),
    Array(Box<ElementDef>),
    Tuple(Vec<FieldDef>),
    Map {
        key: Box<ElementDef>,
        value: Box<ElementDef>,
    },
}

impl DataTypeDef {
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            DataTypeDef::Array(_) | DataTypeDef::Tuple(_) | DataTypeDef::Map { .. }
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataTypeDef::Nothing => "nothing",
            DataTypeDef::Bool => "bool",
            DataTypeDef::I8 => "i8",
            DataTypeDef::I16 => "i16",
            DataTypeDef::I32 => "i32",
            DataTypeDef::I64 => "i64",
            DataTypeDef::U8 => "u8",
            DataTypeDef::U16 => "u16",
            DataTypeDef::U32 => "u32",
            DataTypeDef::U64 => "u64",
            DataTypeDef::F32 => "f32",
            DataTypeDef::F64 => "f64",
            DataTypeDef::String => "string",
            DataTypeDef::FixedBytes(_) => "fixed_bytes",
            DataTypeDef::Uuid => "uuid",
            DataTypeDef::Date => "date",
            DataTypeDef::DateTime(_) => "datetime",
            DataTypeDef::Array(_) => "array",
            DataTypeDef::Tuple(_) => "tuple",
            DataTypeDef::Map { .. } => "map",
        }
    }
}

impl Display for DataTypeDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DataTypeDef::FixedBytes(n) => write!(f, "fixed_bytes[{n}]"),
            DataTypeDef::DateTime(Some(tz)) => write!(f, "datetime[{tz}]"),
            DataTypeDef::Array(elem) => write!(f, "array<{elem}>"),
            DataTypeDef::Tuple(fields) => {
                f.write_str("tuple<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.element)?;
                }
                f.write_str(">")
            }
            DataTypeDef::Map { key, value } => write!(f, "map<{key}, {value}>"),
            other => f.write_str(other.type_name()),
        }
    }
}

/// Data type plus nullability, used for columns and nested elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    pub data_type: DataTypeDef,
    pub nullable: bool,
}

impl ElementDef {
    pub fn new(data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }
}

impl Display for ElementDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.nullable {
            write!(f, "{}?", self.data_type)
        } else {
            write!(f, "{}", self.data_type)
        }
    }
}

/// Named element of a tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub element: ElementDef,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, data_type: DataTypeDef, nullable: bool) -> Self {
        Self {
            name: name.into(),
            element: ElementDef::new(data_type, nullable),
        }
    }
}
