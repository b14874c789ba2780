//! Built-in ClickHouse column types and the families that build them.

mod containers;
mod numeric;
mod string;
mod temporal;
mod uuid;
mod wrappers;

use std::sync::Arc;

use rowbinary_core::{ColumnType, ColumnTypeRef};

use crate::{
    error::ResolveError, family::FnFamily, registry::TypeRegistry, type_name::TypeExpr,
};

pub use containers::{ArrayType, MapType, TupleType};
pub use numeric::{
    BoolType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type,
    UInt16Type, UInt32Type, UInt64Type,
};
pub use string::{FixedStringType, StringType};
pub use temporal::{Date32Type, DateTimeType, DateType};
pub use uuid::UuidType;
pub use wrappers::{LowCardinalityType, NothingType, NullableType};

pub(crate) fn default_families() -> Vec<FnFamily> {
    vec![
        FnFamily::new("Int8", build_simple::<Int8Type>),
        FnFamily::new("Int16", build_simple::<Int16Type>),
        FnFamily::new("Int32", build_simple::<Int32Type>),
        FnFamily::new("Int64", build_simple::<Int64Type>),
        FnFamily::new("UInt8", build_simple::<UInt8Type>),
        FnFamily::new("UInt16", build_simple::<UInt16Type>),
        FnFamily::new("UInt32", build_simple::<UInt32Type>),
        FnFamily::new("UInt64", build_simple::<UInt64Type>),
        FnFamily::new("Float32", build_simple::<Float32Type>),
        FnFamily::new("Float64", build_simple::<Float64Type>),
        FnFamily::new("Bool", build_simple::<BoolType>),
        FnFamily::new("String", build_simple::<StringType>),
        FnFamily::new("FixedString", string::build_fixed_string),
        FnFamily::new("UUID", build_simple::<UuidType>),
        FnFamily::new("Date", build_simple::<DateType>),
        FnFamily::new("Date32", build_simple::<Date32Type>),
        FnFamily::new("DateTime", temporal::build_datetime),
        FnFamily::new("Nothing", build_simple::<NothingType>),
        FnFamily::new("Nullable", wrappers::build_nullable),
        FnFamily::new("LowCardinality", wrappers::build_low_cardinality),
        FnFamily::new("Array", containers::build_array),
        FnFamily::new("Tuple", containers::build_tuple),
        FnFamily::new("Map", containers::build_map),
    ]
}

fn build_simple<T>(expr: &TypeExpr, _registry: &TypeRegistry) -> Result<ColumnTypeRef, ResolveError>
where
    T: ColumnType + Default + 'static,
{
    expr.expect_no_args()?;
    Ok(Arc::new(T::default()))
}
