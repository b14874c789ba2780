//! Column type registry for the RowBinary codec.
//!
//! Type names from a result header are parsed into a [`TypeExpr`] and handed
//! to the [`TypeFamily`] registered under the expression's family name, which
//! builds a shared [`ColumnTypeRef`](rowbinary_core::ColumnTypeRef).
//!
//! # Pipeline
//!
//! ```text
//! "Nullable(Array(String))"
//!   └─ parse_type_name       – nom grammar → TypeExpr
//!       └─ TypeRegistry      – family lookup (case-insensitive)
//!           └─ TypeFamily::build  – recursive resolution of arguments
//!               └─ Arc<dyn ColumnType>
//! ```

mod error;
mod family;
mod registry;
mod type_name;
pub mod types;

pub use error::ResolveError;
pub use family::{BuildFn, FnFamily, TypeFamily};
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use type_name::{MAX_TYPE_DEPTH, TypeArg, TypeExpr, parse_type_name};
