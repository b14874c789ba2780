//! Factory trait used to register pluggable column type families.

use rowbinary_core::ColumnTypeRef;

use crate::{error::ResolveError, registry::TypeRegistry, type_name::TypeExpr};

/// Factory that builds column types for one family name (`Array`, `UInt8`, ...).
///
/// Implementations are registered with [`TypeRegistry`] and dispatched on
/// [`TypeExpr::family`]. Parametric families resolve their type arguments
/// through the registry they are given.
pub trait TypeFamily: Send + Sync {
    /// Family name this factory handles, e.g. `"Nullable"`.
    fn family_name(&self) -> &str;

    /// Build a column type for `expr`.
    ///
    /// Returns `Err` if the arguments are invalid or a nested type is unknown.
    fn build(
        &self,
        expr: &TypeExpr,
        registry: &TypeRegistry,
    ) -> Result<ColumnTypeRef, ResolveError>;
}

/// Signature of a plain builder function.
pub type BuildFn = fn(&TypeExpr, &TypeRegistry) -> Result<ColumnTypeRef, ResolveError>;

/// [`TypeFamily`] backed by a builder function.
#[derive(Debug, Clone, Copy)]
pub struct FnFamily {
    name: &'static str,
    build: BuildFn,
}

impl FnFamily {
    pub const fn new(name: &'static str, build: BuildFn) -> Self {
        Self { name, build }
    }
}

impl TypeFamily for FnFamily {
    fn family_name(&self) -> &str {
        self.name
    }

    fn build(
        &self,
        expr: &TypeExpr,
        registry: &TypeRegistry,
    ) -> Result<ColumnTypeRef, ResolveError> {
        (self.build)(expr, registry)
    }
}
