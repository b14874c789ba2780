//! Name → column type registry.

use std::{collections::HashMap, sync::Arc};

use rowbinary_core::ColumnTypeRef;
use tracing::trace;

use crate::{
    error::ResolveError,
    family::TypeFamily,
    type_name::{TypeExpr, parse_type_name},
    types,
};

/// Resolves type names to shared [`ColumnTypeRef`]s using registered [`TypeFamily`]s.
///
/// Build it once, then share it (by reference or `Arc`) between decode and
/// encode calls; resolution only reads the registry.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    families: HashMap<String, Arc<dyn TypeFamily>>,
}

/// Builder for configuring [`TypeRegistry`].
#[derive(Default)]
pub struct TypeRegistryBuilder {
    families: Vec<Arc<dyn TypeFamily>>,
}

impl TypeRegistry {
    /// Create a builder for [`TypeRegistry`].
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Empty registry; every name resolves to [`ResolveError::UnknownType`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in family.
    pub fn with_default_types() -> Self {
        Self::builder().with_default_types().build()
    }

    /// Register a family, replacing any family with the same name.
    pub fn register_family(&mut self, family: Box<dyn TypeFamily>) {
        self.register_shared_family(Arc::from(family));
    }

    /// Register a shared family, replacing any family with the same name.
    pub fn register_shared_family(&mut self, family: Arc<dyn TypeFamily>) {
        self.families
            .insert(family_key(family.family_name()), family);
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(&family_key(family))
    }

    /// Registered family names, sorted.
    pub fn family_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.values().map(|f| f.family_name()).collect();
        names.sort_unstable();
        names
    }

    /// Parse and resolve a type name such as `Array(Nullable(String))`.
    pub fn resolve(&self, type_name: &str) -> Result<ColumnTypeRef, ResolveError> {
        let expr = parse_type_name(type_name)?;
        let resolved = self.resolve_expr(&expr)?;
        trace!(type_name, resolved = %resolved.name(), "resolved column type");
        Ok(resolved)
    }

    /// Resolve an already parsed type expression.
    pub fn resolve_expr(&self, expr: &TypeExpr) -> Result<ColumnTypeRef, ResolveError> {
        let family = self
            .families
            .get(&family_key(&expr.family))
            .ok_or_else(|| ResolveError::UnknownType {
                type_name: expr.to_string(),
            })?;
        family.build(expr, self)
    }
}

impl TypeRegistryBuilder {
    /// Register a type family.
    pub fn with_family(mut self, family: Box<dyn TypeFamily>) -> Self {
        self.families.push(Arc::from(family));
        self
    }

    /// Register all built-in families (integers, floats, strings, dates,
    /// `Nullable`, `LowCardinality`, `Array`, `Tuple`, `Map`, ...).
    pub fn with_default_types(mut self) -> Self {
        for family in types::default_families() {
            self.families.push(Arc::new(family));
        }
        self
    }

    /// Build the registry. Later registrations win on name clashes.
    pub fn build(self) -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        for family in self.families {
            registry.register_shared_family(family);
        }
        registry
    }
}

fn family_key(name: &str) -> String {
    name.to_ascii_uppercase()
}
