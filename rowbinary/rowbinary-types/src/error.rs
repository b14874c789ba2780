//! Error type for type name resolution.

/// Error returned by [`TypeRegistry::resolve`](crate::TypeRegistry::resolve).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No family is registered under the type's family name.
    #[error("unknown type '{type_name}'")]
    UnknownType { type_name: String },

    /// The name does not parse, or the family rejected its arguments.
    #[error("invalid type name '{type_name}': {detail}")]
    InvalidTypeName { type_name: String, detail: String },
}
