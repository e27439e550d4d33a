//! Error types
//!
//! Only construction-time failures are errors: a closed type or a value that
//! would violate its invariants is never built. Everything the checker finds
//! is data in a [`CheckResult`](crate::check::CheckResult), not an error.

use thiserror::Error;

/// Result type alias for definition-time operations
pub type Result<T, E = DefineError> = std::result::Result<T, E>;

/// Failure while defining a closed type
///
/// Construction aborts on the first failure; there is no partially valid
/// closed type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefineError {
    /// A closed type with zero variants is uninhabited: no value could ever
    /// carry a valid tag and no match could ever be authored against it.
    #[error("closed type `{type_name}` has no variants")]
    EmptyType { type_name: String },

    /// Two variants share a name within one closed type.
    #[error("duplicate variant `{variant}` in closed type `{type_name}`")]
    DuplicateVariant { type_name: String, variant: String },
}

impl DefineError {
    pub fn empty_type(type_name: impl Into<String>) -> Self {
        Self::EmptyType {
            type_name: type_name.into(),
        }
    }

    pub fn duplicate_variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::DuplicateVariant {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }
}

/// Failure while constructing or re-tagging a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The requested tag is not a member of the value's closed type.
    #[error("`{variant}` is not a variant of closed type `{type_name}`")]
    UnknownVariant { type_name: String, variant: String },

    /// Payload field count does not match the variant's schema.
    #[error("variant `{variant}` expects {expected} payload field(s), got {got}")]
    PayloadArity {
        variant: String,
        expected: usize,
        got: usize,
    },

    /// A payload field has the wrong type for its position in the schema.
    #[error("payload field {index} of variant `{variant}` expects {expected}, got {got}")]
    PayloadType {
        variant: String,
        index: usize,
        expected: String,
        got: String,
    },
}
