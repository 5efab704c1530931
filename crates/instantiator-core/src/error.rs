//! Error types for the instantiator.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError  - describing a type to the registry
//! ConstructionError  - resolving or running a constructor
//! InstantiateError   - the instantiate operation itself
//!     └── Construction { source: ConstructionError }
//! ```
//!
//! Nothing here is retried or logged by the library; every error is returned
//! to the caller with the type names needed to act on it.

use thiserror::Error;

use crate::{TypeHash, ValueKind};

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types and constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two constructors share the same parameter kinds.
    #[error("duplicate constructor: '{type_name}{signature}' is already registered")]
    DuplicateConstructor {
        /// The owning type name.
        type_name: String,
        /// Rendered parameter list of the rejected constructor.
        signature: String,
    },

    /// A default value does not match its parameter's kind.
    #[error("type '{type_name}': default for parameter '{param}' must be {expected}, found {found}")]
    InvalidDefault {
        /// The owning type name.
        type_name: String,
        /// The offending parameter.
        param: String,
        /// The declared parameter kind.
        expected: ValueKind,
        /// The kind of the supplied default.
        found: ValueKind,
    },

    /// A required parameter follows a defaulted one.
    #[error("type '{type_name}': required parameter '{param}' follows a defaulted parameter")]
    InvalidParamOrder {
        /// The owning type name.
        type_name: String,
        /// The offending parameter.
        param: String,
    },

    /// A type declared itself as its own supertype.
    #[error("type '{0}' cannot be its own supertype")]
    SelfSupertype(String),
}

// ============================================================================
// Construction Errors
// ============================================================================

/// Errors raised by the construction mechanism.
///
/// These are propagated unchanged inside [`InstantiateError::Construction`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// The type is not known to the introspector.
    #[error("type {0} is not registered")]
    Unregistered(TypeHash),

    /// The type is marked abstract.
    #[error("type '{0}' is abstract and cannot be instantiated")]
    AbstractType(String),

    /// The type is an interface.
    #[error("type '{0}' is an interface and cannot be instantiated")]
    InterfaceType(String),

    /// No accessible zero-argument or all-defaulted constructor exists.
    #[error("type '{0}' has no accessible zero-argument or all-defaulted constructor")]
    NoDefaultConstructor(String),

    /// Wrong number of arguments for the constructor.
    #[error("expected {expected} argument(s), found {found}")]
    ArgumentCount {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// An argument has the wrong kind.
    #[error("argument {index}: expected {expected}, found {found}")]
    ArgumentType {
        /// Zero-based argument position.
        index: usize,
        /// Declared kind.
        expected: ValueKind,
        /// Supplied kind.
        found: ValueKind,
    },

    /// The constructor body reported a failure.
    #[error("{0}")]
    Failed(String),

    /// An erased instance did not hold the type an upcast expected.
    #[error("instance of {from} cannot be upcast to {to}")]
    UpcastMismatch {
        /// Source type.
        from: TypeHash,
        /// Target type.
        to: TypeHash,
    },
}

impl ConstructionError {
    /// Create a failure reported by a constructor body.
    pub fn failed(message: impl Into<String>) -> Self {
        ConstructionError::Failed(message.into())
    }
}

// ============================================================================
// Instantiate Errors
// ============================================================================

/// Errors returned by the instantiate operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstantiateError {
    /// No candidate type was supplied.
    #[error("no candidate type supplied for required type '{required}'")]
    NullCandidate {
        /// Name of the required type.
        required: String,
    },

    /// The candidate is not known to the introspector.
    #[error("unknown candidate type: {0}")]
    UnknownType(String),

    /// The required type token names an unregistered type.
    #[error("required type '{0}' is not registered")]
    UnknownRequiredType(String),

    /// The token's Rust type differs from the type registered under its name.
    #[error("required type '{required}' is registered with a different Rust type than its token")]
    RequiredTypeMismatch {
        /// Name of the required type.
        required: String,
    },

    /// The candidate is neither the required type nor one of its subtypes.
    #[error("{candidate} is not a type or subtype of {required}")]
    TypeConstraintViolation {
        /// Name of the offending candidate.
        candidate: String,
        /// Name of the required type.
        required: String,
    },

    /// The construction mechanism failed.
    #[error("failed to construct '{type_name}': {source}")]
    Construction {
        /// Name of the candidate being constructed.
        type_name: String,
        /// Underlying failure.
        #[source]
        source: ConstructionError,
    },
}

impl InstantiateError {
    /// Wrap a construction failure for the named type.
    pub fn construction(type_name: impl Into<String>, source: ConstructionError) -> Self {
        InstantiateError::Construction {
            type_name: type_name.into(),
            source,
        }
    }

    /// The construction failure, if this is one.
    pub fn construction_error(&self) -> Option<&ConstructionError> {
        match self {
            InstantiateError::Construction { source, .. } => Some(source),
            _ => None,
        }
    }
}
