//! Core types for the instantiator.
//!
//! - [`TypeHash`] - deterministic type and constructor identity
//! - [`TypeToken`] - the required-type constraint passed at a call site
//! - [`ConstructorEntry`], [`ParamEntry`], [`ResolvedConstructor`] - constructor
//!   metadata and the chosen construction strategy
//! - [`Instance`], [`Upcast`] - erased objects and supertype conversions
//! - [`TypeIntrospector`] - the type query capability an instantiation relies on
//! - [`RegistrationError`], [`ConstructionError`], [`InstantiateError`]

mod config;
mod constructor;
mod descriptor;
mod error;
mod instance;
mod introspector;
mod token;
mod type_hash;
mod value;
mod visibility;

pub use config::InstantiatorConfig;
pub use constructor::{
    ConstructionStrategy, ConstructorEntry, ParamEntry, ResolvedConstructor, select_constructor,
};
pub use descriptor::{TypeDescriptor, TypeKind};
pub use error::{ConstructionError, InstantiateError, RegistrationError};
pub use instance::{Instance, Upcast};
pub use introspector::TypeIntrospector;
pub use token::TypeToken;
pub use type_hash::{TypeHash, hash_constants};
pub use value::{Args, Value, ValueKind};
pub use visibility::Visibility;
