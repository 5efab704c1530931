//! Explicit type registry for the instantiator.
//!
//! [`TypeRegistry`] records classes, interfaces, their supertype edges and
//! their constructors, and answers the [`TypeIntrospector`] queries an
//! instantiation needs.
//!
//! [`TypeIntrospector`]: instantiator_core::TypeIntrospector

mod builder;
mod entry;
mod registry;

pub use builder::{ClassBuilder, InterfaceBuilder};
pub use entry::TypeEntry;
pub use registry::TypeRegistry;
