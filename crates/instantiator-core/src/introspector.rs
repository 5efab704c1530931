//! The introspection capability the instantiator depends on.
//!
//! Rust has no runtime reflection, so the questions an instantiation asks
//! ("is A a subtype of B", "which constructor builds X") are answered by an
//! implementor of [`TypeIntrospector`], typically an explicit registry.

use crate::{
    ConstructionError, ConstructorEntry, InstantiatorConfig, ResolvedConstructor, TypeDescriptor,
    TypeHash, TypeKind, Upcast, select_constructor,
};

/// Type queries and constructor lookup for registered types.
pub trait TypeIntrospector {
    /// Describe a registered type.
    fn describe(&self, ty: TypeHash) -> Option<TypeDescriptor<'_>>;

    /// Describe a registered type by qualified name.
    fn lookup(&self, name: &str) -> Option<TypeDescriptor<'_>> {
        self.describe(TypeHash::from_name(name))
    }

    /// Upcasts converting an instance of `candidate` into `required`.
    ///
    /// `Some(vec![])` means the two are the same type; `None` means
    /// `candidate` is not a subtype of `required`.
    fn upcast_path(&self, candidate: TypeHash, required: TypeHash) -> Option<Vec<&Upcast>>;

    /// Constructors registered for `ty`, in registration order.
    fn constructors(&self, ty: TypeHash) -> &[ConstructorEntry];

    fn is_subtype_or_equal(&self, candidate: TypeHash, required: TypeHash) -> bool {
        self.upcast_path(candidate, required).is_some()
    }

    /// Choose the constructor an instantiation of `candidate` will use.
    ///
    /// Interfaces and abstract classes are rejected before any constructor
    /// is considered.
    fn resolve_constructor(
        &self,
        candidate: TypeHash,
        config: &InstantiatorConfig,
    ) -> Result<ResolvedConstructor<'_>, ConstructionError> {
        let descriptor = self
            .describe(candidate)
            .ok_or(ConstructionError::Unregistered(candidate))?;
        match descriptor.kind {
            TypeKind::Interface => Err(ConstructionError::InterfaceType(
                descriptor.name.to_string(),
            )),
            TypeKind::Class if descriptor.is_abstract => Err(ConstructionError::AbstractType(
                descriptor.name.to_string(),
            )),
            TypeKind::Class => {
                select_constructor(descriptor.name, self.constructors(candidate), config)
            }
        }
    }
}
