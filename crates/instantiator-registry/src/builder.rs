//! Fluent builders for registering classes and interfaces.
//!
//! # Example
//!
//! ```
//! use instantiator_core::{ParamEntry, TypeToken};
//! use instantiator_registry::TypeRegistry;
//!
//! trait Animal {}
//! struct Cat {
//!     name: String,
//! }
//! impl Animal for Cat {}
//!
//! const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_interface::<dyn Animal>("Animal").build()?;
//! registry
//!     .register_class::<Cat>("Cat")
//!     .constructor(vec![ParamEntry::optional("name", "Unnamed")], |args| {
//!         Ok(Cat { name: args.string(0)?.to_string() })
//!     })?
//!     .implements(&ANIMAL, |cat| cat)
//!     .build()?;
//! # Ok::<(), instantiator_core::RegistrationError>(())
//! ```

use std::marker::PhantomData;

use instantiator_core::{
    Args, ConstructionError, ConstructorEntry, ParamEntry, RegistrationError, TypeHash, TypeToken,
    Upcast, Visibility,
};

use crate::{TypeEntry, TypeRegistry};

/// Builder for a class whose instances are boxed as `C`.
///
/// Created by [`TypeRegistry::register_class`]. Nothing is visible in the
/// registry until [`build`](Self::build) succeeds.
pub struct ClassBuilder<'r, C: 'static> {
    registry: &'r mut TypeRegistry,
    entry: TypeEntry,
    _marker: PhantomData<fn() -> C>,
}

impl<'r, C: 'static> ClassBuilder<'r, C> {
    pub(crate) fn new(registry: &'r mut TypeRegistry, entry: TypeEntry) -> Self {
        Self {
            registry,
            entry,
            _marker: PhantomData,
        }
    }

    /// Register a public constructor.
    ///
    /// Parameters with defaults must come after every required parameter,
    /// and each default must match its parameter's kind.
    pub fn constructor<F>(self, params: Vec<ParamEntry>, f: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&Args<'_>) -> Result<C, ConstructionError> + Send + Sync + 'static,
    {
        self.constructor_with_visibility(Visibility::Public, params, f)
    }

    /// Register a constructor with explicit visibility.
    pub fn constructor_with_visibility<F>(
        mut self,
        visibility: Visibility,
        params: Vec<ParamEntry>,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(&Args<'_>) -> Result<C, ConstructionError> + Send + Sync + 'static,
    {
        self.validate_params(&params)?;

        let ctor = ConstructorEntry::new(self.entry.type_hash, params, visibility, f);
        if self.entry.find_constructor(ctor.func_hash).is_some() {
            return Err(RegistrationError::DuplicateConstructor {
                type_name: self.entry.name.clone(),
                signature: ctor.signature(),
            });
        }

        self.entry.constructors.push(ctor);
        Ok(self)
    }

    /// Register a public zero-argument constructor that cannot fail.
    pub fn default_constructor<F>(self, f: F) -> Result<Self, RegistrationError>
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.constructor(Vec::new(), move |_| Ok(f()))
    }

    /// Declare that this class implements the interface named by `interface`.
    ///
    /// The interface does not need to be registered yet.
    pub fn implements<U, F>(mut self, interface: &TypeToken<U>, upcast: F) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(Box<C>) -> Box<U> + Send + Sync + 'static,
    {
        self.push_supertype(interface.hash(), upcast);
        self
    }

    /// Declare a base class.
    pub fn extends<U, F>(mut self, base: &TypeToken<U>, upcast: F) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(Box<C>) -> Box<U> + Send + Sync + 'static,
    {
        self.push_supertype(base.hash(), upcast);
        self
    }

    /// Mark this class as abstract. Abstract classes are never constructed.
    pub fn as_abstract(mut self) -> Self {
        self.entry.is_abstract = true;
        self
    }

    /// Finish registration.
    pub fn build(self) -> Result<TypeHash, RegistrationError> {
        self.registry.register(self.entry)
    }

    fn push_supertype<U, F>(&mut self, to: TypeHash, upcast: F)
    where
        U: ?Sized + 'static,
        F: Fn(Box<C>) -> Box<U> + Send + Sync + 'static,
    {
        let from = self.entry.type_hash;
        self.entry.supertypes.push(Upcast::new(from, to, upcast));
    }

    fn validate_params(&self, params: &[ParamEntry]) -> Result<(), RegistrationError> {
        let mut seen_default = false;
        for param in params {
            match &param.default {
                Some(default) if default.kind() != param.kind => {
                    return Err(RegistrationError::InvalidDefault {
                        type_name: self.entry.name.clone(),
                        param: param.name.clone(),
                        expected: param.kind,
                        found: default.kind(),
                    });
                }
                Some(_) => seen_default = true,
                None if seen_default => {
                    return Err(RegistrationError::InvalidParamOrder {
                        type_name: self.entry.name.clone(),
                        param: param.name.clone(),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Builder for an interface whose instances are boxed as `I`.
///
/// Created by [`TypeRegistry::register_interface`].
pub struct InterfaceBuilder<'r, I: ?Sized + 'static> {
    registry: &'r mut TypeRegistry,
    entry: TypeEntry,
    _marker: PhantomData<fn() -> Box<I>>,
}

impl<'r, I: ?Sized + 'static> InterfaceBuilder<'r, I> {
    pub(crate) fn new(registry: &'r mut TypeRegistry, entry: TypeEntry) -> Self {
        Self {
            registry,
            entry,
            _marker: PhantomData,
        }
    }

    /// Declare a base interface.
    pub fn extends<U, F>(mut self, base: &TypeToken<U>, upcast: F) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(Box<I>) -> Box<U> + Send + Sync + 'static,
    {
        let from = self.entry.type_hash;
        self.entry
            .supertypes
            .push(Upcast::new(from, base.hash(), upcast));
        self
    }

    pub fn build(self) -> Result<TypeHash, RegistrationError> {
        self.registry.register(self.entry)
    }
}
