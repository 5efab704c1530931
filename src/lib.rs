//! Type-constrained object factory.
//!
//! Given a candidate type known only at run time and a required type `T`
//! known at compile time, [`Instantiator::instantiate`] checks that the
//! candidate is `T` or a subtype of `T`, picks a constructor, and returns the
//! new instance as `Box<T>`.
//!
//! Types are described to a [`TypeRegistry`] up front: classes with their
//! constructors, interfaces, and the supertype edges between them.
//!
//! # Example
//!
//! ```
//! use instantiator::{Instantiator, ParamEntry, TypeRegistry, TypeToken};
//!
//! trait Animal {
//!     fn name(&self) -> String;
//! }
//!
//! struct Dog;
//! impl Animal for Dog {
//!     fn name(&self) -> String {
//!         "dog".to_string()
//!     }
//! }
//!
//! struct Cat {
//!     name: String,
//! }
//! impl Animal for Cat {
//!     fn name(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_interface::<dyn Animal>("Animal").build()?;
//! registry
//!     .register_class::<Dog>("Dog")
//!     .default_constructor(|| Dog)?
//!     .implements(&ANIMAL, |dog| dog)
//!     .build()?;
//! registry
//!     .register_class::<Cat>("Cat")
//!     .constructor(vec![ParamEntry::optional("name", "Unnamed")], |args| {
//!         Ok(Cat { name: args.string(0)?.to_string() })
//!     })?
//!     .implements(&ANIMAL, |cat| cat)
//!     .build()?;
//!
//! let instantiator = Instantiator::new(&registry);
//! let dog = instantiator.instantiate_named(&ANIMAL, Some("Dog"))?;
//! let cat = instantiator.instantiate_named(&ANIMAL, Some("Cat"))?;
//!
//! assert_eq!(dog.name(), "dog");
//! assert_eq!(cat.name(), "Unnamed");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The return type follows the token, so a result cannot be used as
//! anything other than `T`:
//!
//! ```compile_fail
//! use instantiator::{Instantiator, TypeRegistry, TypeToken};
//!
//! trait Animal {}
//! struct Dog;
//! impl Animal for Dog {}
//!
//! const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
//!
//! let registry = TypeRegistry::new();
//! let dog: Box<Dog> = Instantiator::new(&registry)
//!     .instantiate(&ANIMAL, None)
//!     .unwrap();
//! ```

mod instantiator;

pub use instantiator::{Instantiator, ResolvedPlan, instantiate};

pub use instantiator_core::{
    Args, ConstructionError, ConstructionStrategy, ConstructorEntry, Instance, InstantiateError,
    InstantiatorConfig, ParamEntry, RegistrationError, ResolvedConstructor, TypeDescriptor,
    TypeHash, TypeIntrospector, TypeKind, TypeToken, Upcast, Value, ValueKind, Visibility,
};
pub use instantiator_registry::{ClassBuilder, InterfaceBuilder, TypeEntry, TypeRegistry};
