//! TypeRegistry - explicit type metadata for instantiation.
//!
//! [`TypeRegistry`] stands in for runtime reflection. It stores, per type:
//!
//! - Name, kind, abstract flag and the Rust type instances are boxed as
//! - Declared supertypes, each with a typed upcast
//! - Constructors with parameter metadata
//!
//! It never stores instances.
//!
//! # Thread Safety
//!
//! Registration takes `&mut self`; queries take `&self`. Every stored
//! function is `Send + Sync`, so a populated registry can be shared across
//! threads (e.g. in an `Arc`) and queried concurrently.
//!
//! # Example
//!
//! ```
//! use instantiator_core::TypeToken;
//! use instantiator_registry::TypeRegistry;
//!
//! trait Animal {}
//! struct Dog;
//! impl Animal for Dog {}
//!
//! const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_interface::<dyn Animal>("Animal").build()?;
//! let dog = registry
//!     .register_class::<Dog>("Dog")
//!     .default_constructor(|| Dog)?
//!     .implements(&ANIMAL, |dog| dog)
//!     .build()?;
//!
//! assert!(registry.is_subtype_or_equal(dog, ANIMAL.hash()));
//! # Ok::<(), instantiator_core::RegistrationError>(())
//! ```

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use instantiator_core::{
    ConstructorEntry, RegistrationError, TypeDescriptor, TypeHash, TypeIntrospector, Upcast,
};

use crate::{ClassBuilder, InterfaceBuilder, TypeEntry};

/// Registry of instantiable types and their supertypes.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<TypeHash, TypeEntry>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Start registering a class whose instances are boxed as `C`.
    pub fn register_class<C: 'static>(&mut self, name: impl Into<String>) -> ClassBuilder<'_, C> {
        ClassBuilder::new(self, TypeEntry::class::<C>(name))
    }

    /// Start registering an interface whose instances are boxed as `I`.
    pub fn register_interface<I: ?Sized + 'static>(
        &mut self,
        name: impl Into<String>,
    ) -> InterfaceBuilder<'_, I> {
        InterfaceBuilder::new(self, TypeEntry::interface::<I>(name))
    }

    /// Register a fully built entry.
    ///
    /// Returns an error if a type with the same name already exists or the
    /// entry lists itself as a supertype.
    pub fn register(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.type_hash;

        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType(entry.name));
        }
        if entry.declares_supertype(hash) {
            return Err(RegistrationError::SelfSupertype(entry.name));
        }

        debug!(
            type_name = %entry.name,
            kind = %entry.kind,
            constructors = entry.constructors.len(),
            supertypes = entry.supertypes.len(),
            "registered type"
        );
        self.types.insert(hash, entry);
        Ok(hash)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(&TypeHash::from_name(name))
    }

    pub fn contains_type(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// Directly declared supertypes of `hash` that are registered.
    pub fn supertypes(&self, hash: TypeHash) -> impl Iterator<Item = &TypeEntry> {
        self.types
            .get(&hash)
            .into_iter()
            .flat_map(|entry| entry.supertypes.iter())
            .filter_map(|upcast| self.types.get(&upcast.to))
    }

    // ==========================================================================
    // Subtyping
    // ==========================================================================

    /// Shortest chain of upcasts from `candidate` to `required`.
    ///
    /// Breadth-first over declared supertypes; edges to unregistered types
    /// are skipped and each type is visited once, so cycles terminate.
    pub fn upcast_path(&self, candidate: TypeHash, required: TypeHash) -> Option<Vec<&Upcast>> {
        if !self.types.contains_key(&candidate) || !self.types.contains_key(&required) {
            return None;
        }
        if candidate == required {
            return Some(Vec::new());
        }

        let mut visited = FxHashSet::default();
        let mut via: FxHashMap<TypeHash, &Upcast> = FxHashMap::default();
        let mut queue = VecDeque::from([candidate]);
        visited.insert(candidate);

        while let Some(current) = queue.pop_front() {
            let Some(entry) = self.types.get(&current) else {
                continue;
            };
            for upcast in &entry.supertypes {
                if !self.types.contains_key(&upcast.to) || !visited.insert(upcast.to) {
                    continue;
                }
                via.insert(upcast.to, upcast);
                if upcast.to == required {
                    return Self::unwind(&via, candidate, required);
                }
                queue.push_back(upcast.to);
            }
        }

        None
    }

    fn unwind<'a>(
        via: &FxHashMap<TypeHash, &'a Upcast>,
        candidate: TypeHash,
        required: TypeHash,
    ) -> Option<Vec<&'a Upcast>> {
        let mut path = Vec::new();
        let mut node = required;
        while node != candidate {
            let step = *via.get(&node)?;
            path.push(step);
            node = step.from;
        }
        path.reverse();
        Some(path)
    }

    pub fn is_subtype_or_equal(&self, candidate: TypeHash, required: TypeHash) -> bool {
        self.upcast_path(candidate, required).is_some()
    }

    /// Constructors of `hash` in registration order.
    pub fn constructors(&self, hash: TypeHash) -> &[ConstructorEntry] {
        self.types
            .get(&hash)
            .map(|entry| entry.constructors.as_slice())
            .unwrap_or(&[])
    }
}

impl TypeIntrospector for TypeRegistry {
    fn describe(&self, ty: TypeHash) -> Option<TypeDescriptor<'_>> {
        self.get(ty).map(TypeEntry::descriptor)
    }

    fn upcast_path(&self, candidate: TypeHash, required: TypeHash) -> Option<Vec<&Upcast>> {
        TypeRegistry::upcast_path(self, candidate, required)
    }

    fn constructors(&self, ty: TypeHash) -> &[ConstructorEntry] {
        TypeRegistry::constructors(self, ty)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .finish()
    }
}
