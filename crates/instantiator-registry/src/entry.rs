//! Registry entry for a single type.

use std::any::TypeId;

use instantiator_core::{ConstructorEntry, TypeDescriptor, TypeHash, TypeKind, Upcast};

/// Everything the registry knows about one type.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    /// Qualified name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Class or interface.
    pub kind: TypeKind,
    /// Class is marked `abstract`.
    pub is_abstract: bool,
    /// The Rust type instances are boxed as.
    pub rust_type: TypeId,

    // === Relations ===
    /// Declared supertypes, each with its conversion.
    pub supertypes: Vec<Upcast>,

    // === Behaviors ===
    /// Constructors in registration order.
    pub constructors: Vec<ConstructorEntry>,
}

impl TypeEntry {
    /// Create an entry for a class boxed as `C`.
    pub fn class<C: 'static>(name: impl Into<String>) -> Self {
        Self::new::<C>(name.into(), TypeKind::Class)
    }

    /// Create an entry for an interface boxed as `I` (usually `dyn Trait`).
    pub fn interface<I: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new::<I>(name.into(), TypeKind::Interface)
    }

    fn new<T: ?Sized + 'static>(name: String, kind: TypeKind) -> Self {
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            kind,
            is_abstract: false,
            rust_type: TypeId::of::<T>(),
            supertypes: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Read-only descriptor for introspection queries.
    pub fn descriptor(&self) -> TypeDescriptor<'_> {
        TypeDescriptor {
            hash: self.type_hash,
            name: &self.name,
            kind: self.kind,
            is_abstract: self.is_abstract,
            rust_type: self.rust_type,
        }
    }

    /// Check if this type directly declares `supertype`.
    pub fn declares_supertype(&self, supertype: TypeHash) -> bool {
        self.supertypes.iter().any(|u| u.to == supertype)
    }

    /// Find a constructor by its hash.
    pub fn find_constructor(&self, func_hash: TypeHash) -> Option<&ConstructorEntry> {
        self.constructors.iter().find(|c| c.func_hash == func_hash)
    }
}
