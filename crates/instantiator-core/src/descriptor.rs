//! Runtime type descriptors.

use std::any::TypeId;
use std::fmt;

use crate::TypeHash;

/// Whether a registered type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete Rust type with constructors.
    Class,
    /// A trait object type; only ever a supertype.
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// Read-only view of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    /// Type identity.
    pub hash: TypeHash,
    /// Qualified name.
    pub name: &'a str,
    /// Class or interface.
    pub kind: TypeKind,
    /// Class is marked abstract.
    pub is_abstract: bool,
    /// The Rust type instances are boxed as (`C` or `dyn I`).
    pub rust_type: TypeId,
}

impl TypeDescriptor<'_> {
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Check whether instances of this type are boxed as `T`.
    pub fn is_rust_type<T: ?Sized + 'static>(&self) -> bool {
        self.rust_type == TypeId::of::<T>()
    }
}
