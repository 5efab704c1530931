//! Type-erased instances and upcasts.
//!
//! An [`Instance`] owns a freshly constructed object while its static type is
//! only known at run time. The erased value always holds a `Box<S>` where `S`
//! is the type named by [`Instance::type_hash`]. Keeping the box inside the
//! erasure lets `S` be unsized, so the same representation covers concrete
//! classes (`Box<Dog>`) and trait objects (`Box<dyn Animal>`).
//!
//! An [`Upcast`] converts an instance of `S` into an instance of a declared
//! supertype `U` using a typed `Fn(Box<S>) -> Box<U>` captured at
//! registration time.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::{ConstructionError, TypeHash};

/// An owned, type-erased object.
pub struct Instance {
    type_hash: TypeHash,
    value: Box<dyn Any>,
}

impl Instance {
    /// Erase a boxed value whose static type is identified by `type_hash`.
    pub fn new<S: ?Sized + 'static>(type_hash: TypeHash, value: Box<S>) -> Self {
        Self {
            type_hash,
            value: Box::new(value),
        }
    }

    /// The static type currently held.
    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    /// Check whether the held value is a `Box<S>`.
    pub fn is<S: ?Sized + 'static>(&self) -> bool {
        self.value.is::<Box<S>>()
    }

    /// Recover the typed box, or hand the instance back unchanged.
    pub fn downcast<S: ?Sized + 'static>(self) -> Result<Box<S>, Instance> {
        let type_hash = self.type_hash;
        match self.value.downcast::<Box<S>>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Instance { type_hash, value }),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_hash", &self.type_hash)
            .finish_non_exhaustive()
    }
}

type UpcastFn = dyn Fn(Instance) -> Result<Instance, ConstructionError> + Send + Sync;

/// A declared supertype edge with its conversion.
#[derive(Clone)]
pub struct Upcast {
    /// The subtype.
    pub from: TypeHash,
    /// The supertype.
    pub to: TypeHash,
    /// The Rust type the conversion accepts.
    pub source_type: TypeId,
    /// The Rust type the conversion produces.
    pub target_type: TypeId,
    apply: Arc<UpcastFn>,
}

impl Upcast {
    /// Build an upcast from a typed conversion.
    pub fn new<S, U, F>(from: TypeHash, to: TypeHash, convert: F) -> Self
    where
        S: ?Sized + 'static,
        U: ?Sized + 'static,
        F: Fn(Box<S>) -> Box<U> + Send + Sync + 'static,
    {
        let apply = move |instance: Instance| {
            let boxed = instance
                .downcast::<S>()
                .map_err(|_| ConstructionError::UpcastMismatch { from, to })?;
            Ok(Instance::new(to, convert(boxed)))
        };
        Self {
            from,
            to,
            source_type: TypeId::of::<S>(),
            target_type: TypeId::of::<U>(),
            apply: Arc::new(apply),
        }
    }

    /// Convert an instance of `from` into an instance of `to`.
    pub fn apply(&self, instance: Instance) -> Result<Instance, ConstructionError> {
        (self.apply)(instance)
    }
}

impl fmt::Debug for Upcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upcast")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
