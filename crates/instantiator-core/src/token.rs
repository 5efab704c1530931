//! Required-type tokens.
//!
//! A [`TypeToken<T>`] is the constraint object passed at an instantiation
//! call site. It carries `T` statically, which fixes the return type to
//! `Box<T>`, and the registered name of `T` at run time, which is what the
//! candidate is checked against.
//!
//! ```
//! use instantiator_core::{TypeHash, TypeToken};
//!
//! trait Animal {}
//!
//! const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
//!
//! assert_eq!(ANIMAL.name(), "Animal");
//! assert_eq!(ANIMAL.hash(), TypeHash::from_name("Animal"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::TypeHash;

/// Names the required type `T` of an instantiation.
pub struct TypeToken<T: ?Sized + 'static> {
    name: &'static str,
    _marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + 'static> TypeToken<T> {
    /// Create a token for the type registered under `name`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn hash(&self) -> TypeHash {
        TypeHash::from_name(self.name)
    }
}

impl<T: ?Sized + 'static> Clone for TypeToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized + 'static> Copy for TypeToken<T> {}

impl<T: ?Sized + 'static> fmt::Debug for TypeToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeToken").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Animal {}
    struct Dog;

    #[test]
    fn tokens_for_traits_and_classes() {
        let animal: TypeToken<dyn Animal> = TypeToken::new("Animal");
        let dog: TypeToken<Dog> = TypeToken::new("Dog");

        assert_eq!(animal.hash(), TypeHash::from_name("Animal"));
        assert_eq!(dog.hash(), TypeHash::from_name("Dog"));
        assert_ne!(animal.hash(), dog.hash());
    }

    #[test]
    fn tokens_are_copy_and_send() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        let animal: TypeToken<dyn Animal> = TypeToken::new("Animal");
        let copy = animal;
        assert_send_sync(&copy);
        assert_eq!(animal.name(), copy.name());
        assert_eq!(format!("{:?}", animal), "TypeToken(\"Animal\")");
    }
}
