//! Shared fixtures for integration tests.
//!
//! A small zoo: `Animal` and `Pet: Animal` interfaces, classes with every
//! kind of constructor, and a call counter per class so tests can assert
//! that nothing was constructed.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use instantiator::{
    ConstructionError, ParamEntry, TypeRegistry, TypeToken, ValueKind, Visibility,
};

pub trait Animal {
    fn name(&self) -> String;
    fn as_any(&self) -> &dyn Any;
}

pub trait Pet: Animal {
    fn into_animal(self: Box<Self>) -> Box<dyn Animal>;
}

pub const ANIMAL: TypeToken<dyn Animal> = TypeToken::new("Animal");
pub const PET: TypeToken<dyn Pet> = TypeToken::new("Pet");
pub const DOG: TypeToken<Dog> = TypeToken::new("Dog");

macro_rules! animal {
    ($ty:ty, |$this:ident| $name:expr) => {
        impl Animal for $ty {
            fn name(&self) -> String {
                let $this = self;
                $name
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

/// Zero-argument constructor.
#[derive(Debug)]
pub struct Dog;
animal!(Dog, |_this| "dog".to_string());

/// Only `Cat(name = "Unnamed")`.
#[derive(Debug)]
pub struct Cat {
    pub name: String,
}
animal!(Cat, |this| this.name.clone());

/// Both a zero-argument and an all-defaulted constructor.
#[derive(Debug)]
pub struct Parrot {
    pub words: i64,
}
animal!(Parrot, |this| format!("parrot ({} words)", this.words));

/// Two all-defaulted constructors of different arity.
#[derive(Debug)]
pub struct Horse {
    pub arity: usize,
}
animal!(Horse, |this| format!("horse/{}", this.arity));

/// Only a constructor with a required parameter.
#[derive(Debug)]
pub struct Fish {
    pub species: String,
}
animal!(Fish, |this| this.species.clone());

/// Zero-argument constructor that is private.
#[derive(Debug)]
pub struct Ghost;
animal!(Ghost, |_this| "ghost".to_string());

/// Constructor that always fails.
#[derive(Debug)]
pub struct Phoenix;
animal!(Phoenix, |_this| "phoenix".to_string());

/// Abstract base with a constructor that must never run.
#[derive(Debug)]
pub struct Mammal;
animal!(Mammal, |_this| "mammal".to_string());

/// Implements `Pet`, reaching `Animal` only through `Pet`.
#[derive(Debug)]
pub struct Puppy;
animal!(Puppy, |_this| "puppy".to_string());

impl Pet for Puppy {
    fn into_animal(self: Box<Self>) -> Box<dyn Animal> {
        self
    }
}

/// Not an animal.
#[derive(Debug)]
pub struct Rock;

/// Constructor calls per class.
#[derive(Debug, Default)]
pub struct Calls {
    pub dog: AtomicUsize,
    pub cat: AtomicUsize,
    pub parrot_zero: AtomicUsize,
    pub parrot_defaulted: AtomicUsize,
    pub horse: AtomicUsize,
    pub ghost: AtomicUsize,
    pub mammal: AtomicUsize,
    pub puppy: AtomicUsize,
    pub rock: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        [
            &self.dog,
            &self.cat,
            &self.parrot_zero,
            &self.parrot_defaulted,
            &self.horse,
            &self.ghost,
            &self.mammal,
            &self.puppy,
            &self.rock,
        ]
        .into_iter()
        .map(Self::get)
        .sum()
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Build the zoo registry and its call counters.
pub fn zoo() -> (TypeRegistry, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let mut registry = TypeRegistry::new();

    registry
        .register_interface::<dyn Animal>("Animal")
        .build()
        .expect("register Animal");
    registry
        .register_interface::<dyn Pet>("Pet")
        .extends(&ANIMAL, |pet| pet.into_animal())
        .build()
        .expect("register Pet");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Dog>("Dog")
        .default_constructor(move || {
            bump(&c.dog);
            Dog
        })
        .expect("Dog()")
        .implements(&ANIMAL, |dog| dog)
        .build()
        .expect("register Dog");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Cat>("Cat")
        .constructor(vec![ParamEntry::optional("name", "Unnamed")], move |args| {
            bump(&c.cat);
            Ok(Cat {
                name: args.string(0)?.to_string(),
            })
        })
        .expect("Cat(name)")
        .implements(&ANIMAL, |cat| cat)
        .build()
        .expect("register Cat");

    let (zero, defaulted) = (Arc::clone(&calls), Arc::clone(&calls));
    registry
        .register_class::<Parrot>("Parrot")
        .constructor(vec![ParamEntry::optional("words", 10)], move |args| {
            bump(&defaulted.parrot_defaulted);
            Ok(Parrot {
                words: args.int(0)?,
            })
        })
        .expect("Parrot(words)")
        .default_constructor(move || {
            bump(&zero.parrot_zero);
            Parrot { words: 0 }
        })
        .expect("Parrot()")
        .implements(&ANIMAL, |parrot| parrot)
        .build()
        .expect("register Parrot");

    let (c1, c2, c3) = (Arc::clone(&calls), Arc::clone(&calls), Arc::clone(&calls));
    registry
        .register_class::<Horse>("Horse")
        .constructor(
            vec![
                ParamEntry::optional("name", "Silver"),
                ParamEntry::optional("speed", 1.5),
            ],
            move |_| {
                bump(&c1.horse);
                Ok(Horse { arity: 2 })
            },
        )
        .expect("Horse(name, speed)")
        .constructor(
            vec![ParamEntry::required("rider", ValueKind::String)],
            move |_| {
                bump(&c2.horse);
                Ok(Horse { arity: 0 })
            },
        )
        .expect("Horse(rider)")
        .constructor(vec![ParamEntry::optional("wild", true)], move |_| {
            bump(&c3.horse);
            Ok(Horse { arity: 1 })
        })
        .expect("Horse(wild)")
        .implements(&ANIMAL, |horse| horse)
        .build()
        .expect("register Horse");

    registry
        .register_class::<Fish>("Fish")
        .constructor(
            vec![ParamEntry::required("species", ValueKind::String)],
            |args| {
                Ok(Fish {
                    species: args.string(0)?.to_string(),
                })
            },
        )
        .expect("Fish(species)")
        .implements(&ANIMAL, |fish| fish)
        .build()
        .expect("register Fish");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Ghost>("Ghost")
        .constructor_with_visibility(Visibility::Private, Vec::new(), move |_| {
            bump(&c.ghost);
            Ok(Ghost)
        })
        .expect("Ghost()")
        .implements(&ANIMAL, |ghost| ghost)
        .build()
        .expect("register Ghost");

    registry
        .register_class::<Phoenix>("Phoenix")
        .constructor(Vec::new(), |_| {
            Err(ConstructionError::failed("ashes are still warm"))
        })
        .expect("Phoenix()")
        .implements(&ANIMAL, |phoenix| phoenix)
        .build()
        .expect("register Phoenix");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Mammal>("Mammal")
        .default_constructor(move || {
            bump(&c.mammal);
            Mammal
        })
        .expect("Mammal()")
        .implements(&ANIMAL, |mammal| mammal)
        .as_abstract()
        .build()
        .expect("register Mammal");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Puppy>("Puppy")
        .default_constructor(move || {
            bump(&c.puppy);
            Puppy
        })
        .expect("Puppy()")
        .implements(&PET, |puppy| puppy)
        .build()
        .expect("register Puppy");

    let c = Arc::clone(&calls);
    registry
        .register_class::<Rock>("Rock")
        .default_constructor(move || {
            bump(&c.rock);
            Rock
        })
        .expect("Rock()")
        .build()
        .expect("register Rock");

    (registry, calls)
}
