//! Concurrent instantiation over a shared registry.

mod common;

use std::sync::Arc;
use std::thread;

use common::{ANIMAL, Calls, Cat, zoo};
use instantiator::{InstantiateError, Instantiator, TypeRegistry};

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn test_shared_registry_across_threads() {
    let (registry, calls) = zoo();
    let registry: Arc<TypeRegistry> = Arc::new(registry);

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let instantiator = Instantiator::new(registry.as_ref());
                let name = if i % 2 == 0 { "Dog" } else { "Cat" };
                for _ in 0..PER_THREAD {
                    let animal = instantiator
                        .instantiate_named(&ANIMAL, Some(name))
                        .expect("instantiate in worker");
                    if name == "Cat" {
                        let cat = animal.as_any().downcast_ref::<Cat>().expect("Cat");
                        assert_eq!(cat.name, "Unnamed");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let per_kind = THREADS / 2 * PER_THREAD;
    assert_eq!(Calls::get(&calls.dog), per_kind);
    assert_eq!(Calls::get(&calls.cat), per_kind);
}

#[test]
fn test_scoped_instantiator_shared_by_reference() {
    let (registry, calls) = zoo();
    let instantiator = Instantiator::new(&registry);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                let err = instantiator
                    .instantiate_named(&ANIMAL, Some("Rock"))
                    .err()
                    .expect("Rock is rejected");
                assert!(matches!(
                    err,
                    InstantiateError::TypeConstraintViolation { .. }
                ));
                assert!(instantiator.check_named(&ANIMAL, Some("Puppy")).is_ok());
            });
        }
    });

    assert_eq!(calls.total(), 0);
}
