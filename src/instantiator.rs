//! The instantiate operation.
//!
//! An [`Instantiator`] borrows a [`TypeIntrospector`] and builds instances
//! of registered classes, returned as the required type `T`:
//!
//! 1. The candidate must be present.
//! 2. The required token and the candidate must be registered, and the
//!    token's `T` must be the Rust type registered under its name.
//! 3. The candidate must be `T` or a subtype of `T`, and every upcast on
//!    the way must convert between the Rust types registered at its ends.
//! 4. A zero-argument constructor is preferred; otherwise the accessible
//!    constructor with every parameter defaulted and the fewest parameters.
//!
//! All four steps finish before any constructor body runs.

use tracing::{debug, trace};

use instantiator_core::{
    ConstructionError, ConstructionStrategy, InstantiateError, InstantiatorConfig,
    ResolvedConstructor, TypeDescriptor, TypeHash, TypeIntrospector, TypeToken, Upcast, Value,
};

/// What an instantiation would do, without doing it.
///
/// Returned by [`Instantiator::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlan {
    /// The candidate type.
    pub candidate: TypeHash,
    pub candidate_name: String,
    /// Which constructor strategy would be used.
    pub strategy: ConstructionStrategy,
    /// Hash of the chosen constructor.
    pub constructor: TypeHash,
    /// Arguments the constructor would receive.
    pub arguments: Vec<Value>,
    /// Number of upcasts from the candidate to the required type.
    pub upcast_steps: usize,
}

/// Validated candidate, ready to construct.
struct Prepared<'i> {
    candidate: TypeDescriptor<'i>,
    path: Vec<&'i Upcast>,
    constructor: ResolvedConstructor<'i>,
}

/// Type-constrained object factory over a [`TypeIntrospector`].
///
/// Holds no state between calls; the same instantiator may be used from
/// several threads when the introspector is `Sync`.
#[derive(Debug)]
pub struct Instantiator<'i, I: TypeIntrospector + ?Sized> {
    introspector: &'i I,
    config: InstantiatorConfig,
}

impl<I: TypeIntrospector + ?Sized> Clone for Instantiator<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: TypeIntrospector + ?Sized> Copy for Instantiator<'_, I> {}

impl<'i, I: TypeIntrospector + ?Sized> Instantiator<'i, I> {
    /// Create an instantiator with the default configuration.
    pub fn new(introspector: &'i I) -> Self {
        Self::with_config(introspector, InstantiatorConfig::default())
    }

    pub fn with_config(introspector: &'i I, config: InstantiatorConfig) -> Self {
        Self {
            introspector,
            config,
        }
    }

    pub fn config(&self) -> &InstantiatorConfig {
        &self.config
    }

    /// Construct a new instance of `candidate`, returned as `T`.
    ///
    /// # Errors
    ///
    /// - [`InstantiateError::NullCandidate`] if `candidate` is `None`
    /// - [`InstantiateError::UnknownRequiredType`] or
    ///   [`InstantiateError::RequiredTypeMismatch`] if `required` does not
    ///   name a type registered as `T`
    /// - [`InstantiateError::UnknownType`] if `candidate` is not registered
    /// - [`InstantiateError::TypeConstraintViolation`] if `candidate` is not
    ///   `T` or a subtype of `T`
    /// - [`InstantiateError::Construction`] if no usable constructor exists
    ///   or the constructor fails
    ///
    /// No constructor runs unless every check passes.
    pub fn instantiate<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<TypeHash>,
    ) -> Result<Box<T>, InstantiateError> {
        let prepared = self.prepare(required, candidate)?;
        let type_name = prepared.candidate.name;

        let mut instance = prepared
            .constructor
            .invoke()
            .map_err(|source| InstantiateError::construction(type_name, source))?;
        for step in &prepared.path {
            instance = step
                .apply(instance)
                .map_err(|source| InstantiateError::construction(type_name, source))?;
        }

        let value = instance.downcast::<T>().map_err(|_| {
            InstantiateError::construction(
                type_name,
                ConstructionError::UpcastMismatch {
                    from: prepared.candidate.hash,
                    to: required.hash(),
                },
            )
        })?;

        debug!(
            candidate = type_name,
            required = required.name(),
            strategy = %prepared.constructor.strategy(),
            upcasts = prepared.path.len(),
            "instantiated"
        );
        Ok(value)
    }

    /// Like [`instantiate`](Self::instantiate), with the candidate given by
    /// qualified name.
    pub fn instantiate_named<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<&str>,
    ) -> Result<Box<T>, InstantiateError> {
        let candidate = self.lookup_named(required, candidate)?;
        self.instantiate(required, Some(candidate))
    }

    /// Run every check of [`instantiate`](Self::instantiate) and report the
    /// constructor that would be used. No constructor is invoked.
    pub fn check<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<TypeHash>,
    ) -> Result<ResolvedPlan, InstantiateError> {
        let prepared = self.prepare(required, candidate)?;
        Ok(ResolvedPlan {
            candidate: prepared.candidate.hash,
            candidate_name: prepared.candidate.name.to_string(),
            strategy: prepared.constructor.strategy(),
            constructor: prepared.constructor.constructor().func_hash,
            arguments: prepared.constructor.arguments().to_vec(),
            upcast_steps: prepared.path.len(),
        })
    }

    /// [`check`](Self::check) with the candidate given by qualified name.
    pub fn check_named<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<&str>,
    ) -> Result<ResolvedPlan, InstantiateError> {
        let candidate = self.lookup_named(required, candidate)?;
        self.check(required, Some(candidate))
    }

    fn lookup_named<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<&str>,
    ) -> Result<TypeHash, InstantiateError> {
        let name = candidate.ok_or_else(|| InstantiateError::NullCandidate {
            required: required.name().to_string(),
        })?;
        self.introspector
            .lookup(name)
            .map(|descriptor| descriptor.hash)
            .ok_or_else(|| InstantiateError::UnknownType(name.to_string()))
    }

    fn prepare<T: ?Sized + 'static>(
        &self,
        required: &TypeToken<T>,
        candidate: Option<TypeHash>,
    ) -> Result<Prepared<'i>, InstantiateError> {
        let introspector = self.introspector;

        let candidate = candidate.ok_or_else(|| InstantiateError::NullCandidate {
            required: required.name().to_string(),
        })?;

        let required_type = introspector
            .describe(required.hash())
            .ok_or_else(|| InstantiateError::UnknownRequiredType(required.name().to_string()))?;
        if !required_type.is_rust_type::<T>() {
            return Err(InstantiateError::RequiredTypeMismatch {
                required: required.name().to_string(),
            });
        }

        let candidate_type = introspector
            .describe(candidate)
            .ok_or_else(|| InstantiateError::UnknownType(candidate.to_string()))?;

        let path = introspector
            .upcast_path(candidate, required_type.hash)
            .ok_or_else(|| InstantiateError::TypeConstraintViolation {
                candidate: candidate_type.name.to_string(),
                required: required_type.name.to_string(),
            })?;
        if let Some(step) = path.iter().find(|step| !edge_is_well_typed(introspector, step)) {
            return Err(InstantiateError::construction(
                candidate_type.name,
                ConstructionError::UpcastMismatch {
                    from: step.from,
                    to: step.to,
                },
            ));
        }
        trace!(
            candidate = candidate_type.name,
            required = required_type.name,
            upcasts = path.len(),
            "type constraint satisfied"
        );

        let constructor = introspector
            .resolve_constructor(candidate, &self.config)
            .map_err(|source| InstantiateError::construction(candidate_type.name, source))?;

        Ok(Prepared {
            candidate: candidate_type,
            path,
            constructor,
        })
    }
}

/// Both ends of `step` are registered as the Rust types its conversion uses.
fn edge_is_well_typed<I: TypeIntrospector + ?Sized>(introspector: &I, step: &Upcast) -> bool {
    let registered_as = |ty: TypeHash| introspector.describe(ty).map(|d| d.rust_type);
    registered_as(step.from) == Some(step.source_type)
        && registered_as(step.to) == Some(step.target_type)
}

/// Instantiate with a default-configured [`Instantiator`].
pub fn instantiate<T, I>(
    introspector: &I,
    required: &TypeToken<T>,
    candidate: Option<TypeHash>,
) -> Result<Box<T>, InstantiateError>
where
    T: ?Sized + 'static,
    I: TypeIntrospector + ?Sized,
{
    Instantiator::new(introspector).instantiate(required, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use instantiator_core::ParamEntry;
    use instantiator_registry::TypeRegistry;

    trait Greeter {
        fn greet(&self) -> String;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Custom(String);
    impl Greeter for Custom {
        fn greet(&self) -> String {
            self.0.clone()
        }
    }

    struct Stone;

    const GREETER: TypeToken<dyn Greeter> = TypeToken::new("Greeter");

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register_interface::<dyn Greeter>("Greeter")
            .build()
            .unwrap();
        registry
            .register_class::<English>("English")
            .default_constructor(|| English)
            .unwrap()
            .implements(&GREETER, |g| g)
            .build()
            .unwrap();
        registry
            .register_class::<Custom>("Custom")
            .constructor(vec![ParamEntry::optional("text", "hi")], |args| {
                Ok(Custom(args.string(0)?.to_string()))
            })
            .unwrap()
            .implements(&GREETER, |g| g)
            .build()
            .unwrap();
        registry
            .register_class::<Stone>("Stone")
            .default_constructor(|| Stone)
            .unwrap()
            .build()
            .unwrap();
        registry
    }

    #[test]
    fn instantiate_zero_argument() {
        let registry = registry();
        let greeter = Instantiator::new(&registry)
            .instantiate(&GREETER, Some(TypeHash::from_name("English")))
            .unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn instantiate_defaulted() {
        let registry = registry();
        let greeter = Instantiator::new(&registry)
            .instantiate_named(&GREETER, Some("Custom"))
            .unwrap();
        assert_eq!(greeter.greet(), "hi");
    }

    #[test]
    fn null_candidate() {
        let registry = registry();
        let err = instantiate(&registry, &GREETER, None).err().unwrap();
        assert_eq!(
            err,
            InstantiateError::NullCandidate {
                required: "Greeter".to_string()
            }
        );
    }

    #[test]
    fn constraint_violation_message() {
        let registry = registry();
        let err = Instantiator::new(&registry)
            .instantiate_named(&GREETER, Some("Stone"))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Stone is not a type or subtype of Greeter");
    }

    #[test]
    fn unknown_named_candidate() {
        let registry = registry();
        let err = Instantiator::new(&registry)
            .instantiate_named(&GREETER, Some("French"))
            .err()
            .unwrap();
        assert_eq!(err, InstantiateError::UnknownType("French".to_string()));
    }

    #[test]
    fn token_rust_type_must_match_registration() {
        trait Other {}
        const WRONG: TypeToken<dyn Other> = TypeToken::new("Greeter");

        let registry = registry();
        let err = Instantiator::new(&registry)
            .instantiate(&WRONG, Some(TypeHash::from_name("English")))
            .err()
            .unwrap();
        assert_eq!(
            err,
            InstantiateError::RequiredTypeMismatch {
                required: "Greeter".to_string()
            }
        );
    }

    #[test]
    fn check_reports_plan() {
        let registry = registry();
        let instantiator = Instantiator::new(&registry);

        let plan = instantiator.check_named(&GREETER, Some("Custom")).unwrap();
        assert_eq!(plan.candidate_name, "Custom");
        assert_eq!(plan.strategy, ConstructionStrategy::AllParametersDefaulted);
        assert_eq!(plan.arguments, vec![Value::from("hi")]);
        assert_eq!(plan.upcast_steps, 1);

        let plan = instantiator.check_named(&GREETER, Some("English")).unwrap();
        assert_eq!(plan.strategy, ConstructionStrategy::ZeroArgument);
        assert!(plan.arguments.is_empty());
    }

    #[test]
    fn config_is_kept() {
        let registry = registry();
        let config = InstantiatorConfig::zero_argument_only();
        let instantiator = Instantiator::with_config(&registry, config);
        assert_eq!(instantiator.config(), &config);

        let err = instantiator
            .instantiate_named(&GREETER, Some("Custom"))
            .err()
            .unwrap();
        assert_eq!(
            err.construction_error(),
            Some(&ConstructionError::NoDefaultConstructor("Custom".to_string()))
        );
    }
}
