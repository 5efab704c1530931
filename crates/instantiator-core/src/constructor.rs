//! Constructor metadata and resolution.
//!
//! A [`ConstructorEntry`] pairs a parameter list with a type-erased
//! constructor function. [`select_constructor`] picks the entry an
//! instantiation will use, producing a [`ResolvedConstructor`]:
//!
//! 1. An accessible zero-argument constructor, if one exists.
//! 2. Otherwise an accessible constructor whose every parameter has a
//!    default, invoked with those defaults. Fewest parameters wins; ties go
//!    to the earliest registered.
//! 3. Otherwise [`ConstructionError::NoDefaultConstructor`].
//!
//! Constructors with any required parameter are never selected.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{
    Args, ConstructionError, Instance, InstantiatorConfig, TypeHash, Value, ValueKind, Visibility,
};

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    /// Parameter name.
    pub name: String,
    /// Parameter kind.
    pub kind: ValueKind,
    /// Default value, if the parameter is optional.
    pub default: Option<Value>,
}

impl ParamEntry {
    pub fn new(name: impl Into<String>, kind: ValueKind, default: Option<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
        }
    }

    /// A parameter the caller must supply.
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(name, kind, None)
    }

    /// A parameter with a default; its kind is taken from the default.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        let default = default.into();
        Self::new(name, default.kind(), Some(default))
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Display for ParamEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

type ConstructorFn = dyn Fn(&Args<'_>) -> Result<Instance, ConstructionError> + Send + Sync;

/// A registered constructor.
#[derive(Clone)]
pub struct ConstructorEntry {
    /// Constructor identity (owner + parameter kinds).
    pub func_hash: TypeHash,
    /// The type this constructor builds.
    pub owner: TypeHash,
    /// Declared parameters.
    pub params: Vec<ParamEntry>,
    /// Constructor visibility.
    pub visibility: Visibility,
    func: Arc<ConstructorFn>,
}

impl ConstructorEntry {
    /// Create a constructor entry for `owner` from a typed constructor body.
    pub fn new<C, F>(
        owner: TypeHash,
        params: Vec<ParamEntry>,
        visibility: Visibility,
        body: F,
    ) -> Self
    where
        C: 'static,
        F: Fn(&Args<'_>) -> Result<C, ConstructionError> + Send + Sync + 'static,
    {
        let param_hashes: Vec<TypeHash> = params.iter().map(|p| p.kind.type_hash()).collect();
        let func_hash = TypeHash::from_constructor(owner, &param_hashes);
        let func = move |args: &Args<'_>| {
            body(args).map(|value| Instance::new(owner, Box::new(value)))
        };
        Self {
            func_hash,
            owner,
            params,
            visibility,
            func: Arc::new(func),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_zero_argument(&self) -> bool {
        self.params.is_empty()
    }

    /// At least one parameter, and every parameter has a default.
    pub fn is_all_defaulted(&self) -> bool {
        !self.params.is_empty() && self.params.iter().all(ParamEntry::has_default)
    }

    /// The "use default for every parameter" binding, if one exists.
    pub fn defaults(&self) -> Option<Vec<Value>> {
        self.params.iter().map(|p| p.default.clone()).collect()
    }

    /// Rendered parameter list, e.g. `(string name = "Unnamed")`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("({})", params.join(", "))
    }

    /// Run the constructor with explicit arguments.
    ///
    /// Argument count and kinds are checked against the declared parameters
    /// before the body runs.
    pub fn invoke(&self, args: &[Value]) -> Result<Instance, ConstructionError> {
        if args.len() != self.params.len() {
            return Err(ConstructionError::ArgumentCount {
                expected: self.params.len(),
                found: args.len(),
            });
        }
        for (index, (param, arg)) in self.params.iter().zip(args).enumerate() {
            if param.kind != arg.kind() {
                return Err(ConstructionError::ArgumentType {
                    index,
                    expected: param.kind,
                    found: arg.kind(),
                });
            }
        }
        (self.func)(&Args::new(args))
    }
}

impl fmt::Debug for ConstructorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorEntry")
            .field("func_hash", &self.func_hash)
            .field("owner", &self.owner)
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Which constructor strategy an instantiation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructionStrategy {
    ZeroArgument,
    AllParametersDefaulted,
}

impl fmt::Display for ConstructionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionStrategy::ZeroArgument => write!(f, "zero-argument"),
            ConstructionStrategy::AllParametersDefaulted => write!(f, "all-parameters-defaulted"),
        }
    }
}

/// A constructor chosen for an instantiation, with its argument binding.
#[derive(Debug, Clone)]
pub enum ResolvedConstructor<'a> {
    /// A constructor with no parameters.
    ZeroArgument(&'a ConstructorEntry),
    /// A constructor invoked with the default of every parameter.
    AllParametersDefaulted {
        constructor: &'a ConstructorEntry,
        defaults: Vec<Value>,
    },
}

impl<'a> ResolvedConstructor<'a> {
    pub fn constructor(&self) -> &'a ConstructorEntry {
        match self {
            ResolvedConstructor::ZeroArgument(constructor) => constructor,
            ResolvedConstructor::AllParametersDefaulted { constructor, .. } => constructor,
        }
    }

    pub fn strategy(&self) -> ConstructionStrategy {
        match self {
            ResolvedConstructor::ZeroArgument(_) => ConstructionStrategy::ZeroArgument,
            ResolvedConstructor::AllParametersDefaulted { .. } => {
                ConstructionStrategy::AllParametersDefaulted
            }
        }
    }

    /// The bound arguments (empty for zero-argument constructors).
    pub fn arguments(&self) -> &[Value] {
        match self {
            ResolvedConstructor::ZeroArgument(_) => &[],
            ResolvedConstructor::AllParametersDefaulted { defaults, .. } => defaults,
        }
    }

    /// Invoke the chosen constructor with its binding.
    pub fn invoke(&self) -> Result<Instance, ConstructionError> {
        self.constructor().invoke(self.arguments())
    }
}

/// Pick the constructor for `type_name` from `constructors`.
///
/// Only constructors at or above `config.min_visibility` are considered.
/// The all-defaulted fallback is skipped when
/// `config.default_param_fallback` is off.
pub fn select_constructor<'a>(
    type_name: &str,
    constructors: &'a [ConstructorEntry],
    config: &InstantiatorConfig,
) -> Result<ResolvedConstructor<'a>, ConstructionError> {
    let min_visibility = config.min_visibility;
    let accessible = || {
        constructors
            .iter()
            .filter(move |c| c.visibility.is_at_least(min_visibility))
    };

    if let Some(constructor) = accessible().find(|c| c.is_zero_argument()) {
        trace!(type_name, "resolved zero-argument constructor");
        return Ok(ResolvedConstructor::ZeroArgument(constructor));
    }

    if config.default_param_fallback {
        // min_by_key keeps the first of equal minimums, so registration order breaks ties
        let fallback = accessible()
            .filter(|c| c.is_all_defaulted())
            .min_by_key(|c| c.arity());
        if let Some(constructor) = fallback
            && let Some(defaults) = constructor.defaults()
        {
            trace!(
                type_name,
                arity = constructor.arity(),
                "resolved all-defaulted constructor"
            );
            return Ok(ResolvedConstructor::AllParametersDefaulted {
                constructor,
                defaults,
            });
        }
    }

    Err(ConstructionError::NoDefaultConstructor(type_name.to_string()))
}
