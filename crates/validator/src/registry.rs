use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::foundation::{BuildError, Descriptor, Params, Validator, ValidatorInstance};
use crate::validators::BUILTINS;

static SHARED: LazyLock<Arc<ValidatorRegistry>> =
    LazyLock::new(|| Arc::new(ValidatorRegistry::builtin()));

/// Registration table mapping short names to validator descriptors.
///
/// Validations resolve their validator here once, when they are declared.
/// Chains hold an `Arc` to the registry they were built against and hand it
/// down to nested chains.
///
/// # Example
///
/// ```rust,ignore
/// use ruleweave_validator::foundation::Params;
/// use ruleweave_validator::registry::ValidatorRegistry;
///
/// let mut registry = ValidatorRegistry::builtin();
/// registry.register(&UPPERCASE);
///
/// assert!(registry.resolve("Presence").is_some());
/// assert!(registry.resolve("Uppercase").is_some());
/// let validator = registry.build("Length", &Params::new().with("length", 4..=10))?;
/// ```
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    descriptors: HashMap<&'static str, &'static Descriptor>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in validator.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in BUILTINS {
            registry.register(descriptor);
        }
        registry
    }

    /// The process-wide built-in registry, created on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Register a validator type. Overwrites any existing entry with the same name.
    pub fn register(&mut self, descriptor: &'static Descriptor) {
        self.descriptors.insert(descriptor.name, descriptor);
    }

    /// Look up a validator type by short name.
    pub fn resolve(&self, name: &str) -> Option<&'static Descriptor> {
        self.descriptors.get(name).copied()
    }

    /// Resolve and construct a validator.
    pub fn build(&self, name: &str, params: &Params) -> Result<Arc<dyn Validator>, BuildError> {
        self.resolve(name)
            .ok_or_else(|| BuildError::UnknownValidator(name.to_string()))?
            .build(params)
    }

    /// Resolve and construct a validator wrapped with last-error state.
    pub fn instantiate(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<ValidatorInstance, BuildError> {
        self.build(name, params).map(ValidatorInstance::new)
    }

    /// Check whether a validator with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Remove a validator by name. Returns the removed descriptor, if any.
    pub fn unregister(&mut self, name: &str) -> Option<&'static Descriptor> {
        self.descriptors.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.descriptors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("count", &self.descriptors.len())
            .field("names", &self.names())
            .finish()
    }
}
