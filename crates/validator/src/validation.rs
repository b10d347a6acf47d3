//! Validation: one validator bound to record attributes

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use crate::foundation::error::is_identifier;
use crate::foundation::{BuildError, BuildResult, CheckResult, Params, Validator};
use crate::record::Record;
use crate::registry::ValidatorRegistry;

/// A validator bound to one or more attributes of a record.
///
/// Built once and immutable afterwards; [`run`](Self::run) may be called
/// any number of times against any number of records.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::prelude::*;
///
/// let length = Validation::new("Length", ["title"], Params::new().with("length", 1..=50))?;
/// let confirm = Validation::new("ValueMatch", ["password", "password_confirm"], Params::new())?;
/// ```
#[derive(Clone)]
pub struct Validation {
    validator: Arc<dyn Validator>,
    attributes: SmallVec<[String; 2]>,
    params: Params,
}

impl Validation {
    /// Binds a built-in validator, resolved through the shared registry.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] when the validator name is not an identifier
    /// or not registered, an attribute name is not an identifier, the
    /// number of attributes differs from the validator's inputs, or the
    /// parameters are rejected.
    pub fn new<I, S>(validator: &str, attributes: I, params: Params) -> BuildResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_registry(&ValidatorRegistry::shared(), validator, attributes, params)
    }

    /// Binds a validator resolved through `registry`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_registry<I, S>(
        registry: &ValidatorRegistry,
        validator: &str,
        attributes: I,
        params: Params,
    ) -> BuildResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !is_identifier(validator) {
            return Err(BuildError::InvalidIdentifier(validator.to_string()));
        }
        let descriptor = registry
            .resolve(validator)
            .ok_or_else(|| BuildError::UnknownValidator(validator.to_string()))?;

        let attributes = attributes
            .into_iter()
            .map(|attribute| {
                let attribute = attribute.into();
                if is_identifier(&attribute) {
                    Ok(attribute)
                } else {
                    Err(BuildError::InvalidAttribute(attribute))
                }
            })
            .collect::<BuildResult<SmallVec<[String; 2]>>>()?;

        descriptor.check_arity(attributes.len())?;

        let validator = descriptor.build(&params)?;
        Ok(Self {
            validator,
            attributes,
            params,
        })
    }

    /// Short name of the bound validator.
    pub fn name(&self) -> &'static str {
        self.validator.name()
    }

    /// The bound attributes, in declaration order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Parameters the validator was built with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The built validator.
    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    /// Reads the bound attributes and runs the validator, without touching
    /// the record's report.
    pub fn check<R>(&self, record: &R) -> CheckResult
    where
        R: Record + ?Sized,
    {
        let raw = self.validator.descriptor().raw;
        let values: SmallVec<[Cow<'_, Value>; 2]> = self
            .attributes
            .iter()
            .map(|name| {
                if raw {
                    record.read_attribute_before_type_cast(name)
                } else {
                    record.read_attribute(name)
                }
            })
            .collect();
        let refs: SmallVec<[&Value; 2]> = values.iter().map(|value| &**value).collect();
        debug_assert_eq!(refs.len(), self.validator.descriptor().inputs);

        self.validator.check(&refs)
    }

    /// Runs the validation, recording one failure entry in the record's
    /// report when the validator rejects the values.
    pub fn run<R>(&self, record: &mut R) -> bool
    where
        R: Record + ?Sized,
    {
        match self.check(&*record) {
            Ok(()) => true,
            Err(failure) => {
                tracing::trace!(
                    validator = failure.validator,
                    code = failure.code,
                    attributes = ?self.attributes,
                    "validation failed"
                );
                record
                    .failed_validators()
                    .add_failure(self.attributes.as_slice(), failure);
                false
            }
        }
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("validator", &self.name())
            .field("attributes", &self.attributes)
            .field("params", &self.params)
            .finish()
    }
}
