//! Stateful validator handle
//!
//! [`ValidatorInstance`] wraps a built validator and remembers the outcome of
//! its most recent call, for callers that inspect `last_error` /
//! `last_error_code` after `validate` instead of consuming a `Result`.
//! Validations inside chains call [`Validator::check`] directly and never
//! touch this state.

use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{BuildError, Failure, Validator};

/// A validator together with its last-error state.
///
/// The state is scoped to this instance and overwritten at the start of
/// every [`validate`](Self::validate) call. Share the inner validator, not
/// the instance, across concurrent validations.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::registry::ValidatorRegistry;
/// use ruleweave_validator::foundation::Params;
/// use serde_json::json;
///
/// let mut presence = ValidatorRegistry::shared().instantiate("Presence", &Params::new())?;
/// assert!(!presence.validate(&[&json!("")])?);
/// assert_eq!(presence.last_error_code(), Some("empty"));
/// assert_eq!(presence.last_error(), Some("cannot be empty"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorInstance {
    validator: Arc<dyn Validator>,
    last_failure: Option<Failure>,
}

impl ValidatorInstance {
    /// Wraps a built validator.
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self {
            validator,
            last_failure: None,
        }
    }

    /// Short name of the wrapped validator.
    pub fn name(&self) -> &'static str {
        self.validator.name()
    }

    /// The wrapped validator.
    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    /// Runs the validator, returning whether the values passed.
    ///
    /// Both last-error fields are cleared first and set again only on
    /// failure. Supplying the wrong number of values is a [`BuildError`].
    pub fn validate(&mut self, values: &[&Value]) -> Result<bool, BuildError> {
        self.last_failure = None;

        self.validator.descriptor().check_arity(values.len())?;

        match self.validator.check(values) {
            Ok(()) => Ok(true),
            Err(failure) => {
                self.last_failure = Some(failure);
                Ok(false)
            }
        }
    }

    /// Rendered message of the last failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_failure.as_ref().map(|f| f.message.as_ref())
    }

    /// Error code of the last failure.
    pub fn last_error_code(&self) -> Option<&'static str> {
        self.last_failure.as_ref().map(|f| f.code)
    }

    /// The full last failure.
    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{Presence, ValueMatch};
    use serde_json::json;

    #[test]
    fn test_failure_sets_both_fields() {
        let mut instance = ValidatorInstance::new(Arc::new(Presence));
        assert!(!instance.validate(&[&Value::Null]).unwrap());
        assert_eq!(instance.last_error_code(), Some("missing"));
        assert_eq!(instance.last_error(), Some("must be provided"));
    }

    #[test]
    fn test_success_clears_previous_failure() {
        let mut instance = ValidatorInstance::new(Arc::new(Presence));
        assert!(!instance.validate(&[&json!("")]).unwrap());
        assert!(instance.validate(&[&json!("Bruce")]).unwrap());
        assert_eq!(instance.last_error_code(), None);
        assert_eq!(instance.last_error(), None);
    }

    #[test]
    fn test_arity_mismatch_is_an_error() {
        let mut instance = ValidatorInstance::new(Arc::new(ValueMatch));
        let err = instance.validate(&[&json!("batman")]).unwrap_err();
        assert_eq!(
            err,
            BuildError::ArityMismatch {
                validator: "ValueMatch",
                expected: 2,
                given: 1
            }
        );
        assert!(instance.last_failure().is_none());

        assert_eq!(
            instance.validate(&[]).unwrap_err(),
            BuildError::EmptyBinding("ValueMatch")
        );
    }

    #[test]
    fn test_too_many_values_for_single_input() {
        let mut instance = ValidatorInstance::new(Arc::new(Presence));
        let a = json!("my value1");
        let b = json!("my value2");
        let err = instance.validate(&[&a, &b]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validator Presence takes 1 value(s) for validation, 2 given"
        );
    }
}
