//! Core traits for the validation system
//!
//! Every validator type is described by a static [`Descriptor`]: its short
//! name, arity, whether it reads raw attribute values, its error-code table,
//! and a constructor that checks parameters. Built validators implement
//! [`Validator`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use crate::foundation::{BuildError, CheckResult, Failure, Params};

/// Constructor stored in a [`Descriptor`].
///
/// Receives the declared parameters and returns a ready validator, or a
/// [`BuildError`] when parameters are missing or mis-shaped.
pub type BuildFn = fn(&Params) -> Result<Arc<dyn Validator>, BuildError>;

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Static description of a validator type.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use ruleweave_validator::foundation::{BuildError, Descriptor, Failure, Params, Validator};
/// use serde_json::Value;
///
/// pub static UPPERCASE: Descriptor = Descriptor {
///     name: "Uppercase",
///     inputs: 1,
///     raw: false,
///     error_codes: &[("not_uppercase", "must be upper case")],
///     build: |_| Ok(Arc::new(Uppercase)),
/// };
///
/// #[derive(Debug)]
/// struct Uppercase;
///
/// impl Validator for Uppercase {
///     fn descriptor(&self) -> &'static Descriptor {
///         &UPPERCASE
///     }
///
///     fn check(&self, values: &[&Value]) -> Result<(), Failure> {
///         match values.first().and_then(|v| v.as_str()) {
///             Some(s) if s.chars().any(char::is_lowercase) => {
///                 Err(UPPERCASE.failure("not_uppercase"))
///             }
///             _ => Ok(()),
///         }
///     }
/// }
/// ```
#[derive(Clone, Copy)]
pub struct Descriptor {
    /// Unique short name, the registry key.
    pub name: &'static str,
    /// Number of values the validator takes.
    pub inputs: usize,
    /// Whether the validator reads the attribute before type coercion.
    pub raw: bool,
    /// `(error_code, message_template)` pairs.
    pub error_codes: &'static [(&'static str, &'static str)],
    /// Checks parameters and constructs the validator.
    pub build: BuildFn,
}

impl Descriptor {
    /// Message template for an error code.
    pub fn message(&self, code: &str) -> Option<&'static str> {
        self.error_codes
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, message)| *message)
    }

    /// Builds a failure for `code` with no message arguments.
    pub fn failure(&self, code: &'static str) -> Failure {
        self.failure_with(code, std::iter::empty())
    }

    /// Builds a failure for `code`, filling the template positionally.
    ///
    /// Codes missing from the table fall back to the code itself as message.
    pub fn failure_with<I>(&self, code: &'static str, args: I) -> Failure
    where
        I: IntoIterator<Item = String>,
    {
        debug_assert!(
            self.message(code).is_some(),
            "unknown error code {code} for validator {}",
            self.name
        );
        let template = self.message(code).unwrap_or(code);
        Failure::new(self.name, code, template, args.into_iter().collect::<SmallVec<_>>())
    }

    /// Checks that `given` values match the declared inputs.
    ///
    /// A validator bound to nothing cannot report against any attribute, so
    /// zero is rejected even when the descriptor declares zero inputs.
    pub fn check_arity(&self, given: usize) -> Result<(), BuildError> {
        if given == 0 {
            return Err(BuildError::EmptyBinding(self.name));
        }
        if given != self.inputs {
            return Err(BuildError::ArityMismatch {
                validator: self.name,
                expected: self.inputs,
                given,
            });
        }
        Ok(())
    }

    /// Constructs the validator with the given parameters.
    pub fn build(&self, params: &Params) -> Result<Arc<dyn Validator>, BuildError> {
        (self.build)(params)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("raw", &self.raw)
            .field("error_codes", &self.error_codes)
            .finish()
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Descriptor {}

// ============================================================================
// VALIDATOR TRAIT
// ============================================================================

/// A built, parameterized validator.
///
/// `check` is pure: each call returns its own result and no error state is
/// kept between calls, so one instance can be shared across records and
/// threads.
pub trait Validator: fmt::Debug + Send + Sync {
    /// The static description of this validator's type.
    fn descriptor(&self) -> &'static Descriptor;

    /// Validates the given values.
    ///
    /// The value count is not checked here: callers supply exactly
    /// `descriptor().inputs` values, verified with
    /// [`Descriptor::check_arity`]. [`Validation`](crate::validation::Validation)
    /// and [`ValidatorInstance`](crate::foundation::ValidatorInstance) do
    /// this for you. Built-in validators read a missing value as `Null`.
    fn check(&self, values: &[&Value]) -> CheckResult;

    /// Short name of the validator type.
    fn name(&self) -> &'static str {
        self.descriptor().name
    }
}
