//! Error types
//!
//! Two channels exist and never mix:
//!
//! - [`BuildError`]: programmer errors raised while constructing validators,
//!   validations and chains. They surface as `Err` from the builder APIs and
//!   never reach a failure report.
//! - [`Failure`]: a validator rejecting input data. Failures are plain
//!   values returned from [`Validator::check`](crate::foundation::Validator::check)
//!   and recorded in a [`FailureReport`](crate::report::FailureReport).

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// A structured validation failure produced by one validator invocation.
///
/// The message is rendered from the validator's error-code table; the
/// positional arguments that filled its placeholders are kept in `args`.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::validators::LENGTH;
///
/// let failure = LENGTH.failure_with("short", [4.to_string()]);
/// assert_eq!(failure.message, "has to be longer than 4 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Short name of the validator that failed, e.g. `"Presence"`.
    pub validator: &'static str,
    /// Error code from the validator's table, e.g. `"missing"`.
    pub code: &'static str,
    /// Rendered, human-readable message.
    pub message: Cow<'static, str>,
    /// Positional arguments used to render the message.
    pub args: SmallVec<[String; 2]>,
}

impl Failure {
    /// Creates a failure, rendering `template` with `args`.
    pub fn new(
        validator: &'static str,
        code: &'static str,
        template: &'static str,
        args: SmallVec<[String; 2]>,
    ) -> Self {
        Self {
            validator,
            code,
            message: render(template, &args),
            args,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.validator, self.message, self.code)
    }
}

impl std::error::Error for Failure {}

/// Fills `%s` / `%d` placeholders positionally. `%%` renders a literal `%`.
///
/// Templates without arguments are returned borrowed. Missing arguments
/// render as empty strings; surplus arguments are ignored.
pub fn render(template: &'static str, args: &[String]) -> Cow<'static, str> {
    if args.is_empty() {
        return Cow::Borrowed(template);
    }

    let extra: usize = args.iter().map(String::len).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s' | 'd') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    Cow::Owned(out)
}

// ============================================================================
// CONSTRUCTION ERRORS
// ============================================================================

/// Construction-time errors for validators, validations and chains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// No validator is registered under the name.
    #[error("unknown validator: {0}")]
    UnknownValidator(String),

    /// The validator name is not a valid identifier.
    #[error("validator name has to be an identifier, {0:?} given")]
    InvalidIdentifier(String),

    /// An attribute name is not a valid identifier.
    ///
    /// Attribute names are limited to letters, digits, `_`, `-` and `.`.
    /// Names with whitespace, `:` or other punctuation are rejected, so a
    /// host whose field names use them has to map them first.
    #[error("attribute name has to be an identifier, {0:?} given")]
    InvalidAttribute(String),

    /// The number of attributes or values does not match the validator's inputs.
    #[error("validator {validator} takes {expected} value(s) for validation, {given} given")]
    ArityMismatch {
        /// Validator short name.
        validator: &'static str,
        /// Inputs the validator declares.
        expected: usize,
        /// Inputs supplied.
        given: usize,
    },

    /// A validator was bound to no attributes or given no values.
    #[error("validator {0} needs at least one value for validation")]
    EmptyBinding(&'static str),

    /// A required parameter was not supplied.
    #[error("missing `{param}` parameter for {validator} validator")]
    MissingParam {
        /// Validator short name.
        validator: &'static str,
        /// Parameter name.
        param: &'static str,
    },

    /// A parameter was supplied with the wrong shape.
    #[error("the `{param}` parameter of the {validator} validator must be {expected}, {given} given")]
    InvalidParam {
        /// Validator short name.
        validator: &'static str,
        /// Parameter name.
        param: &'static str,
        /// What the validator accepts.
        expected: &'static str,
        /// What was supplied.
        given: &'static str,
    },

    /// A named format that the Format validator does not know.
    #[error("unknown format {0:?} in Format validator")]
    UnknownFormat(String),
}

/// Returns `true` for non-empty names made of letters, digits, `_`, `-` and `.`.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
