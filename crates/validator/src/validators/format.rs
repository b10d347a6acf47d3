//! Format validator

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::foundation::value::{first, to_text};
use crate::foundation::{
    BuildError, BuildResult, Descriptor, Failure, NamedFormat, Param, Params, Validator,
};

/// Descriptor for [`Format`].
pub static FORMAT: Descriptor = Descriptor {
    name: "Format",
    inputs: 1,
    raw: false,
    error_codes: &[
        ("not_email", "has to be a valid email address"),
        ("not_ip", "has to be a valid ip address"),
        ("not_alnum", "can only contain letters and numbers"),
        ("not_hex", "has to be a valid hexadecimal number"),
        ("wrong_format", "has to be in the correct format"),
    ],
    build: Format::build,
};

/// What a [`Format`] validator matches against.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// A pre-defined format, reported as `not_<name>`.
    Named(NamedFormat),
    /// A caller-supplied pattern, reported as `wrong_format`.
    Custom(Regex),
}

impl Matcher {
    fn regex(&self) -> &Regex {
        match self {
            Self::Named(format) => format.regex(),
            Self::Custom(regex) => regex,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Named(format) => format.error_code(),
            Self::Custom(_) => "wrong_format",
        }
    }
}

/// Validates that a value matches a named format or a custom pattern.
///
/// Scalars are matched against their plain text form, so `12` matches a
/// digits-only pattern. Arrays and objects never match.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::foundation::{NamedFormat, Params};
/// use ruleweave_validator::validators::FORMAT;
/// use serde_json::json;
///
/// let email = FORMAT.build(&Params::new().with("format", NamedFormat::Email))?;
/// assert!(email.check(&[&json!("adam@hipsnip.com")]).is_ok());
/// assert_eq!(email.check(&[&json!("peter@parker")]).unwrap_err().code, "not_email");
/// ```
#[derive(Debug, Clone)]
pub struct Format {
    matcher: Matcher,
}

impl Format {
    /// Matches one of the pre-defined formats.
    pub fn named(format: NamedFormat) -> Self {
        Self {
            matcher: Matcher::Named(format),
        }
    }

    /// Matches a custom pattern.
    pub fn pattern(regex: Regex) -> Self {
        Self {
            matcher: Matcher::Custom(regex),
        }
    }

    /// The configured matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    fn build(params: &Params) -> BuildResult<Arc<dyn Validator>> {
        let validator = match params.require(FORMAT.name, "format")? {
            Param::Format(format) => Self::named(*format),
            Param::Pattern(regex) => Self::pattern(regex.clone()),
            Param::Value(Value::String(name)) => Self::named(name.parse()?),
            other => {
                return Err(BuildError::InvalidParam {
                    validator: FORMAT.name,
                    param: "format",
                    expected: "a named format or a pattern",
                    given: other.kind(),
                });
            }
        };
        Ok(Arc::new(validator))
    }

    fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Array(_) | Value::Object(_) => false,
            scalar => self.matcher.regex().is_match(&to_text(scalar)),
        }
    }
}

impl Validator for Format {
    fn descriptor(&self) -> &'static Descriptor {
        &FORMAT
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let value = first(values);
        if value.is_null() || self.matches(value) {
            Ok(())
        } else {
            Err(FORMAT.failure(self.matcher.error_code()))
        }
    }
}
