//! Inclusion and exclusion validators
//!
//! Both check membership in a range or an explicit set, with opposite
//! outcomes. Range membership uses [`compare`]; values that cannot be
//! ordered against the bounds are not members.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::value::{compare, first, same, to_text};
use crate::foundation::{BuildError, BuildResult, Descriptor, Failure, Param, Params, Validator};

// ============================================================================
// MEMBERSHIP
// ============================================================================

/// A range or set that values are tested against.
#[derive(Debug, Clone, PartialEq)]
pub enum Membership {
    /// Inclusive range.
    Range {
        /// Lower bound.
        min: Value,
        /// Upper bound.
        max: Value,
    },
    /// Explicit set, in declaration order.
    Set(Vec<Value>),
}

impl Membership {
    /// Reads a membership parameter. Arrays given as plain values count as sets.
    fn from_param(
        validator: &'static str,
        name: &'static str,
        params: &Params,
    ) -> BuildResult<Self> {
        match params.require(validator, name)? {
            Param::Range { min, max } => Ok(Self::Range {
                min: min.clone(),
                max: max.clone(),
            }),
            Param::Set(items) => Ok(Self::Set(items.clone())),
            Param::Value(Value::Array(items)) => Ok(Self::Set(items.clone())),
            other => Err(BuildError::InvalidParam {
                validator,
                param: name,
                expected: "a range or a set",
                given: other.kind(),
            }),
        }
    }

    /// Returns `true` if `value` is a member.
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Self::Range { min, max } => {
                matches!(compare(min, value), Some(Ordering::Less | Ordering::Equal))
                    && matches!(compare(value, max), Some(Ordering::Less | Ordering::Equal))
            }
            Self::Set(items) => items.iter().any(|item| same(item, value)),
        }
    }

    /// Message arguments: both bounds for a range, the joined elements for a set.
    fn message_args(&self) -> Vec<String> {
        match self {
            Self::Range { min, max } => vec![to_text(min).into_owned(), to_text(max).into_owned()],
            Self::Set(items) => {
                let joined = items.iter().map(to_text).collect::<Vec<_>>().join(", ");
                vec![joined]
            }
        }
    }

    fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

// ============================================================================
// INCLUSION
// ============================================================================

/// Descriptor for [`Inclusion`].
pub static INCLUSION: Descriptor = Descriptor {
    name: "Inclusion",
    inputs: 1,
    raw: false,
    error_codes: &[
        ("not_in_range", "must be between %s and %s"),
        ("not_in_set", "must be one of: %s"),
    ],
    build: Inclusion::build,
};

/// Validates that a value is a member of the `in` range or set.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::foundation::Params;
/// use ruleweave_validator::validators::INCLUSION;
/// use serde_json::json;
///
/// let v = INCLUSION.build(&Params::new().with("in", 0..=10))?;
/// assert_eq!(v.check(&[&json!(15)]).unwrap_err().message, "must be between 0 and 10");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Inclusion {
    members: Membership,
}

impl Inclusion {
    /// Creates an inclusion validator.
    pub fn new(members: Membership) -> Self {
        Self { members }
    }

    fn build(params: &Params) -> BuildResult<Arc<dyn Validator>> {
        let members = Membership::from_param(INCLUSION.name, "in", params)?;
        Ok(Arc::new(Self::new(members)))
    }
}

impl Validator for Inclusion {
    fn descriptor(&self) -> &'static Descriptor {
        &INCLUSION
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let value = first(values);
        if value.is_null() || self.members.contains(value) {
            return Ok(());
        }

        let code = if self.members.is_range() {
            "not_in_range"
        } else {
            "not_in_set"
        };
        Err(INCLUSION.failure_with(code, self.members.message_args()))
    }
}

// ============================================================================
// EXCLUSION
// ============================================================================

/// Descriptor for [`Exclusion`].
pub static EXCLUSION: Descriptor = Descriptor {
    name: "Exclusion",
    inputs: 1,
    raw: false,
    error_codes: &[
        ("in_range", "must not be between %s and %s"),
        ("in_set", "must not be any of: %s"),
    ],
    build: Exclusion::build,
};

/// Validates that a value is not a member of the `not_in` range or set.
/// The opposite of [`Inclusion`].
#[derive(Debug, Clone, PartialEq)]
pub struct Exclusion {
    members: Membership,
}

impl Exclusion {
    /// Creates an exclusion validator.
    pub fn new(members: Membership) -> Self {
        Self { members }
    }

    fn build(params: &Params) -> BuildResult<Arc<dyn Validator>> {
        let members = Membership::from_param(EXCLUSION.name, "not_in", params)?;
        Ok(Arc::new(Self::new(members)))
    }
}

impl Validator for Exclusion {
    fn descriptor(&self) -> &'static Descriptor {
        &EXCLUSION
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let value = first(values);
        if value.is_null() || !self.members.contains(value) {
            return Ok(());
        }

        let code = if self.members.is_range() { "in_range" } else { "in_set" };
        Err(EXCLUSION.failure_with(code, self.members.message_args()))
    }
}
