//! Length validator
//!
//! Length is measured in Unicode scalar values for strings, elements for
//! arrays, and entries for objects. Values without a length pass.

use std::sync::Arc;

use serde_json::Value;

use crate::foundation::value::{first, kind_name, length_of};
use crate::foundation::{BuildError, BuildResult, Descriptor, Failure, Param, Params, Validator};

/// Descriptor for [`Length`].
pub static LENGTH: Descriptor = Descriptor {
    name: "Length",
    inputs: 1,
    raw: false,
    error_codes: &[
        ("short", "has to be longer than %d characters"),
        ("long", "has to be %d characters or less"),
    ],
    build: Length::build,
};

const EXPECTED: &str = "a range of non-negative integers";

/// Validates that a value's length lies within an inclusive range.
///
/// Requires a `length` range parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Length {
    /// Minimum length (inclusive).
    pub min: usize,
    /// Maximum length (inclusive).
    pub max: usize,
}

impl Length {
    /// Creates a length validator.
    ///
    /// Returns an error if `min > max`.
    pub fn new(min: usize, max: usize) -> BuildResult<Self> {
        if min > max {
            return Err(BuildError::InvalidParam {
                validator: LENGTH.name,
                param: "length",
                expected: "a range with min <= max",
                given: "an empty range",
            });
        }
        Ok(Self { min, max })
    }

    fn build(params: &Params) -> BuildResult<Arc<dyn Validator>> {
        match params.require(LENGTH.name, "length")? {
            Param::Range { min, max } => {
                let validator = Self::new(bound(min)?, bound(max)?)?;
                Ok(Arc::new(validator))
            }
            other => Err(BuildError::InvalidParam {
                validator: LENGTH.name,
                param: "length",
                expected: EXPECTED,
                given: other.kind(),
            }),
        }
    }
}

fn bound(value: &Value) -> BuildResult<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(BuildError::InvalidParam {
            validator: LENGTH.name,
            param: "length",
            expected: EXPECTED,
            given: kind_name(value),
        })
}

impl Validator for Length {
    fn descriptor(&self) -> &'static Descriptor {
        &LENGTH
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let Some(len) = length_of(first(values)) else {
            return Ok(());
        };

        if len < self.min {
            Err(LENGTH.failure_with("short", [self.min.to_string()]))
        } else if len > self.max {
            Err(LENGTH.failure_with("long", [self.max.to_string()]))
        } else {
            Ok(())
        }
    }
}
