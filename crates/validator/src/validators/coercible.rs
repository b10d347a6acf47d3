//! Coercibility validators
//!
//! These read the raw attribute value, before any host-side type cast, and
//! check that it could be converted to the target type.

use std::sync::Arc;

use serde_json::{Number, Value};

use crate::foundation::value::{first, to_text};
use crate::foundation::{BuildResult, Descriptor, Failure, Params, Validator};

// ============================================================================
// BOOLEAN
// ============================================================================

/// Descriptor for [`BooleanCoercible`].
pub static BOOLEAN_COERCIBLE: Descriptor = Descriptor {
    name: "BooleanCoercible",
    inputs: 1,
    raw: true,
    error_codes: &[("not_boolean", "must be one of: true, false, 1, 0")],
    build: BooleanCoercible::build,
};

const BOOLEAN_LITERALS: [&str; 4] = ["true", "false", "1", "0"];

/// Validates that a raw value is one of `true`, `false`, `1`, `0`
/// (case-insensitive, in any JSON representation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BooleanCoercible;

impl BooleanCoercible {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for BooleanCoercible {
    fn descriptor(&self) -> &'static Descriptor {
        &BOOLEAN_COERCIBLE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let ok = match first(values) {
            Value::Null => true,
            Value::Array(_) | Value::Object(_) => false,
            scalar => {
                let text = to_text(scalar);
                BOOLEAN_LITERALS
                    .iter()
                    .any(|literal| text.eq_ignore_ascii_case(literal))
            }
        };

        if ok {
            Ok(())
        } else {
            Err(BOOLEAN_COERCIBLE.failure("not_boolean"))
        }
    }
}

// ============================================================================
// INTEGER
// ============================================================================

/// Descriptor for [`IntegerCoercible`].
pub static INTEGER_COERCIBLE: Descriptor = Descriptor {
    name: "IntegerCoercible",
    inputs: 1,
    raw: true,
    error_codes: &[("not_integer", "must be an integer")],
    build: IntegerCoercible::build,
};

/// Validates that a raw value parses as an integer.
///
/// Accepts whole numbers and strings such as `"100"`, `" -42 "`,
/// `"1_000"`, `"0x1F"`, `"0b1010"`. Booleans are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntegerCoercible;

impl IntegerCoercible {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for IntegerCoercible {
    fn descriptor(&self) -> &'static Descriptor {
        &INTEGER_COERCIBLE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let ok = match first(values) {
            Value::Null => true,
            Value::Number(n) => is_whole(n),
            Value::String(s) => parses_as_integer(s),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => false,
        };

        if ok {
            Ok(())
        } else {
            Err(INTEGER_COERCIBLE.failure("not_integer"))
        }
    }
}

fn is_whole(n: &Number) -> bool {
    n.is_i64()
        || n.is_u64()
        || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

/// Integer literal syntax: optional sign, optional radix prefix, digits with
/// single `_` separators between them.
fn parses_as_integer(input: &str) -> bool {
    let s = input.trim();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (radix, digits) = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0b") => (2, &s[2..]),
        _ => (10, s),
    };

    is_digit_run(digits, radix)
}

/// Non-empty digits in `radix`, `_` allowed only between two digits.
fn is_digit_run(digits: &str, radix: u32) -> bool {
    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c == '_' || c.is_digit(radix))
}

/// Float literal syntax: anything [`parses_as_integer`] accepts, or a
/// decimal with an optional fraction and exponent. The fraction needs at
/// least one digit after the point, so `"1."` is rejected.
fn parses_as_float(input: &str) -> bool {
    if parses_as_integer(input) {
        return true;
    }

    let s = input.trim();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };

    let whole_ok = is_digit_run(whole, 10) || (whole.is_empty() && fraction.is_some());
    let fraction_ok = fraction.is_none_or(|fraction| is_digit_run(fraction, 10));
    let exponent_ok = exponent.is_none_or(|exponent| {
        is_digit_run(exponent.strip_prefix(['+', '-']).unwrap_or(exponent), 10)
    });

    whole_ok
        && fraction_ok
        && exponent_ok
        && s.replace('_', "").parse::<f64>().is_ok_and(f64::is_finite)
}

// ============================================================================
// FLOAT
// ============================================================================

/// Descriptor for [`FloatCoercible`].
pub static FLOAT_COERCIBLE: Descriptor = Descriptor {
    name: "FloatCoercible",
    inputs: 1,
    raw: true,
    error_codes: &[("not_float", "must be a float")],
    build: FloatCoercible::build,
};

/// Validates that a raw value parses as a finite float.
///
/// Every string [`IntegerCoercible`] accepts is accepted here too, along
/// with decimals such as `"2.5"`, `".5"`, `"1_000.25"` and `"1e-3"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatCoercible;

impl FloatCoercible {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for FloatCoercible {
    fn descriptor(&self) -> &'static Descriptor {
        &FLOAT_COERCIBLE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let ok = match first(values) {
            Value::Null | Value::Number(_) => true,
            Value::String(s) => parses_as_float(s),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => false,
        };

        if ok {
            Ok(())
        } else {
            Err(FLOAT_COERCIBLE.failure("not_float"))
        }
    }
}
