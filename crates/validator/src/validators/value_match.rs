use std::sync::Arc;

use serde_json::Value;

use crate::foundation::value::{nth, same};
use crate::foundation::{BuildResult, Descriptor, Failure, Params, Validator};

/// Descriptor for [`ValueMatch`].
pub static VALUE_MATCH: Descriptor = Descriptor {
    name: "ValueMatch",
    inputs: 2,
    raw: false,
    error_codes: &[("no_match", "must be the same")],
    build: ValueMatch::build,
};

/// Validates that two values are equal. Takes two inputs.
///
/// Matching is exact and case-sensitive; numbers match across
/// representations (`5` and `5.0`). Two nulls match, one null does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValueMatch;

impl ValueMatch {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for ValueMatch {
    fn descriptor(&self) -> &'static Descriptor {
        &VALUE_MATCH
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        if same(nth(values, 0), nth(values, 1)) {
            Ok(())
        } else {
            Err(VALUE_MATCH.failure("no_match"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::both_null(Value::Null, Value::Null, true)]
    #[case::equal(json!("batman"), json!("batman"), true)]
    #[case::different(json!("batman"), json!("robin"), false)]
    #[case::case_sensitive(json!("Batman"), json!("batman"), false)]
    #[case::one_null(json!("batman"), Value::Null, false)]
    #[case::numeric(json!(5), json!(5.0), true)]
    #[case::string_vs_number(json!("5"), json!(5), false)]
    fn test_value_match(#[case] a: Value, #[case] b: Value, #[case] passes: bool) {
        let result = ValueMatch.check(&[&a, &b]);
        assert_eq!(result.is_ok(), passes);
    }

    #[test]
    fn test_message() {
        let failure = ValueMatch
            .check(&[&json!("batman"), &json!("robin")])
            .unwrap_err();
        assert_eq!(failure.code, "no_match");
        assert_eq!(failure.message, "must be the same");
    }

    #[test]
    fn test_takes_two_inputs() {
        assert_eq!(VALUE_MATCH.inputs, 2);
    }
}
