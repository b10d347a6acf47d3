use std::sync::Arc;

use ruleweave_validator::prelude::*;
use serde_json::{Value, json};

static UPPERCASE: Descriptor = Descriptor {
    name: "Uppercase",
    inputs: 1,
    raw: false,
    error_codes: &[("not_uppercase", "must be upper case")],
    build: |_| Ok(Arc::new(Uppercase)),
};

#[derive(Debug)]
struct Uppercase;

impl Validator for Uppercase {
    fn descriptor(&self) -> &'static Descriptor {
        &UPPERCASE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        match values.first().and_then(|v| v.as_str()) {
            Some(s) if s.chars().any(char::is_lowercase) => {
                Err(UPPERCASE.failure("not_uppercase"))
            }
            _ => Ok(()),
        }
    }
}

#[test]
fn custom_validator_in_chain() {
    let mut registry = ValidatorRegistry::builtin();
    registry.register(&UPPERCASE);
    let registry = Arc::new(registry);

    let mut chain = ValidationChain::with_registry(registry, ChainConfig::new()).unwrap();
    chain
        .chain(ChainConfig::new(), |c| {
            c.validate("Uppercase", ["code"], Params::new())?;
            Ok(())
        })
        .unwrap();

    let mut record = MapRecord::new().with("code", "abc");
    assert!(!run_validations(&chain, &mut record));
    assert_eq!(
        record.report().for_attribute("code")[0].message,
        "must be upper case"
    );
}

#[test]
fn shared_registry_does_not_know_custom_validators() {
    let err = ValidationChain::build(ChainConfig::new(), |c| {
        c.validate("Uppercase", ["code"], Params::new())?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(err, BuildError::UnknownValidator("Uppercase".into()));
    assert_eq!(err.to_string(), "unknown validator: Uppercase");
}

#[test]
fn instance_keeps_last_error() {
    let mut exclusion = ValidatorRegistry::shared()
        .instantiate("Exclusion", &Params::new().with("not_in", 0..=10))
        .unwrap();

    assert!(!exclusion.validate(&[&json!(5)]).unwrap());
    assert_eq!(exclusion.last_error_code(), Some("in_range"));
    assert_eq!(exclusion.last_error(), Some("must not be between 0 and 10"));

    assert!(exclusion.validate(&[&json!(15)]).unwrap());
    assert_eq!(exclusion.last_error_code(), None);
    assert_eq!(exclusion.last_error(), None);
}

#[test]
fn instance_rejects_wrong_arity() {
    let mut value_match = ValidatorRegistry::shared()
        .instantiate("ValueMatch", &Params::new())
        .unwrap();
    let value = json!("batman");

    assert!(matches!(
        value_match.validate(&[&value]),
        Err(BuildError::ArityMismatch {
            expected: 2,
            given: 1,
            ..
        })
    ));
    assert!(value_match.validate(&[&value, &value]).unwrap());
}
