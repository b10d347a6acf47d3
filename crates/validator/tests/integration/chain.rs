use pretty_assertions::assert_eq;
use ruleweave_validator::prelude::*;
use serde_json::json;

use crate::signup_chain;

#[test]
fn valid_signup_passes() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new()
        .with("username", "batman1")
        .with("password", "secret")
        .with("password_confirm", "secret")
        .with("email", "bruce@wayne.com")
        .with("age", 35)
        .with_raw("age", "35");

    assert!(run_validations(&chain, &mut record));
    assert!(record.report().is_empty());
}

#[test]
fn invalid_signup_collects_every_failure() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new()
        .with("username", "bat man")
        .with("password", "secret")
        .with("password_confirm", "Secret")
        .with("email", "peter@parker");

    assert!(!run_validations(&chain, &mut record));
    assert_eq!(
        record.report().to_json_value(),
        json!({
            "attribute": {
                "username": [
                    {"validator": "Format", "error_code": "not_alnum", "message": "can only contain letters and numbers"}
                ],
                "email": [
                    {"validator": "Format", "error_code": "not_email", "message": "has to be a valid email address"}
                ]
            },
            "model": [
                {
                    "validator": "ValueMatch",
                    "attributes": ["password", "password_confirm"],
                    "error_code": "no_match",
                    "message": "must be the same"
                }
            ]
        })
    );
}

#[test]
fn nested_chain_stops_at_first_failure() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new()
        .with("username", "batman1")
        .with("age", 0)
        .with_raw("age", "ten");

    assert!(!run_validations(&chain, &mut record));
    let age = record.report().for_attribute("age");
    assert_eq!(age.len(), 1);
    assert_eq!(age[0].error_code, "not_integer");
}

#[test]
fn typed_value_checked_after_raw_value() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new()
        .with("username", "batman1")
        .with("age", 7)
        .with_raw("age", "7");

    assert!(!run_validations(&chain, &mut record));
    assert_eq!(
        record.report().for_attribute("age")[0].message,
        "must be between 13 and 130"
    );
}

#[test]
fn guarded_chain_without_its_attribute_is_skipped() {
    let mut chain = ValidationChain::new(ChainConfig::new()).unwrap();
    let guarded = chain
        .if_absent(["username"], |c| {
            c.validate("Presence", ["name"], Params::new())?;
            Ok(())
        })
        .unwrap();
    assert_eq!(guarded.conditions()[0], Condition::absent("username"));

    let mut record = MapRecord::new().with("username", "batman1").with("name", "");
    let ChainItem::Chain(guarded) = &chain.items()[0] else {
        panic!("expected nested chain");
    };
    assert_eq!(guarded.run_outcome(&mut record), ChainOutcome::Skipped);
    assert!(run_validations(&chain, &mut record));

    let mut record = MapRecord::new().with("name", "");
    assert!(!run_validations(&chain, &mut record));
    assert_eq!(record.report().for_attribute("name")[0].error_code, "empty");
}

#[test]
fn config_from_json() {
    let config: ChainConfig = serde_json::from_value(json!({
        "continue_on_failure": true,
        "if_present": ["a", "b"],
        "if_absent": "c"
    }))
    .unwrap();
    let chain = ValidationChain::new(config).unwrap();

    assert!(chain.continue_on_failure());
    assert_eq!(
        chain.conditions(),
        [
            Condition::present("a"),
            Condition::present("b"),
            Condition::absent("c")
        ]
    );
}

#[test]
fn chain_can_be_shared_across_threads() {
    let chain = std::sync::Arc::new(signup_chain().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let chain = std::sync::Arc::clone(&chain);
            std::thread::spawn(move || {
                let name = if i % 2 == 0 { "batman1" } else { "bat" };
                let mut record = MapRecord::new().with("username", name);
                run_validations(&chain, &mut record)
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [true, false, true, false]);
}
