use pretty_assertions::assert_eq;
use ruleweave_validator::prelude::*;
use serde_json::json;

use crate::signup_chain;

#[test]
fn running_twice_gives_identical_reports() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new()
        .with("username", "")
        .with("password", "a")
        .with("password_confirm", "b");

    run_validations(&chain, &mut record);
    let first = record.report().clone();
    run_validations(&chain, &mut record);

    assert_eq!(record.report(), &first);
    assert_eq!(first.len(), 4);
}

#[test]
fn report_view_is_read_only_snapshot() {
    let chain = signup_chain().unwrap();
    let mut record = MapRecord::new().with("username", "bat");
    run_validations(&chain, &mut record);

    let view = record.report().list();
    assert_eq!(view.attribute.len(), 1);
    assert_eq!(view.attribute["username"][0].error_code, "short");
    assert!(view.model.is_empty());
}

#[test]
fn report_serializes_with_serde() {
    let mut report = FailureReport::new();
    report.add(&["title"], "Presence", "must be provided", "missing");

    let text = serde_json::to_string(&report).unwrap();
    assert_eq!(
        text,
        r#"{"attribute":{"title":[{"validator":"Presence","error_code":"missing","message":"must be provided"}]}}"#
    );
    assert_eq!(FailureReport::new().to_json_value(), json!({}));
}
