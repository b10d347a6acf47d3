//! Validates a few signup records and prints their failure reports.
//!
//! Run with `RUST_LOG`-style filtering disabled; every event down to TRACE
//! is printed so chain bypasses and short-circuits are visible.

use ruleweave_validator::prelude::*;
use serde_json::json;
use tracing::Level;

fn signup_chain() -> BuildResult<ValidationChain> {
    ValidationChain::build(ChainConfig::new().with_continue_on_failure(true), |c| {
        c.chain(ChainConfig::new(), |c| {
            let alnum = Params::new().with("format", NamedFormat::Alnum);
            c.validate("Presence", ["username"], Params::new())?
                .validate("Length", ["username"], Params::new().with("length", 4..=10))?
                .validate("Format", ["username"], alnum)?;
            Ok(())
        })?;
        c.validate("ValueMatch", ["password", "password_confirm"], Params::new())?;
        c.if_present(["email"], |c| {
            c.validate("Format", ["email"], Params::new().with("format", NamedFormat::Email))?;
            Ok(())
        })?;
        c.if_present(["newsletter"], |c| {
            c.validate("BooleanCoercible", ["newsletter"], Params::new())?;
            Ok(())
        })?;
        Ok(())
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(false)
        .init();

    let chain = signup_chain()?;

    let records = [
        MapRecord::new()
            .with("username", "batman1")
            .with("password", "secret")
            .with("password_confirm", "secret")
            .with("email", "bruce@wayne.com"),
        MapRecord::new()
            .with("username", "bat")
            .with("password", "secret")
            .with("password_confirm", "Secret")
            .with("email", "peter@parker")
            .with("newsletter", "yep"),
        MapRecord::new().with("username", ""),
    ];

    for (i, mut record) in records.into_iter().enumerate() {
        let valid = run_validations(&chain, &mut record);
        tracing::info!(record = i, valid, "validated");
        if !valid {
            println!("{}", serde_json::to_string_pretty(&record.report().to_json_value())?);
        }
    }

    let mut age = ValidatorRegistry::shared().instantiate("IntegerCoercible", &Params::new())?;
    for input in [json!("42"), json!("0x2A"), json!("forty-two")] {
        if !age.validate(&[&input])? {
            println!("{input}: {}", age.last_error().unwrap_or_default());
        }
    }

    Ok(())
}
