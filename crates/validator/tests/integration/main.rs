//! End-to-end tests: chains declared through the public API and run against
//! in-memory records.

mod chain;
mod registry;
mod report;

use ruleweave_validator::prelude::*;

/// The signup rules used across several tests.
pub fn signup_chain() -> BuildResult<ValidationChain> {
    ValidationChain::build(ChainConfig::new().with_continue_on_failure(true), |c| {
        c.validate("Presence", ["username"], Params::new())?
            .validate("Length", ["username"], Params::new().with("length", 4..=10))?
            .validate("Format", ["username"], Params::new().with("format", NamedFormat::Alnum))?;
        c.validate("ValueMatch", ["password", "password_confirm"], Params::new())?;
        c.if_present(["email"], |c| {
            c.validate("Format", ["email"], Params::new().with("format", NamedFormat::Email))?;
            Ok(())
        })?;
        c.if_present(["age"], |c| {
            c.validate("IntegerCoercible", ["age"], Params::new())?
                .validate("Inclusion", ["age"], Params::new().with("in", 13..=130))?;
            Ok(())
        })?;
        Ok(())
    })
}
