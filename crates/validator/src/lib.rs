//! # ruleweave-validator
//!
//! A composable rule-validation engine for host records.
//!
//! Named, parameterized validators are bound to record attributes as
//! [`Validation`](validation::Validation)s, organized into conditional,
//! short-circuiting [`ValidationChain`](chain::ValidationChain)s, and run
//! against any type implementing [`Record`](record::Record). Failures are
//! collected in the record's [`FailureReport`](report::FailureReport).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ruleweave_validator::prelude::*;
//!
//! let chain = ValidationChain::build(ChainConfig::new().with_continue_on_failure(true), |c| {
//!     c.validate("Presence", ["username"], Params::new())?;
//!     c.validate("Length", ["username"], Params::new().with("length", 4..=10))?;
//!     c.validate("ValueMatch", ["password", "password_confirm"], Params::new())?;
//!     Ok(())
//! })?;
//!
//! let mut record = MapRecord::new()
//!     .with("username", "bat")
//!     .with("password", "secret")
//!     .with("password_confirm", "Secret");
//!
//! assert!(!run_validations(&chain, &mut record));
//! assert_eq!(record.report().for_attribute("username")[0].error_code, "short");
//! assert_eq!(record.report().model_failures()[0].error_code, "no_match");
//! ```
//!
//! ## Built-in Validators
//!
//! - **Presence**: [`Presence`](validators::Presence), [`Absence`](validators::Absence)
//! - **Shape**: [`Length`](validators::Length), [`Format`](validators::Format)
//! - **Membership**: [`Inclusion`](validators::Inclusion), [`Exclusion`](validators::Exclusion)
//! - **Comparison**: [`ValueMatch`](validators::ValueMatch)
//! - **Coercibility**: [`BooleanCoercible`](validators::BooleanCoercible),
//!   [`IntegerCoercible`](validators::IntegerCoercible),
//!   [`FloatCoercible`](validators::FloatCoercible)
//!
//! Custom validators are added by declaring a static
//! [`Descriptor`](foundation::Descriptor) and registering it with
//! [`ValidatorRegistry::register`](registry::ValidatorRegistry::register).

pub mod chain;
pub mod foundation;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod report;
pub mod validation;
pub mod validators;
