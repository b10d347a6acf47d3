//! Prelude module for convenient imports.
//!
//! Provides a single `use ruleweave_validator::prelude::*;` import that brings
//! in the types needed to declare chains, run them against records and read
//! the resulting reports.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ruleweave_validator::prelude::*;
//!
//! let chain = ValidationChain::build(ChainConfig::new(), |c| {
//!     c.validate("Presence", ["title"], Params::new())?;
//!     Ok(())
//! })?;
//! let mut record = MapRecord::new().with("title", "Hello");
//! assert!(run_validations(&chain, &mut record));
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, parameters
// ============================================================================

pub use crate::foundation::{
    BuildError, BuildResult, Descriptor, Failure, NamedFormat, Param, Params, Validator,
    ValidatorInstance,
};

// ============================================================================
// VALIDATORS: Built-in validator types
// ============================================================================

pub use crate::validators::{
    Absence, BooleanCoercible, Exclusion, FloatCoercible, Format, Inclusion, IntegerCoercible,
    Length, Presence, ValueMatch,
};

// ============================================================================
// ENGINE: Registry, validations, chains, records, reports
// ============================================================================

pub use crate::chain::{ChainConfig, ChainItem, ChainOutcome, Condition, ValidationChain};
pub use crate::record::{MapRecord, Record, run_validations};
pub use crate::registry::ValidatorRegistry;
pub use crate::report::{AttributeFailure, FailureReport, ModelFailure};
pub use crate::validation::Validation;
