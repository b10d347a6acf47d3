//! Core validation types and traits
//!
//! This module contains the building blocks every other part of the crate
//! is made of:
//!
//! - **Traits**: [`Validator`] and its static [`Descriptor`]
//! - **Errors**: [`Failure`] (data rejected) and [`BuildError`] (programmer error)
//! - **Parameters**: [`Params`], [`Param`], [`NamedFormat`]
//! - **State**: [`ValidatorInstance`] for last-error style callers
//! - **Values**: helpers over [`serde_json::Value`]
//!
//! # Architecture
//!
//! Validators are looked up by short name in a
//! [`ValidatorRegistry`](crate::registry::ValidatorRegistry). The registry
//! holds descriptors only; a validator is built from its descriptor and a
//! set of parameters once, when a validation is declared, and reused for
//! every run afterwards.
//!
//! ```rust,ignore
//! use ruleweave_validator::foundation::Params;
//! use ruleweave_validator::validators::LENGTH;
//! use serde_json::json;
//!
//! let length = LENGTH.build(&Params::new().with("length", 4..=10))?;
//! let err = length.check(&[&json!("bat")]).unwrap_err();
//! assert_eq!(err.code, "short");
//! ```

// Module declarations
pub mod error;
pub mod instance;
pub mod params;
pub mod traits;
pub mod value;

// Re-export everything at the foundation level for convenience
pub use error::{BuildError, Failure};
pub use instance::ValidatorInstance;
pub use params::{NamedFormat, Param, Params};
pub use traits::{BuildFn, Descriptor, Validator};

// ============================================================================
// PRELUDE
// ============================================================================

/// Common imports for implementing validators.
pub mod prelude {
    pub use super::{
        BuildError, BuildFn, Descriptor, Failure, NamedFormat, Param, Params, Validator,
        ValidatorInstance,
    };
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Result of a single validator check.
pub type CheckResult = Result<(), Failure>;

/// Result of a construction step.
pub type BuildResult<T> = Result<T, BuildError>;
