//! Built-in validators
//!
//! Ten ready-to-use validators, each described by a static [`Descriptor`]
//! and registered under its short name in
//! [`ValidatorRegistry::builtin`](crate::registry::ValidatorRegistry::builtin).
//!
//! # Categories
//!
//! - **Presence**: [`Presence`], [`Absence`]
//! - **Shape**: [`Length`], [`Format`]
//! - **Membership**: [`Inclusion`], [`Exclusion`]
//! - **Comparison**: [`ValueMatch`] (two inputs)
//! - **Coercibility** (raw reads): [`BooleanCoercible`], [`IntegerCoercible`],
//!   [`FloatCoercible`]
//!
//! Every built-in except [`Presence`] passes on `Null`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ruleweave_validator::foundation::Params;
//! use ruleweave_validator::validators::EXCLUSION;
//! use serde_json::json;
//!
//! let v = EXCLUSION.build(&Params::new().with("not_in", 0..=10))?;
//! assert_eq!(v.check(&[&json!(5)]).unwrap_err().code, "in_range");
//! assert!(v.check(&[&json!(15)]).is_ok());
//! ```

use crate::foundation::Descriptor;

pub mod coercible;
pub mod format;
pub mod length;
pub mod membership;
pub mod presence;
pub mod value_match;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use coercible::{
    BOOLEAN_COERCIBLE, BooleanCoercible, FLOAT_COERCIBLE, FloatCoercible, INTEGER_COERCIBLE,
    IntegerCoercible,
};
pub use format::{FORMAT, Format, Matcher};
pub use length::{LENGTH, Length};
pub use membership::{EXCLUSION, Exclusion, INCLUSION, Inclusion, Membership};
pub use presence::{ABSENCE, Absence, PRESENCE, Presence};
pub use value_match::{VALUE_MATCH, ValueMatch};

/// Descriptors of all built-in validators, in registration order.
pub static BUILTINS: [&Descriptor; 10] = [
    &PRESENCE,
    &ABSENCE,
    &LENGTH,
    &FORMAT,
    &INCLUSION,
    &EXCLUSION,
    &VALUE_MATCH,
    &BOOLEAN_COERCIBLE,
    &INTEGER_COERCIBLE,
    &FLOAT_COERCIBLE,
];
