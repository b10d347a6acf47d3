//! Presence and absence validators
//!
//! These two also back chain guard conditions (`if_present` / `if_absent`),
//! where they run as fresh, parameterless instances.

use std::sync::Arc;

use serde_json::Value;

use crate::foundation::value::{first, is_empty};
use crate::foundation::{BuildResult, Descriptor, Failure, Params, Validator};

// ============================================================================
// PRESENCE
// ============================================================================

/// Descriptor for [`Presence`].
pub static PRESENCE: Descriptor = Descriptor {
    name: "Presence",
    inputs: 1,
    raw: false,
    error_codes: &[("missing", "must be provided"), ("empty", "cannot be empty")],
    build: Presence::build,
};

/// Validates that a value is set and not empty.
///
/// The only built-in that rejects `Null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Presence;

impl Presence {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for Presence {
    fn descriptor(&self) -> &'static Descriptor {
        &PRESENCE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let value = first(values);
        if value.is_null() {
            Err(PRESENCE.failure("missing"))
        } else if is_empty(value) {
            Err(PRESENCE.failure("empty"))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// ABSENCE
// ============================================================================

/// Descriptor for [`Absence`].
pub static ABSENCE: Descriptor = Descriptor {
    name: "Absence",
    inputs: 1,
    raw: false,
    error_codes: &[("present", "must be absent")],
    build: Absence::build,
};

/// Validates that a value is not set, or empty. The opposite of [`Presence`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Absence;

impl Absence {
    fn build(_params: &Params) -> BuildResult<Arc<dyn Validator>> {
        Ok(Arc::new(Self))
    }
}

impl Validator for Absence {
    fn descriptor(&self) -> &'static Descriptor {
        &ABSENCE
    }

    fn check(&self, values: &[&Value]) -> Result<(), Failure> {
        let value = first(values);
        if value.is_null() || is_empty(value) {
            Ok(())
        } else {
            Err(ABSENCE.failure("present"))
        }
    }
}
