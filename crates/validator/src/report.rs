//! Failure report
//!
//! Per-record sink for validation failures. Failures of validations bound to
//! a single attribute are grouped under that attribute; failures of
//! validations bound to several attributes go to a flat model-wide list.
//!
//! Serialized, a report looks like:
//!
//! ```json
//! {
//!   "attribute": {
//!     "name": [
//!       { "validator": "Presence", "error_code": "missing", "message": "must be provided" }
//!     ]
//!   },
//!   "model": [
//!     {
//!       "validator": "ValueMatch",
//!       "attributes": ["password", "password_confirm"],
//!       "error_code": "no_match",
//!       "message": "must be the same"
//!     }
//!   ]
//! }
//! ```
//!
//! Empty families are omitted, so an empty report serializes as `{}`.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::foundation::Failure;

/// A failure recorded under a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeFailure {
    /// Short name of the failing validator.
    pub validator: &'static str,
    /// The validator's error code.
    pub error_code: &'static str,
    /// Rendered message.
    pub message: Cow<'static, str>,
}

/// A failure of a validation bound to several attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelFailure {
    /// Short name of the failing validator.
    pub validator: &'static str,
    /// The attributes involved, in declaration order.
    pub attributes: Vec<String>,
    /// The validator's error code.
    pub error_code: &'static str,
    /// Rendered message.
    pub message: Cow<'static, str>,
}

/// Structured, insertion-ordered record of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    #[serde(rename = "attribute", skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, Vec<AttributeFailure>>,
    #[serde(rename = "model", skip_serializing_if = "Vec::is_empty")]
    model: Vec<ModelFailure>,
}

/// Read-only view of a [`FailureReport`].
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    /// Failures keyed by attribute.
    pub attribute: &'a IndexMap<String, Vec<AttributeFailure>>,
    /// Model-wide failures.
    pub model: &'a [ModelFailure],
}

impl FailureReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    ///
    /// With exactly one attribute the entry is appended under that
    /// attribute; otherwise it goes to the model-wide list with all
    /// attribute names kept. Duplicates are kept.
    pub fn add<S: AsRef<str>>(
        &mut self,
        attributes: &[S],
        validator: &'static str,
        message: impl Into<Cow<'static, str>>,
        error_code: &'static str,
    ) {
        let message = message.into();
        match attributes {
            [attribute] => {
                self.attributes
                    .entry(attribute.as_ref().to_string())
                    .or_default()
                    .push(AttributeFailure {
                        validator,
                        error_code,
                        message,
                    });
            }
            _ => self.model.push(ModelFailure {
                validator,
                attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
                error_code,
                message,
            }),
        }
    }

    /// Records a validator failure against the given attributes.
    pub fn add_failure<S: AsRef<str>>(&mut self, attributes: &[S], failure: Failure) {
        self.add(attributes, failure.validator, failure.message, failure.code);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.model.clear();
    }

    /// Read-only view of the current contents.
    pub fn list(&self) -> ReportView<'_> {
        ReportView {
            attribute: &self.attributes,
            model: &self.model,
        }
    }

    /// Failures recorded under `attribute`, in insertion order.
    pub fn for_attribute(&self, attribute: &str) -> &[AttributeFailure] {
        self.attributes
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Model-wide failures, in insertion order.
    pub fn model_failures(&self) -> &[ModelFailure] {
        &self.model
    }

    /// Names of attributes with at least one failure, in first-failure order.
    pub fn failed_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.model.is_empty()
    }

    /// Total number of recorded failures.
    pub fn len(&self) -> usize {
        self.attributes.values().map(Vec::len).sum::<usize>() + self.model.len()
    }

    /// The report as a JSON value.
    pub fn to_json_value(&self) -> Value {
        serde_json::json!(self)
    }
}
