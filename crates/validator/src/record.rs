//! Host records
//!
//! Validations read attributes through the [`Record`] trait and write
//! failures into the record's own [`FailureReport`]. [`MapRecord`] is a
//! ready-made in-memory record.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::chain::ValidationChain;
use crate::foundation::value::NULL;
use crate::report::FailureReport;

/// Capabilities a host record supplies to the engine.
///
/// Unknown attributes read as `Null`.
pub trait Record {
    /// Typed read, used by every validator that is not raw.
    fn read_attribute(&self, name: &str) -> Cow<'_, Value>;

    /// Read before any type coercion, used by raw validators.
    ///
    /// Defaults to the typed read for hosts without a separate raw form.
    fn read_attribute_before_type_cast(&self, name: &str) -> Cow<'_, Value> {
        self.read_attribute(name)
    }

    /// The record's failure report.
    fn failed_validators(&mut self) -> &mut FailureReport;
}

/// Clears the record's report, runs `chain` against it and returns whether
/// the report is empty afterwards.
///
/// A chain bypassed by its guards leaves the report empty, so this returns
/// `true` for it.
pub fn run_validations<R>(chain: &ValidationChain, record: &mut R) -> bool
where
    R: Record + ?Sized,
{
    record.failed_validators().clear();
    chain.run(record);
    record.failed_validators().is_empty()
}

// ============================================================================
// MAP RECORD
// ============================================================================

/// In-memory record over an insertion-ordered attribute map.
///
/// Raw values can be stored separately; attributes without one fall back to
/// the typed value.
///
/// # Examples
///
/// ```rust,ignore
/// use ruleweave_validator::record::MapRecord;
/// use serde_json::json;
///
/// let record = MapRecord::new()
///     .with("age", 42)
///     .with_raw("age", "42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapRecord {
    values: IndexMap<String, Value>,
    raw: IndexMap<String, Value>,
    report: FailureReport,
}

impl MapRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a typed value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a raw value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_raw(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_raw(name, value);
        self
    }

    /// Sets a typed value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Sets a raw value in place.
    pub fn set_raw(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.raw.insert(name.into(), value.into());
    }

    /// Removes an attribute, typed and raw.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.raw.shift_remove(name);
        self.values.shift_remove(name)
    }

    /// Typed value of an attribute, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The failure report from the last run.
    pub fn report(&self) -> &FailureReport {
        &self.report
    }
}

impl Record for MapRecord {
    fn read_attribute(&self, name: &str) -> Cow<'_, Value> {
        Cow::Borrowed(self.values.get(name).unwrap_or(&NULL))
    }

    fn read_attribute_before_type_cast(&self, name: &str) -> Cow<'_, Value> {
        match self.raw.get(name) {
            Some(raw) => Cow::Borrowed(raw),
            None => self.read_attribute(name),
        }
    }

    fn failed_validators(&mut self) -> &mut FailureReport {
        &mut self.report
    }
}

impl From<Map<String, Value>> for MapRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Self::default()
        }
    }
}
