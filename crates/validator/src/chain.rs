//! Validation chains
//!
//! A [`ValidationChain`] is an ordered list of [`ChainItem`]s, each either a
//! [`Validation`] or a nested chain, guarded by optional presence/absence
//! [`Condition`]s.
//!
//! # Execution
//!
//! 1. Every condition is checked against the record. If one fails the chain
//!    is bypassed: no item runs, nothing is recorded and the chain counts as
//!    passed.
//! 2. Items run in declaration order. By default the chain stops after the
//!    first failing item; with `continue_on_failure` every item runs.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ruleweave_validator::prelude::*;
//!
//! let chain = ValidationChain::build(ChainConfig::new(), |c| {
//!     c.validate("Presence", ["email"], Params::new())?;
//!     c.validate("Format", ["email"], Params::new().with("format", NamedFormat::Email))?;
//!     c.if_present(["nickname"], |c| {
//!         c.validate("Length", ["nickname"], Params::new().with("length", 3..=20))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! let mut record = MapRecord::new().with("email", "peter@parker");
//! assert!(!chain.run(&mut record));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::foundation::error::is_identifier;
use crate::foundation::{BuildError, BuildResult, Params, Validator};
use crate::record::Record;
use crate::registry::ValidatorRegistry;
use crate::validation::Validation;
use crate::validators::{Absence, Presence};

// ============================================================================
// CONDITIONS
// ============================================================================

/// Polarity of a guard condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// The attribute must pass [`Presence`].
    Present,
    /// The attribute must pass [`Absence`].
    Absent,
}

/// A guard checked before a chain runs its items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Polarity.
    pub kind: ConditionKind,
    /// Attribute the condition reads.
    pub attribute: String,
}

impl Condition {
    /// Condition met when the attribute is present and not empty.
    pub fn present(attribute: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::Present,
            attribute: attribute.into(),
        }
    }

    /// Condition met when the attribute is absent or empty.
    pub fn absent(attribute: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::Absent,
            attribute: attribute.into(),
        }
    }

    /// Checks the condition against `record` using a fresh, parameterless
    /// validator on the typed value.
    pub fn is_met<R>(&self, record: &R) -> bool
    where
        R: Record + ?Sized,
    {
        let value = record.read_attribute(&self.attribute);
        let values = [&*value];
        match self.kind {
            ConditionKind::Present => Presence.check(&values).is_ok(),
            ConditionKind::Absent => Absence.check(&values).is_ok(),
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Options for a new chain.
///
/// Deserializes from a map where `if_present` / `if_absent` take one
/// attribute name or a list of them:
///
/// ```json
/// { "continue_on_failure": true, "if_present": "nickname" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Keep running items after one fails.
    pub continue_on_failure: bool,
    /// Attributes that must be present for the chain to run.
    #[serde(deserialize_with = "one_or_many")]
    pub if_present: Vec<String>,
    /// Attributes that must be absent for the chain to run.
    #[serde(deserialize_with = "one_or_many")]
    pub if_absent: Vec<String>,
}

impl ChainConfig {
    /// Default options: stop at the first failure, no conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether items keep running after a failure.
    pub fn with_continue_on_failure(mut self, continue_on_failure: bool) -> Self {
        self.continue_on_failure = continue_on_failure;
        self
    }

    /// Adds a presence condition.
    pub fn if_present(mut self, attribute: impl Into<String>) -> Self {
        self.if_present.push(attribute.into());
        self
    }

    /// Adds an absence condition.
    pub fn if_absent(mut self, attribute: impl Into<String>) -> Self {
        self.if_absent.push(attribute.into());
        self
    }

    /// Conditions in evaluation order: presence first, then absence.
    fn conditions(&self) -> BuildResult<Vec<Condition>> {
        let present = self.if_present.iter().map(Condition::present);
        let absent = self.if_absent.iter().map(Condition::absent);
        present
            .chain(absent)
            .map(|condition| {
                if is_identifier(&condition.attribute) {
                    Ok(condition)
                } else {
                    Err(BuildError::InvalidAttribute(condition.attribute))
                }
            })
            .collect()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(attribute) => vec![attribute],
        OneOrMany::Many(attributes) => attributes,
    })
}

// ============================================================================
// ITEMS AND OUTCOMES
// ============================================================================

/// A chain node: a single validation or a nested chain.
#[derive(Debug, Clone)]
pub enum ChainItem {
    /// A leaf validation.
    Validation(Validation),
    /// A nested chain.
    Chain(ValidationChain),
}

impl ChainItem {
    /// Runs the node against `record`, returning whether it passed.
    pub fn run<R>(&self, record: &mut R) -> bool
    where
        R: Record + ?Sized,
    {
        match self {
            Self::Validation(validation) => validation.run(record),
            Self::Chain(chain) => chain.run(record),
        }
    }
}

impl From<Validation> for ChainItem {
    fn from(validation: Validation) -> Self {
        Self::Validation(validation)
    }
}

impl From<ValidationChain> for ChainItem {
    fn from(chain: ValidationChain) -> Self {
        Self::Chain(chain)
    }
}

/// Result of running a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainOutcome {
    /// Conditions were met and every executed item passed.
    Passed,
    /// At least one item failed.
    Failed,
    /// A condition was not met; no item ran.
    Skipped,
}

impl ChainOutcome {
    /// `true` for [`Passed`](Self::Passed) and [`Skipped`](Self::Skipped).
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// Ordered, conditionally guarded list of validations and nested chains.
///
/// Built once and reused for any number of runs. Nested chains resolve
/// validators through the registry of the chain they are declared in.
#[derive(Debug, Clone)]
pub struct ValidationChain {
    continue_on_failure: bool,
    conditions: Vec<Condition>,
    items: Vec<ChainItem>,
    registry: Arc<ValidatorRegistry>,
}

impl ValidationChain {
    /// Creates an empty chain resolving through the shared built-in registry.
    pub fn new(config: ChainConfig) -> BuildResult<Self> {
        Self::with_registry(ValidatorRegistry::shared(), config)
    }

    /// Creates an empty chain resolving through `registry`.
    pub fn with_registry(
        registry: Arc<ValidatorRegistry>,
        config: ChainConfig,
    ) -> BuildResult<Self> {
        Ok(Self {
            continue_on_failure: config.continue_on_failure,
            conditions: config.conditions()?,
            items: Vec::new(),
            registry,
        })
    }

    /// Creates a chain and fills it with `f`.
    pub fn build<F>(config: ChainConfig, f: F) -> BuildResult<Self>
    where
        F: FnOnce(&mut Self) -> BuildResult<()>,
    {
        let mut chain = Self::new(config)?;
        f(&mut chain)?;
        Ok(chain)
    }

    /// Appends a validation of `attributes` with the named validator.
    pub fn validate<I, S>(
        &mut self,
        validator: &str,
        attributes: I,
        params: Params,
    ) -> BuildResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let validation = Validation::with_registry(&self.registry, validator, attributes, params)?;
        self.items.push(ChainItem::Validation(validation));
        Ok(self)
    }

    /// Appends a nested chain, filled by `f`, and returns it.
    ///
    /// The nested chain uses this chain's registry.
    pub fn chain<F>(&mut self, config: ChainConfig, f: F) -> BuildResult<&mut ValidationChain>
    where
        F: FnOnce(&mut ValidationChain) -> BuildResult<()>,
    {
        let mut nested = Self::with_registry(Arc::clone(&self.registry), config)?;
        f(&mut nested)?;
        self.items.push(ChainItem::Chain(nested));
        match self.items.last_mut() {
            Some(ChainItem::Chain(nested)) => Ok(nested),
            _ => unreachable!("a chain was just pushed"),
        }
    }

    /// Appends a nested chain that only runs when every attribute is present.
    pub fn if_present<I, S, F>(&mut self, attributes: I, f: F) -> BuildResult<&mut ValidationChain>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&mut ValidationChain) -> BuildResult<()>,
    {
        let config = ChainConfig {
            if_present: attributes.into_iter().map(Into::into).collect(),
            ..ChainConfig::default()
        };
        self.chain(config, f)
    }

    /// Appends a nested chain that only runs when every attribute is absent.
    pub fn if_absent<I, S, F>(&mut self, attributes: I, f: F) -> BuildResult<&mut ValidationChain>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&mut ValidationChain) -> BuildResult<()>,
    {
        let config = ChainConfig {
            if_absent: attributes.into_iter().map(Into::into).collect(),
            ..ChainConfig::default()
        };
        self.chain(config, f)
    }

    /// Appends pre-built items and returns the last one added, if any.
    pub fn add<I>(&mut self, items: I) -> Option<&ChainItem>
    where
        I: IntoIterator,
        I::Item: Into<ChainItem>,
    {
        let before = self.items.len();
        self.items.extend(items.into_iter().map(Into::into));
        if self.items.len() > before {
            self.items.last()
        } else {
            None
        }
    }

    /// Appends one pre-built item.
    pub fn push(&mut self, item: impl Into<ChainItem>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    /// Whether items keep running after a failure.
    pub fn continue_on_failure(&self) -> bool {
        self.continue_on_failure
    }

    /// Guard conditions, in evaluation order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Items, in declaration order.
    pub fn items(&self) -> &[ChainItem] {
        &self.items
    }

    /// Registry used to resolve validators declared on this chain.
    pub fn registry(&self) -> &Arc<ValidatorRegistry> {
        &self.registry
    }

    /// Number of direct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the chain has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if every condition holds for `record`, or there are none.
    pub fn conditions_met<R>(&self, record: &R) -> bool
    where
        R: Record + ?Sized,
    {
        self.conditions.iter().all(|condition| condition.is_met(record))
    }

    /// Runs the chain, returning `false` only if an item failed.
    ///
    /// A bypassed chain returns `true`; use [`run_outcome`](Self::run_outcome)
    /// to tell it apart from a pass.
    pub fn run<R>(&self, record: &mut R) -> bool
    where
        R: Record + ?Sized,
    {
        self.run_outcome(record).is_success()
    }

    /// Runs the chain, reporting whether it passed, failed or was bypassed.
    pub fn run_outcome<R>(&self, record: &mut R) -> ChainOutcome
    where
        R: Record + ?Sized,
    {
        if !self.conditions_met(&*record) {
            tracing::debug!(
                conditions = self.conditions.len(),
                "chain bypassed, guard conditions not met"
            );
            return ChainOutcome::Skipped;
        }

        let mut success = true;
        for (index, item) in self.items.iter().enumerate() {
            success &= item.run(record);
            if !success && !self.continue_on_failure {
                tracing::debug!(
                    skipped = self.items.len() - index - 1,
                    "chain stopped at first failure"
                );
                break;
            }
        }

        if success {
            ChainOutcome::Passed
        } else {
            ChainOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MapRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn presence(chain: &mut ValidationChain, attribute: &str) -> BuildResult<()> {
        chain.validate("Presence", [attribute], Params::new())?;
        Ok(())
    }

    #[test]
    fn stops_at_first_failure_by_default() {
        let chain = ValidationChain::build(ChainConfig::new(), |c| {
            presence(c, "name")?;
            presence(c, "email")
        })
        .unwrap();

        let mut record = MapRecord::new();
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Failed);
        assert_eq!(record.report().len(), 1);
        assert_eq!(record.report().for_attribute("name").len(), 1);
        assert!(record.report().for_attribute("email").is_empty());
    }

    #[test]
    fn continue_on_failure_runs_every_item() {
        let config = ChainConfig::new().with_continue_on_failure(true);
        let chain = ValidationChain::build(config, |c| {
            presence(c, "name")?;
            presence(c, "email")
        })
        .unwrap();

        let mut record = MapRecord::new();
        assert!(!chain.run(&mut record));
        assert_eq!(record.report().len(), 2);
        let failed: Vec<_> = record.report().failed_attributes().collect();
        assert_eq!(failed, ["name", "email"]);
    }

    #[test]
    fn later_item_passing_does_not_reset_failure() {
        let config = ChainConfig::new().with_continue_on_failure(true);
        let chain = ValidationChain::build(config, |c| {
            presence(c, "name")?;
            presence(c, "email")
        })
        .unwrap();

        let mut record = MapRecord::new().with("email", "bruce@wayne.com");
        assert!(!chain.run(&mut record));
    }

    #[test]
    fn if_absent_guard() {
        let chain = ValidationChain::build(ChainConfig::new().if_absent("username"), |c| {
            presence(c, "name")
        })
        .unwrap();

        let mut record = MapRecord::new().with("name", "");
        assert!(!chain.run(&mut record));
        assert_eq!(record.report().for_attribute("name")[0].error_code, "empty");

        let mut record = MapRecord::new().with("username", "batman1").with("name", "");
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Skipped);
        assert!(chain.run(&mut record));
        assert!(record.report().is_empty());
    }

    #[test]
    fn if_present_guard() {
        let mut chain = ValidationChain::new(ChainConfig::new()).unwrap();
        chain
            .if_present(["nickname"], |c| {
                c.validate("Length", ["nickname"], Params::new().with("length", 3..=20))?;
                Ok(())
            })
            .unwrap();

        let mut record = MapRecord::new();
        assert!(chain.run(&mut record));
        assert!(record.report().is_empty());

        let mut record = MapRecord::new().with("nickname", "bm");
        assert!(!chain.run(&mut record));
        assert_eq!(record.report().for_attribute("nickname")[0].error_code, "short");
    }

    #[test]
    fn all_conditions_must_hold() {
        let config = ChainConfig::new().if_present("a").if_present("b");
        let chain = ValidationChain::build(config, |c| presence(c, "c")).unwrap();

        let mut record = MapRecord::new().with("a", 1);
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Skipped);

        let mut record = MapRecord::new().with("a", 1).with("b", 2);
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Failed);
    }

    #[test]
    fn conflicting_conditions_are_allowed() {
        let config = ChainConfig::new().if_present("name").if_absent("name");
        let chain = ValidationChain::build(config, |c| presence(c, "name")).unwrap();
        assert_eq!(chain.conditions().len(), 2);

        let mut record = MapRecord::new().with("name", "Bruce");
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Skipped);
    }

    #[test]
    fn empty_chain_passes() {
        let chain = ValidationChain::new(ChainConfig::new()).unwrap();
        let mut record = MapRecord::new();
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Passed);
        assert!(chain.is_empty());
    }

    #[test]
    fn failing_nested_chain_stops_parent() {
        let chain = ValidationChain::build(ChainConfig::new(), |c| {
            c.chain(ChainConfig::new().with_continue_on_failure(true), |n| {
                presence(n, "a")?;
                presence(n, "b")
            })?;
            presence(c, "c")
        })
        .unwrap();

        let mut record = MapRecord::new();
        assert!(!chain.run(&mut record));
        let failed: Vec<_> = record.report().failed_attributes().collect();
        assert_eq!(failed, ["a", "b"]);
    }

    #[test]
    fn skipped_nested_chain_counts_as_pass() {
        let chain = ValidationChain::build(ChainConfig::new(), |c| {
            c.if_present(["a"], |n| presence(n, "b"))?;
            presence(c, "c")
        })
        .unwrap();

        let mut record = MapRecord::new().with("c", "here");
        assert_eq!(chain.run_outcome(&mut record), ChainOutcome::Passed);
    }

    #[test]
    fn chain_returns_the_nested_chain() {
        let mut root = ValidationChain::new(ChainConfig::new()).unwrap();
        let attributes = root
            .chain(ChainConfig::new().with_continue_on_failure(true), |_| Ok(()))
            .unwrap();
        presence(attributes, "title").unwrap();
        presence(attributes, "body").unwrap();

        assert_eq!(root.len(), 1);
        let ChainItem::Chain(nested) = &root.items()[0] else {
            panic!("expected a nested chain");
        };
        assert_eq!(nested.len(), 2);
        assert!(nested.continue_on_failure());
    }

    #[test]
    fn add_accepts_validations_and_chains() {
        let mut chain = ValidationChain::new(ChainConfig::new()).unwrap();
        let title = Validation::new("Presence", ["title"], Params::new()).unwrap();
        let body = Validation::new("Presence", ["body"], Params::new()).unwrap();

        let last = chain.add([title, body]).unwrap();
        assert!(matches!(last, ChainItem::Validation(v) if v.attributes() == ["body"]));

        let nested = ValidationChain::new(ChainConfig::new()).unwrap();
        assert!(matches!(chain.add([nested]), Some(ChainItem::Chain(_))));
        assert!(chain.add(Vec::<Validation>::new()).is_none());
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn build_errors_propagate() {
        let err = ValidationChain::build(ChainConfig::new(), |c| {
            c.validate("ValueMatch", ["password"], Params::new())?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::ArityMismatch { given: 1, .. }));

        let err = ValidationChain::new(ChainConfig::new().if_present("not valid")).unwrap_err();
        assert_eq!(err, BuildError::InvalidAttribute("not valid".into()));
    }

    #[test]
    fn nested_chains_inherit_registry() {
        let mut registry = ValidatorRegistry::new();
        registry.register(&crate::validators::PRESENCE);
        let mut root =
            ValidationChain::with_registry(Arc::new(registry), ChainConfig::new()).unwrap();

        let err = root
            .chain(ChainConfig::new(), |n| {
                n.validate("Absence", ["x"], Params::new())?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err, BuildError::UnknownValidator("Absence".into()));

        let nested = root
            .chain(ChainConfig::new(), |n| presence(n, "x"))
            .unwrap();
        assert_eq!(nested.registry().len(), 1);
    }

    #[test]
    fn run_is_idempotent() {
        let config = ChainConfig::new().with_continue_on_failure(true);
        let chain = ValidationChain::build(config, |c| {
            presence(c, "name")?;
            c.validate("ValueMatch", ["password", "confirm"], Params::new())?;
            Ok(())
        })
        .unwrap();

        let mut record = MapRecord::new().with("password", "a").with("confirm", "b");
        chain.run(&mut record);
        let first = record.report().clone();
        record.failed_validators().clear();
        chain.run(&mut record);
        assert_eq!(record.report(), &first);
    }

    #[test]
    fn config_deserializes_one_or_many() {
        let config: ChainConfig =
            serde_json::from_value(json!({"continue_on_failure": true, "if_present": "nickname"}))
                .unwrap();
        assert_eq!(
            config,
            ChainConfig::new()
                .with_continue_on_failure(true)
                .if_present("nickname")
        );

        let config: ChainConfig =
            serde_json::from_value(json!({"if_absent": ["a", "b"]})).unwrap();
        assert_eq!(config.if_absent, ["a", "b"]);
        assert!(!config.continue_on_failure);

        assert!(serde_json::from_value::<ChainConfig>(json!({"unless": "x"})).is_err());
    }
}
