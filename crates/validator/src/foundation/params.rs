//! Validator parameters
//!
//! Parameters are supplied by name when a validation is declared and checked
//! once, when the validator is built. A missing or mis-shaped parameter is a
//! [`BuildError`], never a validation failure.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ruleweave_validator::foundation::{NamedFormat, Param, Params};
//!
//! let length = Params::new().with("length", 4..=10);
//! let roles = Params::new().with("in", Param::set(["admin", "editor"]));
//! let email = Params::new().with("format", NamedFormat::Email);
//! let custom = Params::new().with("format", Param::pattern(r"^[A-Z]{3}$")?);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use smallvec::SmallVec;

use crate::foundation::BuildError;

// ============================================================================
// NAMED FORMATS
// ============================================================================

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+\-]+@[A-Za-z0-9_\-]+\.([A-Za-z0-9_\-]+\.)*[A-Za-z]+$")
        .expect("email pattern is valid")
});

static IP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").expect("ip pattern is valid")
});

static ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("alnum pattern is valid"));

static HEX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("hex pattern is valid"));

/// Pre-defined formats understood by the Format validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedFormat {
    /// `local@domain.tld`, sub-domains allowed.
    Email,
    /// Dotted-quad IPv4 shape.
    Ip,
    /// ASCII letters and digits only.
    Alnum,
    /// Hexadecimal digits only.
    Hex,
}

impl NamedFormat {
    /// All named formats.
    pub const ALL: [NamedFormat; 4] = [Self::Email, Self::Ip, Self::Alnum, Self::Hex];

    /// The format's name as used in parameters.
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Ip => "ip",
            Self::Alnum => "alnum",
            Self::Hex => "hex",
        }
    }

    /// Error code reported when a value does not match, `not_<name>`.
    pub fn error_code(self) -> &'static str {
        match self {
            Self::Email => "not_email",
            Self::Ip => "not_ip",
            Self::Alnum => "not_alnum",
            Self::Hex => "not_hex",
        }
    }

    /// The compiled pattern.
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Email => &EMAIL_REGEX,
            Self::Ip => &IP_REGEX,
            Self::Alnum => &ALNUM_REGEX,
            Self::Hex => &HEX_REGEX,
        }
    }
}

impl fmt::Display for NamedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedFormat {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| BuildError::UnknownFormat(s.to_string()))
    }
}

// ============================================================================
// PARAM
// ============================================================================

/// A single validator parameter.
#[derive(Debug, Clone)]
pub enum Param {
    /// Inclusive range between two comparable values.
    Range {
        /// Lower bound (inclusive).
        min: Value,
        /// Upper bound (inclusive).
        max: Value,
    },
    /// Explicit set of values, kept in declaration order.
    Set(Vec<Value>),
    /// One of the pre-defined formats.
    Format(NamedFormat),
    /// A caller-supplied pattern.
    Pattern(Regex),
    /// Any other value.
    Value(Value),
}

impl Param {
    /// Inclusive range `min..=max`.
    pub fn range(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Set of values.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Compiles a custom pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Short name of the parameter's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::Set(_) => "set",
            Self::Format(_) => "format",
            Self::Pattern(_) => "pattern",
            Self::Value(value) => crate::foundation::value::kind_name(value),
        }
    }
}

macro_rules! impl_range_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<RangeInclusive<$ty>> for Param {
                fn from(range: RangeInclusive<$ty>) -> Self {
                    let (min, max) = range.into_inner();
                    Self::range(min, max)
                }
            }
        )*
    };
}

impl_range_param!(i32, i64, u32, u64, usize, f64);

impl From<RangeInclusive<&str>> for Param {
    fn from(range: RangeInclusive<&str>) -> Self {
        let (min, max) = range.into_inner();
        Self::range(min, max)
    }
}

impl From<NamedFormat> for Param {
    fn from(format: NamedFormat) -> Self {
        Self::Format(format)
    }
}

impl From<Regex> for Param {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Param {
    fn from(items: Vec<T>) -> Self {
        Self::set(items)
    }
}

// ============================================================================
// PARAMS
// ============================================================================

/// Named parameters for one validator instance, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: SmallVec<[(Cow<'static, str>, Param); 2]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, param: impl Into<Param>) -> Self {
        self.insert(name, param);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, param: impl Into<Param>) {
        let name = name.into();
        let param = param.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = param,
            None => self.entries.push((name, param)),
        }
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if a parameter with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, param)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Fetches a required parameter, reporting which validator asked for it.
    pub(crate) fn require(
        &self,
        validator: &'static str,
        param: &'static str,
    ) -> Result<&Param, BuildError> {
        self.get(param)
            .ok_or(BuildError::MissingParam { validator, param })
    }
}

impl<K, P> FromIterator<(K, P)> for Params
where
    K: Into<Cow<'static, str>>,
    P: Into<Param>,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, param) in iter {
            params.insert(name, param);
        }
        params
    }
}
