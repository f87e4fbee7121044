// Matchers - predicates over derived values
//
// Any `Fn(&V) -> bool` is a matcher. `ValueMatcher` is the serializable
// alternative over `Value`:
// - Comparisons (eq, ne, lt, lte, gt, gte), numeric across Int/Float
// - String operations (contains, regex, starts_with, ends_with, eq_ignore_case);
//   regex patterns compile once, when the matcher is built
// - Boolean logic (and, or, not)
// - Null checks

use crate::shared::models::Value;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Predicate over a derived value
pub trait Matcher<V: ?Sized> {
    fn matches(&self, value: &V) -> bool;
}

impl<V: ?Sized, F> Matcher<V> for F
where
    F: Fn(&V) -> bool,
{
    fn matches(&self, value: &V) -> bool {
        self(value)
    }
}

/// Matcher tree over `Value` (serializable)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValueMatcher {
    /// Matches everything
    Any,

    // Comparison operators
    Eq(Value),
    Ne(Value),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    EqIgnoreCase(String),

    // String operations (Contains also tests list membership)
    Contains(Value),
    Regex(Pattern),
    StartsWith(String),
    EndsWith(String),

    // Boolean logic
    And(Vec<ValueMatcher>),
    Or(Vec<ValueMatcher>),
    Not(Box<ValueMatcher>),

    // Null checks
    IsNull,
    IsNotNull,
}

impl ValueMatcher {
    /// Evaluate against a value
    pub fn evaluate(&self, value: &Value) -> bool {
        match self {
            ValueMatcher::Any => true,
            ValueMatcher::Eq(expected) => value == expected,
            ValueMatcher::Ne(expected) => value != expected,
            ValueMatcher::Lt(bound) => compare(value, bound) == Some(Ordering::Less),
            ValueMatcher::Lte(bound) => matches!(
                compare(value, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ValueMatcher::Gt(bound) => compare(value, bound) == Some(Ordering::Greater),
            ValueMatcher::Gte(bound) => matches!(
                compare(value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            ValueMatcher::EqIgnoreCase(expected) => value
                .as_str()
                .map(|s| s.to_lowercase() == expected.to_lowercase())
                .unwrap_or(false),
            ValueMatcher::Contains(needle) => match (value, needle) {
                (Value::String(s), Value::String(n)) => s.contains(n.as_str()),
                (Value::List(items), n) => items.contains(n),
                _ => false,
            },
            ValueMatcher::Regex(pattern) => value
                .as_str()
                .map(|s| pattern.is_match(s))
                .unwrap_or(false),
            ValueMatcher::StartsWith(prefix) => value
                .as_str()
                .map(|s| s.starts_with(prefix.as_str()))
                .unwrap_or(false),
            ValueMatcher::EndsWith(suffix) => value
                .as_str()
                .map(|s| s.ends_with(suffix.as_str()))
                .unwrap_or(false),
            ValueMatcher::And(matchers) => matchers.iter().all(|m| m.evaluate(value)),
            ValueMatcher::Or(matchers) => matchers.iter().any(|m| m.evaluate(value)),
            ValueMatcher::Not(inner) => !inner.evaluate(value),
            ValueMatcher::IsNull => value.is_null(),
            ValueMatcher::IsNotNull => !value.is_null(),
        }
    }

    /// Both must match
    pub fn and(self, other: ValueMatcher) -> ValueMatcher {
        match self {
            ValueMatcher::And(mut matchers) => {
                matchers.push(other);
                ValueMatcher::And(matchers)
            }
            first => ValueMatcher::And(vec![first, other]),
        }
    }

    /// Either must match
    pub fn or(self, other: ValueMatcher) -> ValueMatcher {
        match self {
            ValueMatcher::Or(mut matchers) => {
                matchers.push(other);
                ValueMatcher::Or(matchers)
            }
            first => ValueMatcher::Or(vec![first, other]),
        }
    }
}

/// Compiled regular expression; serialized as its source text
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Numbers compare numerically, strings lexicographically, booleans as
/// false < true; anything else is unordered.
fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value, bound) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => value.as_f64()?.partial_cmp(&bound.as_f64()?),
    }
}

impl Matcher<Value> for ValueMatcher {
    fn matches(&self, value: &Value) -> bool {
        self.evaluate(value)
    }
}

macro_rules! scalar_matcher {
    ($($ty:ty),*) => {
        $(
            impl Matcher<$ty> for ValueMatcher {
                fn matches(&self, value: &$ty) -> bool {
                    self.evaluate(&Value::from(value.clone()))
                }
            }
        )*
    };
}

scalar_matcher!(String, i64, i32, f64, bool);

/// Matcher builder (sugar)
pub struct Match;

impl Match {
    pub fn any() -> ValueMatcher {
        ValueMatcher::Any
    }

    pub fn eq(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Eq(value.into())
    }

    pub fn ne(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Ne(value.into())
    }

    pub fn lt(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Lt(value.into())
    }

    pub fn lte(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Lte(value.into())
    }

    pub fn gt(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Gt(value.into())
    }

    pub fn gte(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Gte(value.into())
    }

    pub fn eq_ignore_case(value: &str) -> ValueMatcher {
        ValueMatcher::EqIgnoreCase(value.to_string())
    }

    pub fn contains(value: impl Into<Value>) -> ValueMatcher {
        ValueMatcher::Contains(value.into())
    }

    /// Fails when `pattern` does not compile
    pub fn regex(pattern: &str) -> Result<ValueMatcher, regex::Error> {
        Pattern::new(pattern).map(ValueMatcher::Regex)
    }

    pub fn starts_with(prefix: &str) -> ValueMatcher {
        ValueMatcher::StartsWith(prefix.to_string())
    }

    pub fn ends_with(suffix: &str) -> ValueMatcher {
        ValueMatcher::EndsWith(suffix.to_string())
    }

    pub fn not(matcher: ValueMatcher) -> ValueMatcher {
        ValueMatcher::Not(Box::new(matcher))
    }

    pub fn all(matchers: Vec<ValueMatcher>) -> ValueMatcher {
        ValueMatcher::And(matchers)
    }

    pub fn any_of(matchers: Vec<ValueMatcher>) -> ValueMatcher {
        ValueMatcher::Or(matchers)
    }

    pub fn is_null() -> ValueMatcher {
        ValueMatcher::IsNull
    }

    pub fn is_not_null() -> ValueMatcher {
        ValueMatcher::IsNotNull
    }
}
