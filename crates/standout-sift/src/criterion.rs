//! Criteria: AND-groups of clauses with a missing-key policy.
//!
//! A [`Criterion`] is parsed from one keyword bundle, a sequence of
//! `(key, expected)` pairs. Keys follow the [`Grammar`]: `field` tests
//! equality, `field__operator` names an operator, and one reserved key sets
//! the [`KeyMissing`] policy instead of testing a field.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clause::Clause;
use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::traits::Record;
use crate::value::Expected;

/// Default separator between a field name and its operator.
pub const DEFAULT_SEPARATOR: &str = "__";

/// Default reserved key carrying the missing-key policy.
pub const DEFAULT_POLICY_KEY: &str = "_key_missing_";

/// Tunable parts of the keyword grammar.
///
/// Deserializes with defaults for any omitted field, so a host config can
/// override just the separator:
///
/// ```
/// use standout_sift::Grammar;
///
/// let grammar: Grammar = serde_json::from_str(r#"{"separator": "."}"#).unwrap();
/// assert_eq!(grammar.separator, ".");
/// assert_eq!(grammar.policy_key, "_key_missing_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grammar {
    /// Separator between field name and operator name.
    pub separator: String,
    /// Reserved key that sets the missing-key policy.
    pub policy_key: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar {
            separator: DEFAULT_SEPARATOR.to_string(),
            policy_key: DEFAULT_POLICY_KEY.to_string(),
        }
    }
}

impl Grammar {
    /// Returns a grammar with a different separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns a grammar with a different reserved policy key.
    pub fn with_policy_key(mut self, key: impl Into<String>) -> Self {
        self.policy_key = key.into();
        self
    }
}

/// What a criterion does when a tested field is absent from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMissing {
    /// The criterion fails. Set with `false` or by omitting the policy key.
    #[default]
    Reject,
    /// The criterion passes as soon as an absent field is reached. Set with `true`.
    Accept,
    /// Evaluation fails with [`SiftError::MissingKey`]. Set with null.
    Raise,
}

impl KeyMissing {
    /// Reads a policy from the value given for the reserved key.
    pub fn from_expected(value: &Expected) -> Result<Self> {
        match value {
            Expected::Bool(false) => Ok(KeyMissing::Reject),
            Expected::Bool(true) => Ok(KeyMissing::Accept),
            Expected::Null => Ok(KeyMissing::Raise),
            other => Err(SiftError::InvalidPolicy {
                value: other.to_string(),
            }),
        }
    }
}

/// An AND-group of clauses.
///
/// A criterion holds at least one clause. It matches a record when every
/// clause matches, subject to its [`KeyMissing`] policy.
#[derive(Debug, Clone)]
pub struct Criterion {
    clauses: Vec<Clause>,
    key_missing: KeyMissing,
}

impl Criterion {
    /// Builds a criterion from clauses that are already bound.
    pub fn new(clauses: Vec<Clause>) -> Result<Self> {
        if clauses.is_empty() {
            return Err(SiftError::EmptyCriterion);
        }
        Ok(Criterion {
            clauses,
            key_missing: KeyMissing::default(),
        })
    }

    /// Parses a keyword bundle with the default [`Grammar`].
    pub fn parse<I, K, V>(kwargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        Self::parse_with(kwargs, &Grammar::default())
    }

    /// Parses a keyword bundle with a custom grammar.
    ///
    /// Fails with [`SiftError::UnknownOperator`] on an unknown operator
    /// suffix and with [`SiftError::EmptyCriterion`] when the bundle has no
    /// field keys.
    pub fn parse_with<I, K, V>(kwargs: I, grammar: &Grammar) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        let mut clauses = Vec::new();
        let mut key_missing = KeyMissing::default();
        for (key, value) in kwargs {
            let key = key.as_ref();
            if key == grammar.policy_key {
                key_missing = KeyMissing::from_expected(&value.into())?;
            } else {
                clauses.push(Clause::parse(key, value, &grammar.separator)?);
            }
        }
        Ok(Criterion::new(clauses)?.key_missing(key_missing))
    }

    /// Sets the missing-key policy.
    pub fn key_missing(mut self, policy: KeyMissing) -> Self {
        self.key_missing = policy;
        self
    }

    /// Adds a clause to the group.
    pub fn and(mut self, field: &str, op: Op, expected: impl Into<Expected>) -> Result<Self> {
        self.clauses.push(Clause::new(field, op, expected)?);
        Ok(self)
    }

    /// Returns the clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the missing-key policy.
    pub fn policy(&self) -> KeyMissing {
        self.key_missing
    }

    /// Tests a record against every clause.
    ///
    /// Every tested field is looked up before any clause runs. If one is
    /// absent the policy alone decides the criterion: `Reject` returns
    /// `false`, `Accept` returns `true`, and `Raise` returns
    /// [`SiftError::MissingKey`] naming the first absent field. Otherwise the
    /// clauses are evaluated in order and the first failing one ends
    /// evaluation.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> Result<bool> {
        let mut values = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            let Some(value) = record.field(&clause.field) else {
                trace!(field = %clause.field, policy = ?self.key_missing, "field absent");
                return match self.key_missing {
                    KeyMissing::Reject => Ok(false),
                    KeyMissing::Accept => Ok(true),
                    KeyMissing::Raise => Err(SiftError::MissingKey {
                        field: clause.field.clone(),
                    }),
                };
            };
            values.push(value);
        }
        for (clause, value) in self.clauses.iter().zip(&values) {
            if !clause.matches(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> serde_json::Value {
        json!({"name": "abcdef", "age": "12"})
    }

    #[test]
    fn all_clauses_must_hold() {
        let criterion = Criterion::parse([("name", json!("abcdef")), ("age", json!(12))]).unwrap();
        assert!(criterion.matches(&record()).unwrap());

        let criterion = Criterion::parse([("name", json!("zorro")), ("age", json!(12))]).unwrap();
        assert!(!criterion.matches(&record()).unwrap());
    }

    #[test]
    fn empty_bundle_is_rejected() {
        let err = Criterion::parse(Vec::<(&str, Expected)>::new()).unwrap_err();
        assert!(matches!(err, SiftError::EmptyCriterion));

        // The policy key alone is not a field test.
        let err = Criterion::parse([("_key_missing_", true)]).unwrap_err();
        assert!(matches!(err, SiftError::EmptyCriterion));
    }

    #[test]
    fn policy_key_is_read() {
        let accept = Criterion::parse([("value", json!(1)), ("_key_missing_", json!(true))]).unwrap();
        assert_eq!(accept.policy(), KeyMissing::Accept);
        assert_eq!(accept.clauses().len(), 1);

        let raise = Criterion::parse([("value", json!(1)), ("_key_missing_", json!(null))]).unwrap();
        assert_eq!(raise.policy(), KeyMissing::Raise);

        let reject = Criterion::parse([("value", json!(1)), ("_key_missing_", json!(false))]).unwrap();
        assert_eq!(reject.policy(), KeyMissing::Reject);
    }

    #[test]
    fn invalid_policy_value() {
        let err = Criterion::parse([("value", json!(1)), ("_key_missing_", json!("yes"))]).unwrap_err();
        assert!(matches!(err, SiftError::InvalidPolicy { .. }));
    }

    #[test]
    fn missing_key_policies() {
        let kwargs = || vec![("name", Expected::from("abcdef")), ("value__inrange", (10, 13).into())];

        let reject = Criterion::parse(kwargs()).unwrap();
        assert!(!reject.matches(&record()).unwrap());

        let accept = Criterion::parse(kwargs()).unwrap().key_missing(KeyMissing::Accept);
        assert!(accept.matches(&record()).unwrap());

        let raise = Criterion::parse(kwargs()).unwrap().key_missing(KeyMissing::Raise);
        assert!(matches!(
            raise.matches(&record()),
            Err(SiftError::MissingKey { field }) if field == "value"
        ));
    }

    #[test]
    fn absence_outranks_failing_clauses() {
        // `name` fails, but the absent `value` decides regardless of order.
        let name_first = [("name", json!("zorro")), ("value", json!(1))];
        let value_first = [("value", json!(1)), ("name", json!("zorro"))];

        for kwargs in [name_first, value_first] {
            let reject = Criterion::parse(kwargs.clone()).unwrap();
            assert!(!reject.matches(&record()).unwrap());

            let accept = Criterion::parse(kwargs.clone())
                .unwrap()
                .key_missing(KeyMissing::Accept);
            assert!(accept.matches(&record()).unwrap());

            let raise = Criterion::parse(kwargs).unwrap().key_missing(KeyMissing::Raise);
            assert!(matches!(
                raise.matches(&record()),
                Err(SiftError::MissingKey { field }) if field == "value"
            ));
        }
    }

    #[test]
    fn present_fields_still_all_hold() {
        let criterion = Criterion::parse([("name", json!("zorro")), ("age", json!(12))])
            .unwrap()
            .key_missing(KeyMissing::Accept);
        assert!(!criterion.matches(&record()).unwrap());
    }

    #[test]
    fn custom_grammar() {
        let grammar = Grammar::default()
            .with_separator(":")
            .with_policy_key("$missing");
        let criterion = Criterion::parse_with(
            [("name:istart", json!("ABC")), ("$missing", json!(true))],
            &grammar,
        )
        .unwrap();
        assert_eq!(criterion.policy(), KeyMissing::Accept);
        assert!(criterion.matches(&record()).unwrap());
    }

    #[test]
    fn builder_and() {
        let criterion = Criterion::parse([("name", "abcdef")])
            .unwrap()
            .and("age", Op::Gte, 12)
            .unwrap();
        assert_eq!(criterion.clauses().len(), 2);
        assert!(criterion.matches(&record()).unwrap());
    }

    #[test]
    fn key_missing_serde() {
        assert_eq!(serde_json::to_string(&KeyMissing::Raise).unwrap(), "\"raise\"");
        let policy: KeyMissing = serde_json::from_str("\"accept\"").unwrap();
        assert_eq!(policy, KeyMissing::Accept);
    }
}
