//! Clause types for field predicates.
//!
//! A [`Clause`] is a single bound test: a field name, an operator, and the
//! operand the operator was validated against. Clauses are parsed once, when
//! a filter is built, and then evaluated any number of times.

use crate::error::Result;
use crate::op::{resolve, Op};
use crate::regexp::RegExp;
use crate::value::{Expected, Value};

/// A single field predicate.
///
/// # Example
///
/// ```
/// use standout_sift::{Clause, Op, Value};
///
/// let clause = Clause::new("name", Op::Contains, "bcd").unwrap();
/// assert!(clause.matches(&Value::String("abcdef")).unwrap());
///
/// let parsed = Clause::parse("name__istart", "ABC", "__").unwrap();
/// assert_eq!(parsed.field, "name");
/// assert_eq!(parsed.op, Op::IStartsWith);
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    /// The field name to test.
    pub field: String,
    /// The operator.
    pub op: Op,
    /// The operand, validated for `op`.
    pub operand: Operand,
}

impl Clause {
    /// Creates a clause from an already-resolved operator.
    pub fn new(field: impl Into<String>, op: Op, expected: impl Into<Expected>) -> Result<Self> {
        Ok(Clause {
            field: field.into(),
            op,
            operand: op.bind(expected.into())?,
        })
    }

    /// Parses a `field` or `field<sep>operator` key.
    ///
    /// A key without the separator tests equality. The operator is whatever
    /// follows the last separator, so field names may contain the separator
    /// themselves as long as an operator suffix is given.
    pub fn parse(key: &str, expected: impl Into<Expected>, separator: &str) -> Result<Self> {
        let (field, op) = match key.rsplit_once(separator) {
            Some((field, name)) if !separator.is_empty() => (field, resolve(name)?),
            _ => (key, Op::Equals),
        };
        Clause::new(field, op, expected)
    }

    /// Evaluates this clause against a field value.
    pub fn matches(&self, field_value: &Value<'_>) -> Result<bool> {
        self.op.test(field_value, &self.operand)
    }
}

/// Expected operand after validation by [`Op::bind`].
#[derive(Debug, Clone)]
pub enum Operand {
    /// A single value, for equality, ordering, and text operators.
    Value(Expected),
    /// Bounds for `inrange`.
    Range(Expected, Expected),
    /// Compiled pattern for `search` and `match`.
    Pattern(RegExp),
}
