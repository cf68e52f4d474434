//! Operators and the operator registry.
//!
//! Every operator is a binary test `(actual, expected) -> bool`. The set is
//! closed: names are resolved through a registry built once per process, and
//! an unknown name is a construction-time [`SiftError::UnknownOperator`].
//!
//! Negated operators are never implemented on their own. Each one names a
//! positive counterpart and evaluates to `!positive(actual, expected)`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::clause::Operand;
use crate::error::{Result, SiftError};
use crate::regexp::RegExp;
use crate::value::{Expected, Value};

/// Comparison operator for a field test.
///
/// Grouped by family:
/// - **Equality**: `Equals` / `NotEquals`, `IEquals` / `NotIEquals`
/// - **Containment**: `Contains`, `IContains` and their negations
/// - **Prefix/suffix**: `StartsWith`, `IStartsWith`, `EndsWith`, `IEndsWith`
///   and their negations
/// - **Range/ordering**: `InRange`, `Gt`, `Gte`, `Lt`, `Lte`
/// - **Regex**: `Search` (anywhere), `Match` (anchored at the start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Equals,
    NotEquals,
    IEquals,
    NotIEquals,
    Contains,
    NotContains,
    IContains,
    NotIContains,
    StartsWith,
    NotStartsWith,
    IStartsWith,
    NotIStartsWith,
    EndsWith,
    NotEndsWith,
    IEndsWith,
    NotIEndsWith,
    /// Half-open range: `low <= actual < high`.
    InRange,
    Gt,
    Gte,
    Lt,
    Lte,
    Search,
    Match,
}

/// Alternate spellings accepted by the registry.
const ALIASES: &[(&str, Op)] = &[
    ("eq", Op::Equals),
    ("startswith", Op::StartsWith),
    ("endswith", Op::EndsWith),
];

static REGISTRY: Lazy<HashMap<&'static str, Op>> = Lazy::new(|| {
    Op::ALL
        .iter()
        .map(|op| (op.as_str(), *op))
        .chain(ALIASES.iter().copied())
        .collect()
});

/// Looks up an operator by name.
///
/// Matching is exact and case-sensitive.
///
/// ```
/// use standout_sift::{resolve, Op};
///
/// assert_eq!(resolve("icontains").unwrap(), Op::IContains);
/// assert_eq!(resolve("eq").unwrap(), Op::Equals);
/// assert!(resolve("operator").is_err());
/// ```
pub fn resolve(name: &str) -> Result<Op> {
    REGISTRY
        .get(name)
        .copied()
        .ok_or_else(|| SiftError::unknown(name))
}

/// Returns every name the registry accepts, aliases included, sorted.
pub fn operator_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

impl Op {
    /// Every operator, in declaration order.
    pub const ALL: [Op; 23] = [
        Op::Equals,
        Op::NotEquals,
        Op::IEquals,
        Op::NotIEquals,
        Op::Contains,
        Op::NotContains,
        Op::IContains,
        Op::NotIContains,
        Op::StartsWith,
        Op::NotStartsWith,
        Op::IStartsWith,
        Op::NotIStartsWith,
        Op::EndsWith,
        Op::NotEndsWith,
        Op::IEndsWith,
        Op::NotIEndsWith,
        Op::InRange,
        Op::Gt,
        Op::Gte,
        Op::Lt,
        Op::Lte,
        Op::Search,
        Op::Match,
    ];

    /// Returns the canonical registry name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Equals => "equals",
            Op::NotEquals => "neq",
            Op::IEquals => "ieq",
            Op::NotIEquals => "nieq",
            Op::Contains => "contains",
            Op::NotContains => "notcontains",
            Op::IContains => "icontains",
            Op::NotIContains => "noticontains",
            Op::StartsWith => "start",
            Op::NotStartsWith => "nstart",
            Op::IStartsWith => "istart",
            Op::NotIStartsWith => "nistart",
            Op::EndsWith => "end",
            Op::NotEndsWith => "nend",
            Op::IEndsWith => "iend",
            Op::NotIEndsWith => "niend",
            Op::InRange => "inrange",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Search => "search",
            Op::Match => "match",
        }
    }

    /// For a negated operator, returns its positive counterpart.
    pub fn negation_of(self) -> Option<Op> {
        match self {
            Op::NotEquals => Some(Op::Equals),
            Op::NotIEquals => Some(Op::IEquals),
            Op::NotContains => Some(Op::Contains),
            Op::NotIContains => Some(Op::IContains),
            Op::NotStartsWith => Some(Op::StartsWith),
            Op::NotIStartsWith => Some(Op::IStartsWith),
            Op::NotEndsWith => Some(Op::EndsWith),
            Op::NotIEndsWith => Some(Op::IEndsWith),
            _ => None,
        }
    }

    /// For a positive operator with a negated twin, returns the twin.
    pub fn negated(self) -> Option<Op> {
        Op::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.negation_of() == Some(self))
    }

    /// Returns `true` if this operator is the negation of another one.
    pub fn is_negated(self) -> bool {
        self.negation_of().is_some()
    }

    /// Validates an expected operand for this operator and prepares it for
    /// repeated evaluation. Regex patterns are compiled here.
    pub fn bind(self, expected: Expected) -> Result<Operand> {
        match self {
            Op::InRange => match expected {
                Expected::List(bounds) if bounds.len() == 2 => {
                    let mut bounds = bounds.into_iter();
                    match (bounds.next(), bounds.next()) {
                        (Some(low), Some(high)) => Ok(Operand::Range(low, high)),
                        _ => Err(self.invalid("expected a (low, high) pair")),
                    }
                }
                other => Err(self.invalid(format!("expected a (low, high) pair, got {other}"))),
            },
            Op::Search | Op::Match => {
                let pattern = expected
                    .to_text()
                    .ok_or_else(|| self.invalid(format!("expected a pattern, got {expected}")))?;
                Ok(Operand::Pattern(RegExp::with_mode(
                    &pattern,
                    self == Op::Match,
                )?))
            }
            _ => match expected {
                Expected::List(_) => {
                    Err(self.invalid(format!("expected a single value, got {expected}")))
                }
                value => Ok(Operand::Value(value)),
            },
        }
    }

    /// Evaluates this operator against a bound operand.
    pub fn test(self, actual: &Value<'_>, operand: &Operand) -> Result<bool> {
        match self.negation_of() {
            Some(positive) => Ok(!positive.test(actual, operand)?),
            None => self.test_positive(actual, operand),
        }
    }

    /// Binds `expected` and evaluates in one step.
    ///
    /// Prefer building a [`Filter`](crate::Filter) when the same operand is
    /// tested repeatedly; this recompiles regex patterns on every call.
    pub fn eval(self, actual: &Value<'_>, expected: &Expected) -> Result<bool> {
        let operand = self.bind(expected.clone())?;
        self.test(actual, &operand)
    }

    fn test_positive(self, actual: &Value<'_>, operand: &Operand) -> Result<bool> {
        match operand {
            Operand::Pattern(regex) => Ok(regex.is_match(&self.text(actual)?)),
            Operand::Range(low, high) => {
                let above_low = matches!(
                    actual.compare(low)?,
                    Some(Ordering::Greater | Ordering::Equal)
                );
                Ok(above_low && actual.compare(high)? == Some(Ordering::Less))
            }
            Operand::Value(expected) => match self {
                Op::Equals => actual.equals(expected),
                Op::Gt => Ok(actual.compare(expected)? == Some(Ordering::Greater)),
                Op::Gte => Ok(matches!(
                    actual.compare(expected)?,
                    Some(Ordering::Greater | Ordering::Equal)
                )),
                Op::Lt => Ok(actual.compare(expected)? == Some(Ordering::Less)),
                Op::Lte => Ok(matches!(
                    actual.compare(expected)?,
                    Some(Ordering::Less | Ordering::Equal)
                )),
                _ => {
                    let field = self.text(actual)?;
                    let wanted = expected
                        .to_text()
                        .ok_or_else(|| expected.coercion("string"))?;
                    Ok(self.match_text(&field, &wanted))
                }
            },
        }
    }

    fn match_text(self, field: &str, wanted: &str) -> bool {
        match self {
            Op::IEquals => field.to_lowercase() == wanted.to_lowercase(),
            Op::Contains => field.contains(wanted),
            Op::IContains => field.to_lowercase().contains(&wanted.to_lowercase()),
            Op::StartsWith => field.starts_with(wanted),
            Op::IStartsWith => field.to_lowercase().starts_with(&wanted.to_lowercase()),
            Op::EndsWith => field.ends_with(wanted),
            Op::IEndsWith => field.to_lowercase().ends_with(&wanted.to_lowercase()),
            _ => false,
        }
    }

    fn text<'v>(self, actual: &Value<'v>) -> Result<Cow<'v, str>> {
        actual.to_text().ok_or(SiftError::TypeMismatch {
            op: self.as_str(),
            actual: actual.type_name(),
        })
    }

    fn invalid(self, reason: impl Into<String>) -> SiftError {
        SiftError::InvalidOperand {
            op: self.as_str(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Op {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn eval(op: Op, actual: Value<'_>, expected: impl Into<Expected>) -> bool {
        op.eval(&actual, &expected.into()).unwrap()
    }

    #[test]
    fn registry_resolves_canonical_names_and_aliases() {
        for op in Op::ALL {
            assert_eq!(resolve(op.as_str()).unwrap(), op);
        }
        assert_eq!(resolve("eq").unwrap(), Op::Equals);
        assert_eq!(resolve("startswith").unwrap(), Op::StartsWith);
        assert_eq!(resolve("endswith").unwrap(), Op::EndsWith);
    }

    #[test]
    fn registry_is_case_sensitive() {
        assert!(matches!(
            resolve("EQUALS"),
            Err(SiftError::UnknownOperator { name }) if name == "EQUALS"
        ));
        assert!(resolve("").is_err());
        assert!(resolve("operator").is_err());
    }

    #[test]
    fn operator_names_lists_everything() {
        let names = operator_names();
        assert_eq!(names.len(), Op::ALL.len() + ALIASES.len());
        assert!(names.contains(&"noticontains"));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn negation_pairs() {
        assert_eq!(Op::NotEquals.negation_of(), Some(Op::Equals));
        assert_eq!(Op::Equals.negated(), Some(Op::NotEquals));
        assert_eq!(Op::IStartsWith.negated(), Some(Op::NotIStartsWith));
        assert_eq!(Op::InRange.negated(), None);
        assert!(Op::NotIContains.is_negated());
        assert!(!Op::Search.is_negated());
    }

    #[test]
    fn equality_family() {
        assert!(eval(Op::Equals, Value::Number(Number::I64(123)), 123));
        assert!(eval(Op::Equals, Value::String("123"), 123));
        assert!(eval(Op::NotEquals, Value::String("123"), "abc"));
        assert!(eval(Op::IEquals, Value::String("ABCDE"), "abcde"));
        assert!(!eval(Op::NotIEquals, Value::String("ABCDE"), "abcde"));
    }

    #[test]
    fn containment_family() {
        assert!(eval(Op::Contains, Value::String("abcdef"), "bcd"));
        assert!(!eval(Op::Contains, Value::String("ABCDEF"), "bcd"));
        assert!(eval(Op::IContains, Value::String("ABCDEF"), "bcd"));
        assert!(!eval(Op::NotContains, Value::String("abcdef"), "bcd"));
        assert!(!eval(Op::NotIContains, Value::String("ABCDEF"), "bcd"));
        // Numbers are tested through their text form.
        assert!(eval(Op::Contains, Value::Number(Number::I64(123)), 2));
    }

    #[test]
    fn prefix_and_suffix_families() {
        assert!(eval(Op::StartsWith, Value::String("abcdef"), "abc"));
        assert!(!eval(Op::NotStartsWith, Value::String("abcdef"), "abc"));
        assert!(eval(Op::IStartsWith, Value::String("ABCDEF"), "abc"));
        assert!(!eval(Op::NotIStartsWith, Value::String("ABCDEF"), "abc"));
        assert!(eval(Op::EndsWith, Value::String("abcdef"), "def"));
        assert!(eval(Op::IEndsWith, Value::String("ABCDEF"), "def"));
        assert!(eval(Op::NotEndsWith, Value::String("abcdef"), "abc"));
    }

    #[test]
    fn inrange_is_half_open() {
        assert!(eval(Op::InRange, Value::String("12"), (10, 13)));
        assert!(!eval(Op::InRange, Value::String("12"), (10, 12)));
        assert!(eval(Op::InRange, Value::Number(Number::I64(10)), (10, 12)));
        assert!(!eval(Op::InRange, Value::Number(Number::I64(9)), (10, 12)));
    }

    #[test]
    fn ordering_operators() {
        let twelve = Value::Number(Number::I64(12));
        assert!(eval(Op::Gt, twelve, 10));
        assert!(!eval(Op::Gt, twelve, 12));
        assert!(eval(Op::Gte, twelve, 12));
        assert!(eval(Op::Lt, twelve, "18"));
        assert!(eval(Op::Lte, twelve, 12.0));
        assert!(!eval(Op::Gt, Value::Null, 1));
    }

    #[test]
    fn regex_family() {
        assert!(eval(Op::Search, Value::String("xx10xx"), r"\d"));
        assert!(!eval(Op::Match, Value::String("xx10xx"), r"\d"));
        assert!(eval(Op::Match, Value::String("10xx"), r"\d"));
    }

    #[test]
    fn bind_validates_operand_shape() {
        assert!(matches!(
            Op::InRange.bind(10.into()),
            Err(SiftError::InvalidOperand { op: "inrange", .. })
        ));
        assert!(Op::InRange.bind(vec![1, 2, 3].into()).is_err());
        assert!(Op::Contains.bind((1, 2).into()).is_err());
        assert!(matches!(
            Op::Search.bind("(".into()),
            Err(SiftError::InvalidRegex(_))
        ));
        assert!(Op::Search.bind(Expected::Null).is_err());
    }

    #[test]
    fn string_ops_reject_null_fields() {
        let err = Op::Contains.eval(&Value::Null, &"a".into()).unwrap_err();
        assert!(matches!(
            err,
            SiftError::TypeMismatch {
                op: "contains",
                actual: "null"
            }
        ));
    }

    #[test]
    fn from_str_and_display() {
        let op: Op = "nistart".parse().unwrap();
        assert_eq!(op, Op::NotIStartsWith);
        assert_eq!(op.to_string(), "nistart");
        assert!("gtt".parse::<Op>().is_err());
    }
}
