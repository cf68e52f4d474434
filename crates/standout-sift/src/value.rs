//! Runtime value types for field tests.
//!
//! [`Value`] is what a record or scalar hands to a filter: a cheap view
//! borrowed from the source. [`Expected`] is the owned operand a filter is
//! built with. Comparisons between the two always coerce the expected side
//! to the type of the actual value, so `"12"` equals `12` when the field
//! holds a string and `12` equals `"12"` when the field holds a number.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, SiftError};

/// Field value for comparison, borrowed from the source record or scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Explicit null. Distinct from an absent field.
    Null,
    /// A nested array or object. Only reachable through JSON records; every
    /// operator rejects it.
    Composite(&'static str),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Composite(kind) => *kind,
        }
    }

    /// Renders scalars as text. Strings are borrowed, numbers and booleans
    /// are formatted. Null and composite values have no text form.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Composite(_) => None,
        }
    }

    /// Compares this value against an expected operand after coercing the
    /// operand to this value's type.
    ///
    /// Returns `Ok(None)` when the two cannot be ordered (NaN, or null on
    /// either side against a non-null). Returns an error when the operand
    /// cannot be converted at all.
    pub fn compare(&self, expected: &Expected) -> Result<Option<Ordering>> {
        if let Expected::Null = expected {
            return Ok(self.is_null().then_some(Ordering::Equal));
        }
        match self {
            Value::Null => Ok(None),
            Value::Composite(kind) => Err(SiftError::TypeMismatch {
                op: "compare",
                actual: *kind,
            }),
            Value::String(actual) => {
                let text = expected.to_text().ok_or_else(|| expected.coercion("string"))?;
                Ok(Some((*actual).cmp(&*text)))
            }
            Value::Number(actual) => {
                let number = expected.to_number()?;
                Ok(actual.compare(number))
            }
            Value::Bool(actual) => {
                let flag = expected.to_bool()?;
                Ok(Some(actual.cmp(&flag)))
            }
        }
    }

    /// Coerced equality. See [`Value::compare`].
    pub fn equals(&self, expected: &Expected) -> Result<bool> {
        Ok(self.compare(expected)? == Some(Ordering::Equal))
    }
}

/// Numeric value supporting all common numeric types.
///
/// Mixed comparisons go through `f64`; same-variant comparisons stay exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Parses decimal text, preferring integers over floats.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Some(Number::U64(n));
        }
        text.parse::<f64>().ok().map(Number::F64)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

/// Whole floats keep their `.0`, so `12.0` renders as `"12.0"` and never as
/// the integer text `"12"`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$ty> for Expected {
                fn from(n: $ty) -> Self {
                    Expected::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F64 as f64,
    f64 => F64 as f64,
}

/// Owned operand a filter compares field values against.
///
/// Lists only make sense for operators that take several operands, such as
/// the two bounds of `inrange`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// String operand.
    String(String),
    /// Numeric operand.
    Number(Number),
    /// Boolean operand.
    Bool(bool),
    /// Null operand. Only equal to a null field.
    Null,
    /// Several operands.
    List(Vec<Expected>),
}

impl Expected {
    /// Renders scalar operands as text.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Expected::String(s) => Some(Cow::Borrowed(s.as_str())),
            Expected::Number(n) => Some(Cow::Owned(n.to_string())),
            Expected::Bool(b) => Some(Cow::Owned(b.to_string())),
            Expected::Null | Expected::List(_) => None,
        }
    }

    /// Converts the operand to a number.
    pub fn to_number(&self) -> Result<Number> {
        match self {
            Expected::Number(n) => Ok(*n),
            Expected::Bool(b) => Ok(Number::I64(i64::from(*b))),
            Expected::String(s) => Number::parse(s).ok_or_else(|| self.coercion("number")),
            Expected::Null | Expected::List(_) => Err(self.coercion("number")),
        }
    }

    /// Converts the operand to a boolean.
    ///
    /// Strings must spell `true` or `false` (any case); numbers are `true`
    /// when non-zero.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Expected::Bool(b) => Ok(*b),
            Expected::Number(n) => Ok(n.to_f64() != 0.0),
            Expected::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Expected::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.coercion("bool")),
        }
    }

    pub(crate) fn coercion(&self, target: &'static str) -> SiftError {
        SiftError::Coercion {
            value: self.to_string(),
            target,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::String(s) => write!(f, "{s:?}"),
            Expected::Number(n) => write!(f, "{n}"),
            Expected::Bool(b) => write!(f, "{b}"),
            Expected::Null => f.write_str("null"),
            Expected::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<String> for Expected {
    fn from(s: String) -> Self {
        Expected::String(s)
    }
}

impl From<&str> for Expected {
    fn from(s: &str) -> Self {
        Expected::String(s.to_string())
    }
}

impl From<bool> for Expected {
    fn from(b: bool) -> Self {
        Expected::Bool(b)
    }
}

impl From<Number> for Expected {
    fn from(n: Number) -> Self {
        Expected::Number(n)
    }
}

impl<T: Into<Expected>> From<Option<T>> for Expected {
    fn from(value: Option<T>) -> Self {
        value.map_or(Expected::Null, Into::into)
    }
}

impl<T: Into<Expected>> From<Vec<T>> for Expected {
    fn from(items: Vec<T>) -> Self {
        Expected::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Expected>, B: Into<Expected>> From<(A, B)> for Expected {
    fn from((low, high): (A, B)) -> Self {
        Expected::List(vec![low.into(), high.into()])
    }
}

impl From<serde_json::Value> for Expected {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Expected::Null,
            serde_json::Value::Bool(b) => Expected::Bool(b),
            serde_json::Value::Number(n) => Expected::Number(Number::from(&n)),
            serde_json::Value::String(s) => Expected::String(s),
            serde_json::Value::Array(items) => {
                Expected::List(items.into_iter().map(Expected::from).collect())
            }
            // Objects have no operand meaning; keep their JSON text so that
            // equality against a string field still behaves predictably.
            other @ serde_json::Value::Object(_) => Expected::String(other.to_string()),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}
