//! Scalar filters.
//!
//! A [`Filter`] binds one operator to one expected operand and tests plain
//! values against it.

use tracing::debug;

use crate::clause::Operand;
use crate::error::{Result, SiftError};
use crate::op::{resolve, Op};
use crate::traits::Scalar;
use crate::value::Expected;

/// A single-operator test over scalar values.
///
/// # Example
///
/// ```
/// use standout_sift::{kwargs, Filter};
///
/// let words = ["ab", "bc", "ca", "AB"];
///
/// let filter = Filter::from_kwargs(kwargs!(contains = "a")).unwrap();
/// assert_eq!(filter.filter(&words).unwrap(), [&"ab", &"ca"]);
///
/// let filter = Filter::new("icontains", "a").unwrap();
/// assert_eq!(filter.filter(&words).unwrap(), [&"ab", &"ca", &"AB"]);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    op: Op,
    operand: Operand,
}

impl Filter {
    /// Builds a filter from an operator name and its operand.
    pub fn new(op: &str, expected: impl Into<Expected>) -> Result<Self> {
        Self::with_op(resolve(op)?, expected)
    }

    /// Builds a filter from a resolved operator.
    pub fn with_op(op: Op, expected: impl Into<Expected>) -> Result<Self> {
        let operand = op.bind(expected.into())?;
        debug!(%op, "built scalar filter");
        Ok(Filter { op, operand })
    }

    /// Builds a filter from a keyword bundle holding exactly one
    /// `operator = expected` entry.
    ///
    /// An empty bundle, a bundle with several entries, or an unknown operator
    /// name all fail with [`SiftError::UnknownOperator`].
    pub fn from_kwargs<I, K, V>(kwargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        let mut entries = kwargs.into_iter();
        match (entries.next(), entries.next()) {
            (Some((name, expected)), None) => Self::new(name.as_ref(), expected),
            (None, _) => Err(SiftError::unknown("")),
            (Some((first, _)), Some((second, _))) => {
                let mut names = vec![first.as_ref().to_string(), second.as_ref().to_string()];
                names.extend(entries.map(|(name, _)| name.as_ref().to_string()));
                Err(SiftError::unknown(names.join(", ")))
            }
        }
    }

    /// Returns the operator.
    pub fn op(&self) -> Op {
        self.op
    }

    /// Returns the bound operand.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Tests one value.
    pub fn matches<S: Scalar + ?Sized>(&self, value: &S) -> Result<bool> {
        self.op.test(&value.scalar_value(), &self.operand)
    }

    /// Returns references to the matching items, in input order.
    pub fn filter<'a, S: Scalar>(&self, items: &'a [S]) -> Result<Vec<&'a S>> {
        let mut results = Vec::new();
        for item in items {
            if self.matches(item)? {
                results.push(item);
            }
        }
        Ok(results)
    }

    /// Counts the matching items.
    pub fn count<S: Scalar>(&self, items: &[S]) -> Result<usize> {
        Ok(self.filter(items)?.len())
    }

    /// Returns `true` if any item matches.
    pub fn any<S: Scalar>(&self, items: &[S]) -> Result<bool> {
        for item in items {
            if self.matches(item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if every item matches.
    pub fn all<S: Scalar>(&self, items: &[S]) -> Result<bool> {
        for item in items {
            if !self.matches(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Finds the first matching item.
    pub fn find<'a, S: Scalar>(&self, items: &'a [S]) -> Result<Option<&'a S>> {
        for item in items {
            if self.matches(item)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}
