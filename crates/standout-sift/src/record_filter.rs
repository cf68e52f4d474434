//! Record filter builder and executor.
//!
//! A [`RecordFilter`] is an OR over [`Criterion`]s, each of which is an AND
//! over field clauses:
//!
//! ```text
//! match = criterion₁ ∨ criterion₂ ∨ … ∨ criterionₙ
//! criterionᵢ = clauseᵢ₁ ∧ clauseᵢ₂ ∧ …   (subject to its missing-key policy)
//! ```

use tracing::debug;

use crate::criterion::{Criterion, Grammar};
use crate::error::{Result, SiftError};
use crate::traits::{Accessed, Record};
use crate::value::{Expected, Value};

/// A filter over key/value records.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_sift::{kwargs, RecordFilter};
///
/// let filter = RecordFilter::any_of([
///     kwargs!(name = "abcdef"),
///     kwargs!(age = 13),
/// ])
/// .unwrap();
///
/// assert!(filter.matches(&json!({"name": "abcdef", "age": 12})).unwrap());
/// assert!(filter.matches(&json!({"name": "toto", "age": 13})).unwrap());
/// assert!(!filter.matches(&json!({"name": "toto", "age": 12})).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RecordFilter {
    criteria: Vec<Criterion>,
}

impl RecordFilter {
    /// Starts a builder with the default [`Grammar`].
    pub fn builder() -> RecordFilterBuilder {
        RecordFilterBuilder::default()
    }

    /// Builds a filter with a single criterion parsed from one keyword bundle.
    pub fn from_kwargs<I, K, V>(kwargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        Self::builder().or_kwargs(kwargs)?.build()
    }

    /// Builds a filter with one criterion per keyword bundle. A record matches
    /// when any bundle matches in full.
    pub fn any_of<B, I, K, V>(bundles: B) -> Result<Self>
    where
        B: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        bundles
            .into_iter()
            .try_fold(Self::builder(), |builder, kwargs| builder.or_kwargs(kwargs))?
            .build()
    }

    /// Builds a filter from criteria that are already parsed.
    pub fn from_criteria(criteria: Vec<Criterion>) -> Result<Self> {
        if criteria.is_empty() {
            return Err(SiftError::EmptyFilter);
        }
        debug!(
            criteria = criteria.len(),
            clauses = criteria.iter().map(|c| c.clauses().len()).sum::<usize>(),
            "built record filter"
        );
        Ok(RecordFilter { criteria })
    }

    /// Returns the criteria, in evaluation order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests a single record.
    ///
    /// Criteria are tried in order; the first one that matches ends
    /// evaluation with `true`.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> Result<bool> {
        for criterion in &self.criteria {
            if criterion.matches(record)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Tests an item through an accessor function instead of a [`Record`]
    /// implementation.
    pub fn matches_with<T, F>(&self, item: &T, accessor: F) -> Result<bool>
    where
        for<'a> F: Fn(&'a T, &str) -> Option<Value<'a>>,
    {
        self.matches(&Accessed { item, accessor })
    }

    /// Returns references to the matching records, in input order.
    pub fn filter<'a, R: Record>(&self, records: &'a [R]) -> Result<Vec<&'a R>> {
        let mut results = Vec::new();
        for record in records {
            if self.matches(record)? {
                results.push(record);
            }
        }
        Ok(results)
    }

    /// Returns clones of the matching records.
    pub fn filter_cloned<R: Record + Clone>(&self, records: &[R]) -> Result<Vec<R>> {
        Ok(self.filter(records)?.into_iter().cloned().collect())
    }

    /// Counts the matching records.
    pub fn count<R: Record>(&self, records: &[R]) -> Result<usize> {
        Ok(self.filter(records)?.len())
    }

    /// Returns `true` if any record matches.
    pub fn any<R: Record>(&self, records: &[R]) -> Result<bool> {
        for record in records {
            if self.matches(record)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if every record matches.
    pub fn all<R: Record>(&self, records: &[R]) -> Result<bool> {
        for record in records {
            if !self.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Finds the first matching record.
    pub fn find<'a, R: Record>(&self, records: &'a [R]) -> Result<Option<&'a R>> {
        for record in records {
            if self.matches(record)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

/// Builder for [`RecordFilter`].
///
/// Each `or_*` call adds one criterion. [`build`](Self::build) fails if none
/// were added.
#[derive(Debug, Clone, Default)]
pub struct RecordFilterBuilder {
    grammar: Grammar,
    criteria: Vec<Criterion>,
}

impl RecordFilterBuilder {
    /// Sets the grammar used by later [`or_kwargs`](Self::or_kwargs) calls.
    pub fn grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Adds a parsed criterion as a new OR branch.
    pub fn or(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Parses a keyword bundle into a new OR branch.
    pub fn or_kwargs<I, K, V>(self, kwargs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Expected>,
    {
        let criterion = Criterion::parse_with(kwargs, &self.grammar)?;
        Ok(self.or(criterion))
    }

    /// Finalizes the filter.
    pub fn build(self) -> Result<RecordFilter> {
        RecordFilter::from_criteria(self.criteria)
    }
}
