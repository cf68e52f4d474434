//! Sift - Predicate composition for scalar values and key/value records.
//!
//! Sift turns `field__operator = expected` keyword bundles into reusable
//! filters. It supports:
//!
//! - A named operator registry: equality, substring, prefix/suffix, range,
//!   ordering and regular expressions, each with a negated form
//! - Scalar filters that test plain values with one operator
//! - Record filters that OR together AND-groups of field clauses
//! - A per-group policy for fields the record does not have
//! - Chaining wrappers that forward operations on a value and fold their
//!   results back in
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use standout_sift::{kwargs, Expected, RecordFilter};
//!
//! let people = vec![
//!     json!({"name": "Ada", "age": 36}),
//!     json!({"name": "Grace", "age": 45}),
//!     json!({"name": "Alan"}),
//! ];
//!
//! // name starts with "a" (any case) and age in [30, 40), or no age at all
//! let filter = RecordFilter::any_of([
//!     kwargs!(name__istart = "a", age__inrange = (30, 40)),
//!     kwargs!(age = Expected::Null, _key_missing_ = true),
//! ])
//! .unwrap();
//!
//! let matched = filter.filter(&people).unwrap();
//! assert_eq!(matched.len(), 2);
//! assert_eq!(matched[0]["name"], "Ada");
//! assert_eq!(matched[1]["name"], "Alan");
//! ```
//!
//! # Filter Semantics
//!
//! A record filter is an OR over criteria; each criterion is an AND over
//! clauses:
//!
//! ```text
//! match = criterion₁ ∨ … ∨ criterionₙ
//! criterionᵢ = clauseᵢ₁ ∧ … ∧ clauseᵢₘ
//! ```
//!
//! Criteria and clauses are evaluated in order and stop at the first
//! decisive result. A criterion looks up all of its fields before testing
//! any of them; if the record lacks one, the criterion's [`KeyMissing`]
//! policy alone decides it, whatever order the keywords were given in.
//!
//! # Operators
//!
//! | Family | Operators |
//! |--------|-----------|
//! | Equality | `equals` (`eq`), `neq`, `ieq`, `nieq` |
//! | Substring | `contains`, `notcontains`, `icontains`, `noticontains` |
//! | Prefix | `start` (`startswith`), `nstart`, `istart`, `nistart` |
//! | Suffix | `end` (`endswith`), `nend`, `iend`, `niend` |
//! | Ordering | `inrange`, `gt`, `gte`, `lt`, `lte` |
//! | Regex | `search`, `match` |
//!
//! # Chaining
//!
//! ```rust
//! use standout_sift::{SequenceChain, SequenceOps, Wrapper};
//!
//! let mut chain = SequenceChain::new(vec![3, 1, 2]);
//! chain.apply(|v| v.sort()).select(|n| n * 2);
//! assert_eq!(chain.reveal(), [2, 4, 6]);
//! ```

#[macro_use]
mod macros;

mod chain;
mod clause;
mod criterion;
mod error;
mod filter;
mod op;
mod record_filter;
mod regexp;
mod traits;
mod value;

// Re-export public API
pub use chain::{
    Chain, Flow, HistoryChain, MappingChain, MappingOps, RecastingChain, SequenceChain,
    SequenceOps, Step, Wrapper,
};
pub use clause::{Clause, Operand};
pub use criterion::{Criterion, Grammar, KeyMissing, DEFAULT_POLICY_KEY, DEFAULT_SEPARATOR};
pub use error::{Result, SiftError};
pub use filter::Filter;
pub use op::{operator_names, resolve, Op};
pub use record_filter::{RecordFilter, RecordFilterBuilder};
pub use regexp::RegExp;
pub use traits::{Record, Scalar};
pub use value::{Expected, Number, Value};
