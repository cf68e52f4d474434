//! Iterator-style helpers for wrappers over `Vec`.

use std::slice;

use super::Wrapper;

/// Query helpers for any [`Wrapper`] holding a `Vec<T>`.
///
/// Read-only helpers end the chain. [`filter`](Self::filter) and
/// [`select`](Self::select) build a new vector and push it, so they follow the
/// wrapper's push policy.
///
/// ```
/// use standout_sift::{SequenceChain, SequenceOps, Wrapper};
///
/// let mut chain = SequenceChain::new(vec![1, 2, 3, 4]);
/// let total = chain
///     .filter(|n| n % 2 == 0)
///     .select(|n| n * 10)
///     .aggregate(|n| *n, |a, b| a + b);
/// assert_eq!(total, Some(60));
/// assert_eq!(chain.reveal(), [20, 40]);
/// ```
pub trait SequenceOps<T>: Wrapper<Target = Vec<T>> {
    /// Iterates over the items.
    fn iter(&self) -> slice::Iter<'_, T> {
        self.wrapped().iter()
    }

    /// Returns `true` if every item satisfies `f`. Empty sequences pass.
    fn all<F>(&self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut f = f;
        self.iter().all(|item| f(item))
    }

    /// Returns `true` if any item satisfies `f`.
    fn any<F>(&self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut f = f;
        self.iter().any(|item| f(item))
    }

    /// Returns the first item satisfying `f`.
    fn first<F>(&self, f: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut f = f;
        self.iter().find(|item| f(item))
    }

    /// Maps every item through `f` and folds the results left to right with
    /// `op`. Returns `None` for an empty sequence.
    fn aggregate<U, F, O>(&self, f: F, op: O) -> Option<U>
    where
        F: FnMut(&T) -> U,
        O: FnMut(U, U) -> U,
    {
        self.iter().map(f).reduce(op)
    }

    /// Keeps the items satisfying `f` and pushes the result.
    fn filter<F>(&mut self, f: F) -> Self::Pushed<'_>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut f = f;
        let kept = self.iter().filter(|item| f(item)).cloned().collect();
        self.push(kept)
    }

    /// Maps every item through `f` and pushes the result.
    fn select<F>(&mut self, f: F) -> Self::Pushed<'_>
    where
        F: FnMut(&T) -> T,
    {
        let mapped = self.iter().map(f).collect();
        self.push(mapped)
    }

    /// Copies the items out into any collection.
    fn reveal_as<U>(&self) -> U
    where
        T: Clone,
        U: FromIterator<T>,
    {
        self.iter().cloned().collect()
    }
}

impl<T, W: Wrapper<Target = Vec<T>>> SequenceOps<T> for W {}
