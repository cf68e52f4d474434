//! Fluent chaining wrappers.
//!
//! A wrapper holds one value and forwards operations to it. Each operation
//! reports what it did as a [`Step`]:
//!
//! - [`Step::Unchanged`]: it mutated the value in place, or did nothing. The
//!   chain continues on the same wrapper.
//! - [`Step::Replaced`]: it produced a new value of the same type. The
//!   wrapper folds the new value back in through [`Wrapper::push`].
//! - [`Step::Computed`]: it produced an unrelated result. The chain ends and
//!   the raw result is handed back.
//!
//! The three wrappers differ only in how they push:
//!
//! | Wrapper | Push |
//! |---------|------|
//! | [`Chain`] | replaces the value in place |
//! | [`HistoryChain`] | replaces the value in place and logs the old one |
//! | [`RecastingChain`] | returns a new wrapper, leaving the original alone |
//!
//! [`SequenceOps`] and [`MappingOps`] add iterator-style helpers to any
//! wrapper over a `Vec` or a `HashMap`.

mod history;
mod mapping;
mod recast;
mod sequence;

use std::collections::HashMap;
use std::fmt;

pub use history::HistoryChain;
pub use mapping::MappingOps;
pub use recast::RecastingChain;
pub use sequence::SequenceOps;

/// What a forwarded operation did to the wrapped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T, R = ()> {
    /// Mutated in place or left alone.
    Unchanged,
    /// Produced a replacement value.
    Replaced(T),
    /// Produced an unrelated result.
    Computed(R),
}

/// Where a dispatched call left the chain.
pub enum Flow<'a, W: Wrapper + 'a, R> {
    /// Still on the same wrapper.
    Same(&'a mut W),
    /// The wrapper pushed a replacement; holds whatever its push returns.
    Pushed(W::Pushed<'a>),
    /// The chain ended with a computed result.
    Done(R),
}

impl<'a, W: Wrapper + 'a, R> Flow<'a, W, R> {
    /// Returns `true` if the chain ended.
    pub fn is_done(&self) -> bool {
        matches!(self, Flow::Done(_))
    }

    /// Returns the computed result, if the chain ended.
    pub fn done(self) -> Option<R> {
        match self {
            Flow::Done(result) => Some(result),
            _ => None,
        }
    }
}

impl<W: Wrapper, R: fmt::Debug> fmt::Debug for Flow<'_, W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Same(_) => f.write_str("Same"),
            Flow::Pushed(_) => f.write_str("Pushed"),
            Flow::Done(result) => f.debug_tuple("Done").field(result).finish(),
        }
    }
}

/// A value holder that forwards operations and folds their results back in.
pub trait Wrapper: Sized {
    /// The wrapped value's type.
    type Target;

    /// What [`push`](Wrapper::push) hands back: the same wrapper for
    /// in-place variants, a new wrapper for [`RecastingChain`].
    type Pushed<'a>
    where
        Self: 'a;

    /// Returns the current value.
    fn wrapped(&self) -> &Self::Target;

    /// Returns the current value mutably.
    fn wrapped_mut(&mut self) -> &mut Self::Target;

    /// Folds a replacement value back into the chain.
    fn push(&mut self, value: Self::Target) -> Self::Pushed<'_>;

    /// Consumes the wrapper, returning the current value.
    fn into_inner(self) -> Self::Target;

    /// Dispatches an operation and routes its [`Step`].
    fn call<R, F>(&mut self, op: F) -> Flow<'_, Self, R>
    where
        F: FnOnce(&mut Self::Target) -> Step<Self::Target, R>,
    {
        match op(self.wrapped_mut()) {
            Step::Unchanged => Flow::Same(self),
            Step::Replaced(value) => Flow::Pushed(self.push(value)),
            Step::Computed(result) => Flow::Done(result),
        }
    }

    /// Runs an in-place mutation and stays on this wrapper.
    fn apply<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self::Target),
    {
        f(self.wrapped_mut());
        self
    }

    /// Runs an operation that builds a new value and pushes it.
    fn then<F>(&mut self, f: F) -> Self::Pushed<'_>
    where
        F: FnOnce(&Self::Target) -> Self::Target,
    {
        let value = f(self.wrapped());
        self.push(value)
    }

    /// Runs a computation over the value and returns its result, ending the
    /// chain.
    fn compute<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Self::Target) -> R,
    {
        f(self.wrapped())
    }

    /// Returns a copy of the current value.
    fn reveal(&self) -> Self::Target
    where
        Self::Target: Clone,
    {
        self.wrapped().clone()
    }
}

/// Wrapper that replaces its value in place on every push.
#[derive(Clone, Default, PartialEq)]
pub struct Chain<T> {
    wrapped: T,
}

/// [`Chain`] over a sequence; see [`SequenceOps`].
pub type SequenceChain<T> = Chain<Vec<T>>;

/// [`Chain`] over a mapping; see [`MappingOps`].
pub type MappingChain<K, V> = Chain<HashMap<K, V>>;

impl<T> Chain<T> {
    /// Wraps a value.
    pub fn new(value: T) -> Self {
        Chain { wrapped: value }
    }
}

impl<T> Wrapper for Chain<T> {
    type Target = T;
    type Pushed<'a>
        = &'a mut Self
    where
        Self: 'a;

    fn wrapped(&self) -> &T {
        &self.wrapped
    }

    fn wrapped_mut(&mut self) -> &mut T {
        &mut self.wrapped
    }

    fn push(&mut self, value: T) -> &mut Self {
        self.wrapped = value;
        self
    }

    fn into_inner(self) -> T {
        self.wrapped
    }
}

impl<T: fmt::Display> fmt::Display for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.wrapped, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chain").field(&self.wrapped).finish()
    }
}
