//! In-place wrapper that keeps every value it replaced.

use std::fmt;
use std::mem;

use tracing::trace;

use super::Wrapper;
use crate::error::{Result, SiftError};

/// Wrapper that replaces its value in place and logs the value it replaced.
///
/// [`backward`](Self::backward) undoes the newest push. The initial value
/// can never be undone.
///
/// ```
/// use standout_sift::{HistoryChain, Wrapper};
///
/// let mut chain = HistoryChain::new(vec![1, 2, 3]);
/// chain.then(|v| v.iter().map(|n| n * 10).collect());
/// assert_eq!(chain.wrapped(), &vec![10, 20, 30]);
///
/// chain.backward().unwrap();
/// assert_eq!(chain.wrapped(), &vec![1, 2, 3]);
/// assert!(chain.backward().is_err());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct HistoryChain<T> {
    wrapped: T,
    past: Vec<T>,
}

impl<T> HistoryChain<T> {
    /// Wraps a value with an empty log.
    pub fn new(value: T) -> Self {
        HistoryChain {
            wrapped: value,
            past: Vec::new(),
        }
    }

    /// Restores the value that preceded the newest push.
    ///
    /// Fails with [`SiftError::HistoryExhausted`] when only the initial value
    /// remains. The chain is left as it was.
    pub fn backward(&mut self) -> Result<&mut Self> {
        let previous = self.past.pop().ok_or(SiftError::HistoryExhausted)?;
        self.wrapped = previous;
        trace!(depth = self.past.len(), "history rolled back");
        Ok(self)
    }

    /// Iterates over the log, oldest first. The last item is the current
    /// value.
    pub fn history(&self) -> impl Iterator<Item = &T> {
        self.past.iter().chain(std::iter::once(&self.wrapped))
    }

    /// Number of pushes that [`backward`](Self::backward) can still undo.
    pub fn depth(&self) -> usize {
        self.past.len()
    }
}

impl<T> Wrapper for HistoryChain<T> {
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
        let previous = mem::replace(&mut self.wrapped, value);
        self.past.push(previous);
        trace!(depth = self.past.len(), "history pushed");
        self
    }

    fn into_inner(self) -> T {
        self.wrapped
    }
}

impl<T: fmt::Display> fmt::Display for HistoryChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.wrapped, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for HistoryChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HistoryChain").field(&self.wrapped).finish()
    }
}
