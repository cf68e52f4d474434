//! Wrapper that hands back a fresh wrapper on every push.

use std::fmt;

use super::Wrapper;

/// Wrapper whose replacements produce a new wrapper.
///
/// The wrapper a push was called on keeps its value, so the old and new
/// wrappers never share state.
///
/// ```
/// use standout_sift::{RecastingChain, Wrapper};
///
/// let mut original = RecastingChain::new(vec![1, 2, 3]);
/// let longer = original.then(|v| v.iter().copied().chain([4, 5]).collect());
///
/// assert_eq!(longer.wrapped(), &vec![1, 2, 3, 4, 5]);
/// assert_eq!(original.wrapped(), &vec![1, 2, 3]);
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct RecastingChain<T> {
    wrapped: T,
}

impl<T> RecastingChain<T> {
    /// Wraps a value.
    pub fn new(value: T) -> Self {
        RecastingChain { wrapped: value }
    }
}

impl<T> Wrapper for RecastingChain<T> {
    type Target = T;
    type Pushed<'a>
        = Self
    where
        Self: 'a;

    fn wrapped(&self) -> &T {
        &self.wrapped
    }

    fn wrapped_mut(&mut self) -> &mut T {
        &mut self.wrapped
    }

    fn push(&mut self, value: T) -> Self {
        RecastingChain::new(value)
    }

    fn into_inner(self) -> T {
        self.wrapped
    }
}

impl<T: fmt::Display> fmt::Display for RecastingChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.wrapped, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for RecastingChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecastingChain").field(&self.wrapped).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Flow, Step};

    #[test]
    fn push_leaves_the_original_alone() {
        let mut original = RecastingChain::new("abc".to_string());
        let mut upper = original.then(|s| s.to_uppercase());
        assert_eq!(upper.wrapped(), "ABC");
        assert_eq!(original.wrapped(), "abc");

        upper.apply(|s| s.push('!'));
        assert_eq!(upper.into_inner(), "ABC!");
        assert_eq!(original.into_inner(), "abc");
    }

    #[test]
    fn mutations_still_happen_in_place() {
        let mut chain = RecastingChain::new(vec![1]);
        chain.apply(|v| v.push(2));
        assert_eq!(chain.wrapped(), &vec![1, 2]);
    }

    #[test]
    fn call_hands_back_the_new_wrapper() {
        let mut chain = RecastingChain::new(2);
        match chain.call(|n| Step::<i32, ()>::Replaced(*n * 3)) {
            Flow::Pushed(fresh) => assert_eq!(fresh.wrapped(), &6),
            other => panic!("expected a new wrapper, got {other:?}"),
        }
        assert_eq!(chain.wrapped(), &2);
    }

    #[test]
    fn formatting() {
        let chain = RecastingChain::new(vec!["a"]);
        assert_eq!(format!("{chain:?}"), r#"RecastingChain(["a"])"#);
        assert_eq!(RecastingChain::new(1.5).to_string(), "1.5");
    }
}
