//! Iterator-style helpers for wrappers over `HashMap`.

use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

use super::Wrapper;

/// Query helpers for any [`Wrapper`] holding a `HashMap<K, V>`.
///
/// Every helper sees entries as `(key, value)` pairs. [`filter`](Self::filter)
/// and [`select`](Self::select) collect the pairs back into a map and push it.
pub trait MappingOps<K: Eq + Hash, V>: Wrapper<Target = HashMap<K, V>> {
    /// Iterates over the entries, in the map's order.
    fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.wrapped().iter()
    }

    /// Returns `true` if every entry satisfies `f`.
    fn all<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().all(|(k, v)| f(k, v))
    }

    /// Returns `true` if any entry satisfies `f`.
    fn any<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().any(|(k, v)| f(k, v))
    }

    /// Maps every entry through `f` and folds the results with `op`.
    ///
    /// Entries are visited in the map's order, so `op` should not depend on
    /// it.
    fn aggregate<U, F, O>(&self, mut f: F, op: O) -> Option<U>
    where
        F: FnMut(&K, &V) -> U,
        O: FnMut(U, U) -> U,
    {
        self.iter().map(|(k, v)| f(k, v)).reduce(op)
    }

    /// Keeps the entries satisfying `f` and pushes the result.
    fn filter<F>(&mut self, mut f: F) -> Self::Pushed<'_>
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let kept = self
            .iter()
            .filter(|(k, v)| f(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.push(kept)
    }

    /// Maps every entry to a new pair and pushes the result. Pairs that
    /// collide on their new key keep the last one produced.
    fn select<F>(&mut self, mut f: F) -> Self::Pushed<'_>
    where
        F: FnMut(&K, &V) -> (K, V),
    {
        let mapped = self.iter().map(|(k, v)| f(k, v)).collect();
        self.push(mapped)
    }

    /// Inserts or overwrites entries in place.
    fn update<I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.wrapped_mut().extend(pairs);
        self
    }

    /// Copies the entries out into any collection of pairs.
    fn reveal_as<U>(&self) -> U
    where
        K: Clone,
        V: Clone,
        U: FromIterator<(K, V)>,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Eq + Hash, V, W: Wrapper<Target = HashMap<K, V>>> MappingOps<K, V> for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{HistoryChain, MappingChain};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn person() -> HashMap<&'static str, Value> {
        HashMap::from([("name", json!("abcdef")), ("age", json!("12"))])
    }

    #[test]
    fn update_overwrites_in_place() {
        let revealed = MappingChain::new(person())
            .update([("name", json!("ABCDEF")), ("city", json!("Paris"))])
            .reveal();
        assert_eq!(revealed["name"], "ABCDEF");
        assert_eq!(revealed["age"], "12");
        assert_eq!(revealed.len(), 3);
    }

    #[test]
    fn all_and_any_see_pairs() {
        let chain = MappingChain::new(person());
        assert!(chain.all(|_, v| v.is_string()));
        assert!(chain.any(|k, _| *k == "age"));
        assert!(!chain.any(|_, v| v.is_number()));
    }

    #[test]
    fn filter_and_select_collapse_back_into_a_map() {
        let mut chain = HistoryChain::new(person());
        chain
            .filter(|k, _| *k == "name")
            .select(|k, v| (*k, json!(v.as_str().map(str::len))));
        assert_eq!(chain.wrapped(), &HashMap::from([("name", json!(6))]));
        assert_eq!(chain.depth(), 2);

        chain.backward().unwrap().backward().unwrap();
        assert_eq!(chain.wrapped(), &person());
    }

    #[test]
    fn aggregate_and_reveal_as() {
        let chain = MappingChain::new(HashMap::from([("a", 1), ("b", 2), ("c", 3)]));
        assert_eq!(chain.aggregate(|_, v| *v, |a, b| a + b), Some(6));

        let sorted: BTreeMap<&str, i32> = chain.reveal_as();
        assert_eq!(sorted.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(chain.iter().len(), 3);
    }
}
