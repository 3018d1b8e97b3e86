//! Order-preserving group-by helpers shared by the calculators.
//!
//! Groups are kept in first-appearance order so that every max/min lookup
//! resolves ties to the key encountered first in the input.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Per-key accumulator that remembers the order keys first appeared in.
#[derive(Debug)]
pub struct Groups<'a, V>(IndexMap<&'a str, V>);

impl<'a, V> Default for Groups<'a, V> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<'a, V: Default> Groups<'a, V> {
    /// Mutable accumulator for `key`, created on first sight.
    pub fn entry(&mut self, key: &'a str) -> &mut V {
        self.0.entry(key).or_default()
    }
}

impl<'a, V> Groups<'a, V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a, V: PartialOrd + Copy> Groups<'a, V> {
    /// Key with the largest value; first-seen wins a tie.
    pub fn max(&self) -> Option<(&'a str, V)> {
        self.pick(|candidate, best| candidate > best)
    }

    /// Key with the smallest value; first-seen wins a tie.
    pub fn min(&self) -> Option<(&'a str, V)> {
        self.pick(|candidate, best| candidate < best)
    }

    fn pick(&self, better: impl Fn(V, V) -> bool) -> Option<(&'a str, V)> {
        let mut iter = self.0.iter().map(|(&key, &value)| (key, value));
        let first = iter.next()?;
        Some(iter.fold(first, |best, candidate| {
            if better(candidate.1, best.1) {
                candidate
            } else {
                best
            }
        }))
    }
}

/// Count rows per key.
pub fn value_counts<'a>(keys: impl IntoIterator<Item = &'a str>) -> Groups<'a, u64> {
    let mut groups = Groups::default();
    for key in keys {
        *groups.entry(key) += 1;
    }
    groups
}

/// Sum `value` per key. Absent values contribute nothing but still create
/// the group, so a key whose values are all absent sums to zero.
pub fn group_sum<'a>(rows: impl IntoIterator<Item = (&'a str, Option<f64>)>) -> Groups<'a, f64> {
    let mut groups = Groups::default();
    for (key, value) in rows {
        *groups.entry(key) += value.unwrap_or(0.0);
    }
    groups
}

/// Number of distinct keys.
pub fn nunique<'a>(keys: impl IntoIterator<Item = &'a str>) -> usize {
    keys.into_iter().collect::<HashSet<_>>().len()
}
