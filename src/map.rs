//! Parameter map for identified nodes.
//!
//! [`Params`] wraps an [`IndexMap`] so that parameters keep the order in which
//! they were harvested, which helps when inspecting or debugging a node.
//! That order never leaks into an identity string: the encoder always walks
//! [`Params::sorted`], and two maps holding the same entries compare equal
//! whatever order they were built in.
//!
//! ## Examples
//!
//! ```rust
//! use whatid::{Params, Value};
//!
//! let mut a = Params::new();
//! a.insert("b", 1);
//! a.insert("a", 2);
//!
//! let mut b = Params::new();
//! b.insert("a", 2);
//! b.insert("b", 1);
//!
//! assert_eq!(a, b);
//! let keys: Vec<_> = a.sorted().into_iter().map(|(k, _)| k.as_str()).collect();
//! assert_eq!(keys, vec!["a", "b"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// String-keyed parameters of a [`Node`](crate::Node).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params(IndexMap<String, Value>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Params(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Params(IndexMap::with_capacity(capacity))
    }

    /// Inserts a parameter, returning the previous value under that key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use whatid::Params;
    ///
    /// let mut params = Params::new();
    /// assert!(params.insert("depth", 3).is_none());
    /// assert!(params.insert("depth", 4).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a parameter, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Entries in canonical order: ascending byte-wise comparison of the keys.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
        entries
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(map: HashMap<String, Value>) -> Self {
        Params(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for Params {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Params(map.into_iter().collect())
    }
}

impl From<Params> for BTreeMap<String, Value> {
    fn from(params: Params) -> Self {
        params.0.into_iter().collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Params(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for Params {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_is_bytewise() {
        let params: Params = [
            ("b".to_string(), Value::from(1)),
            ("B".to_string(), Value::from(2)),
            ("_a".to_string(), Value::from(3)),
            ("a".to_string(), Value::from(4)),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = params.sorted().into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["B", "_a", "a", "b"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut params = Params::new();
        params.insert("z", 1);
        params.insert("y", 2);
        params.insert("x", 3);
        assert_eq!(params.remove("y"), Some(Value::from(2)));
        let keys: Vec<_> = params.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "x"]);
    }
}
