//! A wrapper around a vector of pairs that QPack uses to represent maps.
//!
//! QPack maps are ordered: the decoder hands back the pairs in the order they were
//! written, and the encoder writes them in the order they are stored. [`VecMap`] keeps
//! that order and does not deduplicate keys; keeping keys unique is up to whoever builds
//! the map.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use qpack::prelude::*;
//!
//! // from a vector of tuples, order is kept as given
//! let vm = VecMap::from(vec![("b", 2), ("a", 1)]);
//! assert_eq!(vm.keys().collect::<Vec<_>>(), vec![&"b", &"a"]);
//!
//! // from a `BTreeMap`, order is the map's key order
//! let mut btmap = BTreeMap::new();
//! btmap.insert("b", 2);
//! btmap.insert("a", 1);
//!
//! let bt_vm = VecMap::from(btmap);
//! assert_eq!(bt_vm.keys().collect::<Vec<_>>(), vec![&"a", &"b"]);
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` pairs.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Appends a pair. An existing pair with an equal key is left in place.
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let mut vmap = VecMap::new();
    /// vmap.push("a", 1);
    /// vmap.push("a", 2);
    ///
    /// assert_eq!(vmap.len(), 2);
    /// ```
    pub fn push(&mut self, key: K, value: V) { self.0.push((key, value)) }

    /// Returns length.
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in order.
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(3, "baz"), (1, "foo")]);
    ///
    /// // first element is the first one pushed
    /// let (k, v) = vmap.iter().next().unwrap();
    ///
    /// assert_eq!((k, v), (&3, &"baz"))
    /// ```
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Iterates over the keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Iterates over the values, in order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }

    /// Consumes the [`VecMap`], returning the underlying pairs.
    pub fn into_inner(self) -> Vec<(K, V)> { self.0 }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Returns the value of the first pair whose key equals `key`.
    ///
    /// This is a linear scan.
    ///
    /// # Example
    ///
    /// ```
    /// use qpack::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("a", 1), ("b", 2), ("a", 3)]);
    ///
    /// assert_eq!(vmap.get(&"a"), Some(&1));
    /// assert_eq!(vmap.get(&"c"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries. Later duplicates
    /// win.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { VecMap(v) }
}

impl<K, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { hm.into_iter().collect() }
}

impl<K, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { bt.into_iter().collect() }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap(Vec::from_iter(iter))
    }
}

impl<K, V> Extend<(K, V)> for VecMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) { self.0.extend(iter) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let vm: VecMap<u8, u8> = vec![(3, 0), (1, 0), (2, 0)].into_iter().collect();
        assert_eq!(vm.keys().cloned().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut vm = VecMap::new();
        vm.push("k", 1);
        vm.push("k", 2);

        assert_eq!(vm.len(), 2);
        assert_eq!(vm.get(&"k"), Some(&1));

        let hm: HashMap<_, _> = vm.into_hashmap();
        assert_eq!(hm[&"k"], 2);
    }
}
