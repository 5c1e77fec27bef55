#![forbid(unsafe_code)]

use std::{borrow::Borrow, collections::BTreeMap, iter::FromIterator, ops::Index, slice};

////////////////////////////////////////////////////////////////////////////////

/// Map with a sorted key index over a dense value store. Lookups go through
/// the index in O(log n); iteration walks the values in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMap<K, V> {
    index: BTreeMap<K, usize>,
    values: Vec<V>,
}

impl<K: Ord, V> FlatMap<K, V> {
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn as_slice(&self) -> &[V] {
        self.values.as_slice()
    }

    /// Inserts a new key at the end of the dense store, or overwrites the
    /// value of an existing key in place and returns the previous value.
    /// Positions recorded in the index never move.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.values[pos], value)),
            None => {
                self.index.insert(key, self.values.len());
                self.values.push(value);
                None
            }
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.values[pos])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index.get(key) {
            Some(&pos) => self.values.get_mut(pos),
            None => None,
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Keys in sorted order, the order of the index rather than the store.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }
}

impl<K: Ord, V> Default for FlatMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////////////

impl<K, V, Q> Index<&Q> for FlatMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Panics when the key is absent. Callers that cannot guarantee presence
    /// must use [`FlatMap::get`] instead.
    fn index(&self, index: &Q) -> &Self::Output {
        self.get(index).expect("key not present in flat map")
    }
}

impl<K: Ord, V> Extend<(K, V)> for FlatMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FlatMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut flat_map = FlatMap::new();
        flat_map.extend(iter);
        flat_map
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for FlatMap<K, V> {
    fn from(value: Vec<(K, V)>) -> Self {
        Self::from_iter(value)
    }
}

impl<K: Ord, V> From<FlatMap<K, V>> for Vec<V> {
    fn from(value: FlatMap<K, V>) -> Self {
        Self::from_iter(value)
    }
}

impl<K: Ord, V> IntoIterator for FlatMap<K, V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a FlatMap<K, V> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Append-only variant keeping every value ever inserted under a key. The
/// index maps each key to its positions in the dense store, in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMultiMap<K, V> {
    index: BTreeMap<K, Vec<usize>>,
    values: Vec<V>,
}

impl<K: Ord, V> FlatMultiMap<K, V> {
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    /// Total number of stored values across all keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn as_slice(&self) -> &[V] {
        self.values.as_slice()
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.index.entry(key).or_default().push(self.values.len());
        self.values.push(value);
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map_or(0, Vec::len)
    }

    /// All values inserted under `key`, oldest first. Empty when the key was
    /// never inserted.
    pub fn get_all<Q>(&self, key: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.index.get(key) {
            Some(positions) => positions.iter().map(|&pos| &self.values[pos]).collect(),
            None => Vec::new(),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }
}

impl<K: Ord, V> Default for FlatMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for FlatMultiMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FlatMultiMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = FlatMultiMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> From<Vec<(K, V)>> for FlatMultiMap<K, V> {
    fn from(value: Vec<(K, V)>) -> Self {
        Self::from_iter(value)
    }
}

impl<K: Ord, V> IntoIterator for FlatMultiMap<K, V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a FlatMultiMap<K, V> {
    type Item = &'a V;
    type IntoIter = slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
