use std::hash::Hash;

use ahash::AHashMap;

/// An insertion-ordered mapping from keys to values.
///
/// `OrderedPairs` stores entries in a `Vec` in first-insertion order and maintains a
/// hash index from keys to the corresponding position in the `Vec`. Re-inserting an
/// existing key overwrites the value **in place**: the entry keeps its original
/// position and key, and the last written value wins.
///
/// The key type `K` must implement `Eq + Hash`; operations that add entries also
/// require `Clone`, since the key is held both in the entry and in the index.
///
/// `OrderedPairs` is not meant to be a general-purpose map, but rather the cache and
/// snapshot representation for pair cursors, where the discovery order of keys is
/// part of the contract.
///
/// # Examples
///
/// ```
/// use kivi_pairmap::OrderedPairs;
///
/// let mut pairs = OrderedPairs::new();
/// pairs.insert("a", 1);
/// pairs.insert("b", 2);
/// pairs.insert("a", 3);
///
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs.get(&"a"), Some(&3));
/// assert_eq!(pairs.get_index(0), Some((&"a", &3)));
/// assert_eq!(pairs.get_index(1), Some((&"b", &2)));
/// ```
#[derive(Clone, Default)]
pub struct OrderedPairs<K, V> {
    /// Entries in first-insertion order.
    entries: Vec<(K, V)>,
    /// Index mapping keys to positions in `entries`.
    index: AHashMap<K, usize>,
}

impl<K, V> OrderedPairs<K, V> {
    /// Creates a new empty `OrderedPairs`.
    pub fn new() -> OrderedPairs<K, V> {
        OrderedPairs {
            entries: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Creates a new empty `OrderedPairs` with the specified capacity.
    pub fn with_capacity(capacity: usize) -> OrderedPairs<K, V> {
        OrderedPairs {
            entries: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries as a slice, in insertion order.
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Consumes the mapping and returns the underlying `Vec` of entries.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }

    /// Returns the pair at the given position, or `None` if out of range.
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        self.entries.get(position).map(|(k, v)| (k, v))
    }

    /// Returns an iterator over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl<K, V> OrderedPairs<K, V>
where
    K: Eq + Hash,
{
    /// Checks if the mapping contains an entry for the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns a reference to the value associated with the given key,
    /// or `None` if the key is not present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Returns a mutable reference to the value associated with the given key,
    /// or `None` if the key is not present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.index.get(key).map(|&i| &mut self.entries[i].1)
    }
}

impl<K, V> OrderedPairs<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts a key/value pair.
    ///
    /// If the key is already present, the value is overwritten in place (the entry
    /// keeps its original position) and the previous value is returned. Otherwise the
    /// pair is appended and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }
}

impl<K, V> std::fmt::Debug for OrderedPairs<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedPairs")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<K, V> PartialEq for OrderedPairs<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V> Eq for OrderedPairs<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedPairs<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut pairs = OrderedPairs::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            pairs.insert(key, value);
        }
        pairs
    }
}

impl<K, V> From<Vec<(K, V)>> for OrderedPairs<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V> Extend<(K, V)> for OrderedPairs<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedPairs<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedPairs<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map((|(k, v)| (k, v)) as fn(&'a (K, V)) -> (&'a K, &'a V))
    }
}
