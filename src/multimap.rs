#[cfg(feature = "rayon")]
pub use crate::rayon::map as rayon;

use crate::map::{fmt_entries, IntoIter, Iter, Keys, Values};
use crate::ValueSet;
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;
use std::ops::Range;
use std::slice;

/// Multimap implementation where entries are stored as a flattened vector sorted by key:
///  - `a -> 1`
///  - `a -> 2`
///  - `b -> 3`
///
/// Iteration is key-major. Values sharing a key are visited in the order they were inserted.
///
/// # Examples
///
/// ```
/// use sorted_flat_map::FlatMultimap;
///
/// let mut map = FlatMultimap::new();
/// map.insert(2, 3);
/// map.insert(1, 1);
/// map.insert(1, 2);
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &1), (&1, &2), (&2, &3)]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FlatMultimap<K, V> {
    pub(crate) entries: Vec<(K, V)>,
}

impl<K, V> FlatMultimap<K, V> {
    /// Creates an empty `FlatMultimap` with a capacity of 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty `FlatMultimap` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears the map, removing all key-value pairs. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// An iterator visiting all key-value pairs in key-major order. The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            iter: self.entries.iter(),
        }
    }

    /// An iterator visiting all keys in ascending order, once per value. The iterator element type is `&'a K`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMultimap;
    ///
    /// let map = FlatMultimap::from([(2, 3), (1, 1), (1, 2)]);
    ///
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &1, &2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in key-major order. The iterator element type is `&'a V`.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }
}

impl<K, V> FlatMultimap<K, V>
where
    K: Ord,
{
    /// Inserts a key-value pair into the map, after any values already present for the key.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.entries.partition_point(|x| x.0 <= key);
        self.entries.insert(index, (key, value));
    }

    /// An iterator visiting the values for the given key, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMultimap;
    ///
    /// let map = FlatMultimap::from([("a", 2), ("b", 0), ("a", 1)]);
    ///
    /// assert_eq!(map.get_all("a").collect::<Vec<_>>(), [&2, &1]);
    /// assert_eq!(map.get_all("c").count(), 0);
    /// ```
    pub fn get_all<Q>(&self, key: &Q) -> GetAll<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        GetAll {
            iter: self.entries[self.equal_range(key)].iter(),
        }
    }

    /// Returns the number of values stored for the given key.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.equal_range(key).len()
    }

    /// Returns `true` if the map contains at least a single value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        !self.equal_range(key).is_empty()
    }

    /// Removes every value stored for the key, returning them in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMultimap;
    ///
    /// let mut map = FlatMultimap::from([(1, 1), (1, 2), (2, 3)]);
    ///
    /// assert_eq!(map.remove_all(&1), [1, 2]);
    /// assert!(map.remove_all(&1).is_empty());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_all<Q>(&mut self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let range = self.equal_range(key);
        self.entries.drain(range).map(|(_, value)| value).collect()
    }

    fn equal_range<Q>(&self, key: &Q) -> Range<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let start = self.entries.partition_point(|x| key.cmp(x.0.borrow()).is_gt());
        let len = self.entries[start..].partition_point(|x| key.cmp(x.0.borrow()).is_ge());
        start..start + len
    }
}

impl<K, V> FlatMultimap<K, V>
where
    V: Ord + Clone,
{
    /// Returns the set of all values in the map, with duplicates collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMultimap;
    ///
    /// let map = FlatMultimap::from([("1", 1), ("1", 2), ("2", 2)]);
    /// let set = map.project_values();
    ///
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &2]);
    /// ```
    pub fn project_values(&self) -> ValueSet<V> {
        let set: ValueSet<V> = self.values().cloned().collect();
        log::trace!("projected {} entries onto {} values", self.len(), set.len());
        set
    }
}

impl<K, V> FlatMultimap<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Returns a new map with the entries whose value satisfies the predicate.
    /// The relative order of the kept entries is preserved and the map itself is left unchanged.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        let entries: Vec<(K, V)> = self
            .entries
            .iter()
            .filter(|(_, value)| predicate(value))
            .cloned()
            .collect();
        log::trace!("filter kept {} of {} entries", entries.len(), self.len());

        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for FlatMultimap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(K, V)> = iter.into_iter().collect();
        // Stable, so equal keys keep their input order as if inserted one by one.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }
}

impl<K, V> Extend<(K, V)> for FlatMultimap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
}

impl<'a, K, V> Extend<(&'a K, &'a V)> for FlatMultimap<K, V>
where
    K: Ord + Copy,
    V: Copy,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FlatMultimap<K, V>
where
    K: Ord,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a FlatMultimap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for FlatMultimap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            iter: self.entries.into_iter(),
        }
    }
}

impl<K, V> Default for FlatMultimap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for FlatMultimap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Display, V: Display> Display for FlatMultimap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_entries(self.iter(), f)
    }
}

/// An iterator over the values stored for a single key of a `FlatMultimap`.
pub struct GetAll<'a, K, V> {
    iter: slice::Iter<'a, (K, V)>,
}

impl<K, V> Clone for GetAll<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for GetAll<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for GetAll<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for GetAll<'_, K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for GetAll<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::FlatMultimap;
    use crate::ValueSet;

    fn fill() -> FlatMultimap<String, i32> {
        let mut map = FlatMultimap::new();
        map.insert("1".to_string(), 1);
        map.insert("1".to_string(), 2);
        map.insert("2".to_string(), 2);
        map.insert("3".to_string(), 3);
        map.insert("31".to_string(), 31);
        map
    }

    #[test]
    fn insert_same_key_keeps_both_values() {
        let mut map = FlatMultimap::new();
        map.insert("k", 1);
        map.insert("k", 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.count("k"), 2);
        assert_eq!(map.get_all("k").collect::<Vec<_>>(), [&1, &2]);
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let mut map = FlatMultimap::new();
        map.insert(2, 'x');
        map.insert(1, 'c');
        map.insert(2, 'a');
        map.insert(1, 'b');
        map.insert(0, 'z');

        assert_eq!(
            map.into_iter().collect::<Vec<_>>(),
            [(0, 'z'), (1, 'c'), (1, 'b'), (2, 'x'), (2, 'a')]
        );
    }

    #[test]
    fn collect_matches_repeated_insert() {
        let input = [(3, 0), (1, 1), (3, 2), (1, 3), (2, 4)];

        let mut inserted = FlatMultimap::new();
        for (key, value) in input {
            inserted.insert(key, value);
        }
        let collected: FlatMultimap<_, _> = input.into_iter().collect();

        assert_eq!(inserted, collected);
    }

    #[test]
    fn project_values_collapses_duplicates() {
        let map = fill();

        assert_eq!(map.project_values(), ValueSet::from([1, 2, 3, 31]));
        assert_eq!(
            FlatMultimap::from([("1", 1), ("1", 2), ("2", 2)]).project_values(),
            ValueSet::from([1, 2])
        );
    }

    #[test]
    fn filter_is_stable() {
        let map = FlatMultimap::from([("a", 5), ("a", 1), ("a", 4), ("b", 2), ("b", 9)]);
        let filtered = map.filter(|v| v % 2 == 0 || *v == 5);

        assert_eq!(
            filtered.iter().collect::<Vec<_>>(),
            [(&"a", &5), (&"a", &4), (&"b", &2)]
        );
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn filter_threshold() {
        let filtered = fill().filter(|v| *v <= 30);

        assert_eq!(filtered.len(), 4);
        assert!(!filtered.contains_key("31"));
        assert!(filtered.contains_key("1"));
    }

    #[test]
    fn lookups_on_missing_key() {
        let mut map = fill();

        assert_eq!(map.count("4"), 0);
        assert!(!map.contains_key("0"));
        assert!(map.remove_all("4").is_empty());
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn extend_merges_in_key_order() {
        let mut map = FlatMultimap::from([(1, 10), (3, 30)]);
        map.extend([(2, 20), (1, 11)]);
        map.extend(&FlatMultimap::from([(0, 0)]));

        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            [(0, 0), (1, 10), (1, 11), (2, 20), (3, 30)]
        );
    }

    #[test]
    fn display_repeats_keys() {
        let map = FlatMultimap::from([("a", 1), ("a", 2)]);

        assert_eq!(map.to_string(), "Key: a, Value: 1\nKey: a, Value: 2\n");
    }
}
