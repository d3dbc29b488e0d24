#[cfg(feature = "rayon")]
pub use crate::rayon::map as rayon;

use crate::{DuplicateKeyError, ValueSet};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;
use std::slice;
use std::vec;

/// Map implementation where entries are stored as a flattened vector sorted by key.
///
/// Every key is associated with at most one value. Inserting a key that is
/// already present fails with a [`DuplicateKeyError`] instead of replacing the value.
///
/// # Examples
///
/// ```
/// use sorted_flat_map::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert("2", 2).unwrap();
/// map.insert("1", 1).unwrap();
///
/// assert!(map.insert("1", 3).is_err());
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.keys().collect::<Vec<_>>(), [&"1", &"2"]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FlatMap<K, V> {
    pub(crate) entries: Vec<(K, V)>,
}

impl<K, V> FlatMap<K, V> {
    /// Creates an empty `FlatMap` with a capacity of 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty `FlatMap` with at least the specified capacity.
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

    /// An iterator visiting all key-value pairs in key order. The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            iter: self.entries.iter(),
        }
    }

    /// An iterator visiting all keys in ascending order. The iterator element type is `&'a K`.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in key order. The iterator element type is `&'a V`.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }
}

impl<K, V> FlatMap<K, V>
where
    K: Ord,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the map is left unchanged and the
    /// key and value are returned inside the error.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKeyError<K, V>> {
        match self.entries.binary_search_by(|x| x.0.cmp(&key)) {
            Ok(_) => {
                log::debug!("rejected insert of a key that is already present");
                Err(DuplicateKeyError { key, value })
            }
            Err(index) => {
                self.entries.insert(index, (key, value));
                Ok(())
            }
        }
    }

    /// Builds a map from an iterator of pairs, failing on the first repeated key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMap;
    ///
    /// let map = FlatMap::try_from_iter([("b", 2), ("a", 1)]).unwrap();
    /// assert_eq!(map.get("a"), Some(&1));
    ///
    /// let err = FlatMap::try_from_iter([("a", 1), ("a", 2)]).unwrap_err();
    /// assert_eq!(err.into_inner(), ("a", 2));
    /// ```
    pub fn try_from_iter<I>(iter: I) -> Result<Self, DuplicateKeyError<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);

        for (key, value) in iter {
            map.insert(key, value)?;
        }

        Ok(map)
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).ok().map(|index| &self.entries[index].1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_ok()
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the map.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.search(key).ok()?;
        Some(self.entries.remove(index).1)
    }

    fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.entries.binary_search_by(|x| key.cmp(x.0.borrow()).reverse())
    }
}

impl<K, V> FlatMap<K, V>
where
    V: Ord + Clone,
{
    /// Returns the set of all values in the map. Values stored under different keys are collapsed into one entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMap;
    ///
    /// let map = FlatMap::try_from_iter([("a", 1), ("b", 2), ("c", 1)]).unwrap();
    /// let set = map.project_values();
    ///
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &2]);
    /// ```
    pub fn project_values(&self) -> ValueSet<V> {
        let set: ValueSet<V> = self.values().cloned().collect();
        log::trace!("projected {} entries onto {} values", self.len(), set.len());
        set
    }
}

impl<K, V> FlatMap<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Returns a new map with the entries whose value satisfies the predicate, in key order.
    /// The map itself is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::FlatMap;
    ///
    /// let map = FlatMap::try_from_iter([("1", 1), ("2", 2), ("3", 3), ("31", 31)]).unwrap();
    /// let filtered = map.filter(|v| *v <= 30);
    ///
    /// assert_eq!(filtered.len(), 3);
    /// assert!(!filtered.contains_key("31"));
    /// assert_eq!(map.len(), 4);
    /// ```
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

        // A subsequence of a sorted, duplicate-free vector stays that way.
        Self { entries }
    }
}

impl<'a, K, V> IntoIterator for &'a FlatMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for FlatMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            iter: self.entries.into_iter(),
        }
    }
}

impl<K, V> Default for FlatMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for FlatMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Display, V: Display> Display for FlatMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_entries(self.iter(), f)
    }
}

pub(crate) fn fmt_entries<'a, K, V, I>(entries: I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    K: Display + 'a,
    V: Display + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    for (key, value) in entries {
        writeln!(f, "Key: {key}, Value: {value}")?;
    }
    Ok(())
}

/// An iterator over the entries of a `FlatMap` or a `FlatMultimap`.
pub struct Iter<'a, K, V> {
    pub(crate) iter: slice::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.iter.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of a `FlatMap` or a `FlatMultimap`.
pub struct Keys<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `FlatMap` or a `FlatMultimap`.
pub struct Values<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An owning iterator over the entries of a `FlatMap` or a `FlatMultimap`.
pub struct IntoIter<K, V> {
    pub(crate) iter: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.iter.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: Debug, V: Debug> Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::FlatMap;
    use crate::{DuplicateKeyError, ValueSet};

    fn fill() -> FlatMap<String, i32> {
        let mut map = FlatMap::new();
        map.insert("1".to_string(), 1).unwrap();
        map.insert("2".to_string(), 2).unwrap();
        map.insert("3".to_string(), 3).unwrap();
        map.insert("31".to_string(), 31).unwrap();
        map
    }

    #[test]
    fn insert_disjoint_keys() {
        let map = fill();

        assert_eq!(map.len(), 4);
        assert_eq!(map.get("1"), Some(&1));
        assert_eq!(map.get("2"), Some(&2));
        assert_eq!(map.get("3"), Some(&3));
        assert_eq!(map.get("31"), Some(&31));
        assert_eq!(map.get("4"), None);
    }

    #[test]
    fn insert_duplicate_leaves_map_unchanged() {
        let mut map = fill();
        let before = map.clone();

        let err = map.insert("2".to_string(), 20).unwrap_err();

        assert_eq!(
            err,
            DuplicateKeyError {
                key: "2".to_string(),
                value: 20
            }
        );
        assert_eq!(err.to_string(), r#"key "2" is already present"#);
        assert_eq!(map, before);
    }

    #[test]
    fn iteration_is_ordered_by_key() {
        let mut map = FlatMap::new();
        for key in [5, 3, 9, 1] {
            map.insert(key, key * 10).unwrap();
        }

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 9]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [10, 30, 50, 90]);
    }

    #[test]
    fn project_values_collapses_duplicates() {
        let map = FlatMap::try_from_iter([("a", 7), ("b", 7), ("c", 1)]).unwrap();

        assert_eq!(map.project_values(), ValueSet::from([1, 7]));
        assert!(FlatMap::<&str, i32>::new().project_values().is_empty());
    }

    #[test]
    fn filter_keeps_matching_entries() {
        let map = fill();
        let filtered = map.filter(|v| *v <= 30);

        assert_eq!(
            filtered.into_iter().collect::<Vec<_>>(),
            [
                ("1".to_string(), 1),
                ("2".to_string(), 2),
                ("3".to_string(), 3)
            ]
        );
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn filter_rejecting_everything_is_empty() {
        let map = fill();

        assert!(map.filter(|_| false).is_empty());
        assert_eq!(map.filter(|_| true), map);
    }

    #[test]
    fn remove_then_reinsert() {
        let mut map = fill();

        assert_eq!(map.remove("3"), Some(3));
        assert_eq!(map.remove("3"), None);
        assert!(map.insert("3".to_string(), 33).is_ok());
        assert_eq!(map.get("3"), Some(&33));
    }

    #[test]
    fn display_lists_entries() {
        let map = FlatMap::try_from_iter([("b", 2), ("a", 1)]).unwrap();

        assert_eq!(map.to_string(), "Key: a, Value: 1\nKey: b, Value: 2\n");
        assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 2}"#);
    }
}
