#[cfg(feature = "rayon")]
pub use crate::rayon::set as rayon;

use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;
use std::slice;
use std::vec;

/// Ordered set of values, stored as a flattened sorted vector without duplicates.
///
/// This is the type returned by the `project_values` operation of
/// [`FlatMap`](crate::FlatMap) and [`FlatMultimap`](crate::FlatMultimap).
///
/// # Examples
///
/// ```
/// use sorted_flat_map::ValueSet;
///
/// let mut set = ValueSet::new();
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &2]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ValueSet<T> {
    pub(crate) items: Vec<T>,
}

impl<T> ValueSet<T> {
    /// Creates an empty `ValueSet` with a capacity of 0,
    /// so it will not allocate until it is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::ValueSet;
    ///
    /// let set: ValueSet<i32> = ValueSet::new();
    ///
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty `ValueSet` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Builds a set from a vector that is already sorted and free of duplicates.
    #[cfg(feature = "rayon")]
    pub(crate) fn from_sorted_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Returns the number of elements the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears the set, removing all values.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the smallest element, if any.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the largest element, if any.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// An iterator visiting all elements in ascending order. The iterator element type is `&'a T`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            iter: self.items.iter(),
        }
    }

    /// Returns the elements as an ascending slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Ord> ValueSet<T> {
    /// Adds a value to the set. Returns whether the value was newly inserted.
    pub fn insert(&mut self, value: T) -> bool {
        match self.items.binary_search(&value) {
            Ok(_) => false,
            Err(index) => {
                self.items.insert(index, value);
                true
            }
        }
    }

    /// Removes a value from the set. Returns whether the value was present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_flat_map::ValueSet;
    ///
    /// let mut set = ValueSet::from([1, 2]);
    ///
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.search(value) {
            Ok(index) => {
                self.items.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if the set contains the value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(value).is_ok()
    }

    fn search<Q>(&self, value: &Q) -> Result<usize, usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.items.binary_search_by(|x| value.cmp(x.borrow()).reverse())
    }
}

impl<T: Ord> FromIterator<T> for ValueSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<T> = iter.into_iter().collect();
        items.sort();
        items.dedup();
        Self { items }
    }
}

impl<T: Ord> Extend<T> for ValueSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
        self.items.sort();
        self.items.dedup();
    }
}

impl<'a, T> Extend<&'a T> for ValueSet<T>
where
    T: 'a + Ord + Copy,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a ValueSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for ValueSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            iter: self.items.into_iter(),
        }
    }
}

impl<T> Default for ValueSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for ValueSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Display> Display for ValueSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for ValueSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

/// An iterator over the items of a `ValueSet`.
pub struct Iter<'a, T> {
    iter: slice::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the items of a `ValueSet`.
pub struct IntoIter<T> {
    iter: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ValueSet;

    #[test]
    fn collect_sorts_and_dedups() {
        let set: ValueSet<_> = vec![3, 1, 2, 3, 1].into_iter().collect();

        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn extend_keeps_set_semantics() {
        let mut set = ValueSet::from([5, 1]);
        set.extend([1, 3, 5, 7]);
        set.extend(&[0]);

        assert_eq!(set.as_slice(), &[0, 1, 3, 5, 7]);
        assert_eq!(set.first(), Some(&0));
        assert_eq!(set.last(), Some(&7));
    }

    #[test]
    fn contains_with_borrowed_form() {
        let set = ValueSet::from([String::from("a"), String::from("b")]);

        assert!(set.contains("a"));
        assert!(!set.contains("c"));
    }

    #[test]
    fn display_is_space_separated() {
        let set = ValueSet::from([31, 3, 1, 2]);

        assert_eq!(set.to_string(), "1 2 3 31");
        assert_eq!(ValueSet::<i32>::new().to_string(), "");
        assert_eq!(format!("{set:?}"), "{1, 2, 3, 31}");
    }

    #[test]
    fn into_iter_is_ascending() {
        let set = ValueSet::from([2, 9, 4]);

        assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [9, 4, 2]);
    }
}
