use crate::{FlatMap, ValueSet};
use rayon::iter::plumbing::UnindexedConsumer;
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::{slice, vec};

/// Parallel iterator over shared references to entries in a map.
pub struct ParIter<'a, K, V> {
    pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<K: Sync, V: Sync> Clone for ParIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner
            .map(|(key, value)| (key, value))
            .drive_unindexed(consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        self.inner.opt_len()
    }
}

/// Parallel iterator over shared references to keys in a map.
pub struct ParKeys<'a, K, V> {
    pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParKeys<'a, K, V> {
    type Item = &'a K;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(|(key, _)| key).drive_unindexed(consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        self.inner.opt_len()
    }
}

/// Parallel iterator over shared references to values in a map.
pub struct ParValues<'a, K, V> {
    pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParValues<'a, K, V> {
    type Item = &'a V;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(|(_, value)| value).drive_unindexed(consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        self.inner.opt_len()
    }
}

/// Parallel iterator over entries of a consumed map.
pub struct IntoParIter<K, V> {
    pub(crate) inner: vec::IntoIter<(K, V)>,
}

impl<K: Send, V: Send> ParallelIterator for IntoParIter<K, V> {
    type Item = (K, V);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.drive_unindexed(consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        self.inner.opt_len()
    }
}

impl<K: Sync, V: Sync> FlatMap<K, V> {
    /// Visits (potentially in parallel) immutably borrowed keys.
    pub fn par_keys(&self) -> ParKeys<'_, K, V> {
        ParKeys {
            inner: self.entries.par_iter(),
        }
    }

    /// Visits (potentially in parallel) immutably borrowed values.
    pub fn par_values(&self) -> ParValues<'_, K, V> {
        ParValues {
            inner: self.entries.par_iter(),
        }
    }
}

impl<K, V> FlatMap<K, V>
where
    K: Sync,
    V: Ord + Clone + Send + Sync,
{
    /// Parallel version of [`FlatMap::project_values`].
    pub fn par_project_values(&self) -> ValueSet<V> {
        self.par_values().cloned().collect()
    }
}

impl<K, V> FlatMap<K, V>
where
    K: Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Parallel version of [`FlatMap::filter`]. The result is identical, entries stay in key order.
    pub fn par_filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V) -> bool + Sync + Send,
    {
        let entries: Vec<(K, V)> = self
            .entries
            .par_iter()
            .filter(|(_, value)| predicate(value))
            .cloned()
            .collect();

        Self { entries }
    }
}

impl<K: Send, V: Send> IntoParallelIterator for FlatMap<K, V> {
    type Item = (K, V);
    type Iter = IntoParIter<K, V>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.entries.into_par_iter(),
        }
    }
}

impl<'a, K: Sync, V: Sync> IntoParallelIterator for &'a FlatMap<K, V> {
    type Item = (&'a K, &'a V);
    type Iter = ParIter<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.entries.par_iter(),
        }
    }
}
