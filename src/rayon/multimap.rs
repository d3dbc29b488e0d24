use super::map::{IntoParIter, ParIter, ParKeys, ParValues};
use crate::{FlatMultimap, ValueSet};
use rayon::iter::{
    FromParallelIterator, IntoParallelIterator, IntoParallelRefIterator, ParallelExtend,
    ParallelIterator,
};
use rayon::slice::ParallelSliceMut;

impl<K: Sync, V: Sync> FlatMultimap<K, V> {
    /// Visits (potentially in parallel) immutably borrowed keys, once per value.
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

impl<K, V> FlatMultimap<K, V>
where
    K: Sync,
    V: Ord + Clone + Send + Sync,
{
    /// Parallel version of [`FlatMultimap::project_values`].
    pub fn par_project_values(&self) -> ValueSet<V> {
        self.par_values().cloned().collect()
    }
}

impl<K, V> FlatMultimap<K, V>
where
    K: Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Parallel version of [`FlatMultimap::filter`]. The relative order of the kept entries is preserved.
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

impl<K: Send, V: Send> IntoParallelIterator for FlatMultimap<K, V> {
    type Item = (K, V);
    type Iter = IntoParIter<K, V>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.entries.into_par_iter(),
        }
    }
}

impl<'a, K: Sync, V: Sync> IntoParallelIterator for &'a FlatMultimap<K, V> {
    type Item = (&'a K, &'a V);
    type Iter = ParIter<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.entries.par_iter(),
        }
    }
}

impl<K, V> FromParallelIterator<(K, V)> for FlatMultimap<K, V>
where
    K: Ord + Send,
    V: Send,
{
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(K, V)> = par_iter.into_par_iter().collect();
        // Stable, so equal keys keep the order of the source iterator.
        entries.par_sort_by(|a, b| a.0.cmp(&b.0));
        FlatMultimap { entries }
    }
}

impl<K, V> ParallelExtend<(K, V)> for FlatMultimap<K, V>
where
    K: Ord + Send,
    V: Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let list: Vec<(K, V)> = par_iter.into_par_iter().collect();
        self.extend(list);
    }
}

impl<'a, K, V> ParallelExtend<(&'a K, &'a V)> for FlatMultimap<K, V>
where
    K: Copy + Ord + Send + Sync,
    V: Copy + Send + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (&'a K, &'a V)>,
    {
        self.par_extend(par_iter.into_par_iter().map(|(&key, &value)| (key, value)));
    }
}
