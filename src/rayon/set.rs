use crate::ValueSet;
use rayon::iter::plumbing::UnindexedConsumer;
use rayon::iter::{
    FromParallelIterator, IntoParallelIterator, IntoParallelRefIterator, ParallelExtend,
    ParallelIterator,
};
use rayon::slice::ParallelSliceMut;
use rayon::{slice, vec};

/// Parallel iterator over elements of a consumed set.
pub struct IntoParIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T: Send> ParallelIterator for IntoParIter<T> {
    type Item = T;

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

/// Parallel iterator over shared references to elements in a set.
pub struct ParIter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T: Sync> ParallelIterator for ParIter<'a, T> {
    type Item = &'a T;

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

impl<T: Send> IntoParallelIterator for ValueSet<T> {
    type Item = T;
    type Iter = IntoParIter<T>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.items.into_par_iter(),
        }
    }
}

impl<'a, T: Sync> IntoParallelIterator for &'a ValueSet<T> {
    type Item = &'a T;
    type Iter = ParIter<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.items.par_iter(),
        }
    }
}

impl<T> FromParallelIterator<T> for ValueSet<T>
where
    T: Ord + Send,
{
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = T>,
    {
        let mut items: Vec<T> = par_iter.into_par_iter().collect();
        items.par_sort_unstable();
        items.dedup();
        ValueSet::from_sorted_vec(items)
    }
}

impl<T> ParallelExtend<T> for ValueSet<T>
where
    T: Ord + Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        let list: Vec<T> = par_iter.into_par_iter().collect();
        self.extend(list);
    }
}

impl<'a, T> ParallelExtend<&'a T> for ValueSet<T>
where
    T: Copy + Ord + Send + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = &'a T>,
    {
        self.par_extend(par_iter.into_par_iter().copied());
    }
}
