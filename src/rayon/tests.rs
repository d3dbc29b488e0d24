use crate::{FlatMap, FlatMultimap, ValueSet};
use rayon::iter::{IntoParallelIterator, ParallelExtend, ParallelIterator};

fn sample_map() -> FlatMap<u32, u32> {
    FlatMap::try_from_iter((0..1000).map(|k| (k, k % 17))).unwrap()
}

fn sample_multimap() -> FlatMultimap<u32, u32> {
    (0..1000).map(|i| (i % 10, i)).collect()
}

#[test]
fn par_project_values_matches_sequential() {
    let map = sample_map();
    let multimap = sample_multimap();

    assert_eq!(map.par_project_values(), map.project_values());
    assert_eq!(map.par_project_values().len(), 17);
    assert_eq!(multimap.par_project_values(), multimap.project_values());
}

#[test]
fn par_filter_matches_sequential() {
    let map = sample_map();
    let multimap = sample_multimap();

    assert_eq!(map.par_filter(|v| *v < 5), map.filter(|v| *v < 5));
    assert_eq!(
        multimap.par_filter(|v| v % 3 == 0),
        multimap.filter(|v| v % 3 == 0)
    );
}

#[test]
fn from_par_iter_keeps_input_order_for_equal_keys() {
    let parallel: FlatMultimap<u32, u32> = (0..1000u32)
        .into_par_iter()
        .map(|i| (i % 10, i))
        .collect();

    assert_eq!(parallel, sample_multimap());
    assert_eq!(
        parallel.get_all(&3).take(3).collect::<Vec<_>>(),
        [&3, &13, &23]
    );
}

#[test]
fn par_iter_visits_every_entry() {
    let map = sample_map();
    let multimap = sample_multimap();

    assert_eq!(map.par_keys().count(), 1000);
    assert_eq!(
        (&map).into_par_iter().map(|(_, v)| u64::from(*v)).sum::<u64>(),
        map.values().map(|v| u64::from(*v)).sum::<u64>()
    );
    assert_eq!(multimap.par_keys().filter(|k| **k == 0).count(), 100);
    assert_eq!(multimap.into_par_iter().count(), 1000);
}

#[test]
fn value_set_par_collect_and_extend() {
    let mut set: ValueSet<u32> = (0..100u32).into_par_iter().map(|i| i % 7).collect();
    assert_eq!(set, (0..7).collect::<ValueSet<_>>());

    set.par_extend(vec![3, 50, 50]);
    assert_eq!(set.len(), 8);
    assert!(set.contains(&50));
    assert_eq!((&set).into_par_iter().count(), 8);
}
