/// The error returned when inserting a key that a [`FlatMap`](crate::FlatMap) already contains.
///
/// The rejected key and value are handed back unchanged.
///
/// # Examples
///
/// ```
/// use sorted_flat_map::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert("a", 1).unwrap();
///
/// let err = map.insert("a", 2).unwrap_err();
///
/// assert_eq!(err.key, "a");
/// assert_eq!(err.value, 2);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("key {key:?} is already present")]
pub struct DuplicateKeyError<K, V> {
    /// The key that was already present.
    pub key: K,
    /// The value that was not inserted.
    pub value: V,
}

impl<K, V> DuplicateKeyError<K, V> {
    /// Consumes the error, returning the rejected entry.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}
