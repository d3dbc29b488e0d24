//! Ordered map and multimap implementations using a flattened sorted vector.
//!
//! ---
//!
//! [`FlatMap`] and [`FlatMultimap`] store their entries as one vector of pairs
//! kept sorted by key:
//!  - `a -> 1`
//!  - `a -> 2`
//!  - `b -> 3`
//!
//! as opposed to a search tree, or a map from keys to a collection of values:
//!  - `a -> 1, 2`
//!  - `b -> 3`
//!
//! Iteration is therefore key-major, and values sharing a key in a
//! [`FlatMultimap`] come out in the order they were inserted.
//!
//! ---
//!
//! Both collections offer the same three transformations, differing only in
//! how they treat a key that is already present:
//!  - `insert`: [`FlatMap`] rejects the key with a [`DuplicateKeyError`],
//!    [`FlatMultimap`] stores one more value for it.
//!  - `project_values`: the deduplicated [`ValueSet`] of all stored values.
//!  - `filter`: a new collection with the entries whose value matches a predicate.
//!
//! ```
//! use sorted_flat_map::{FlatMap, FlatMultimap, ValueSet};
//!
//! let map = FlatMap::try_from_iter([("1", 1), ("2", 2), ("3", 3), ("31", 31)])?;
//! assert_eq!(map.filter(|v| *v <= 30).len(), 3);
//!
//! let multimap = FlatMultimap::from([("1", 1), ("1", 2), ("2", 2)]);
//! assert_eq!(multimap.project_values(), ValueSet::from([1, 2]));
//! # Ok::<(), sorted_flat_map::DuplicateKeyError<&str, i32>>(())
//! ```

/// Map implementation where every key has at most one value.
pub mod map;

/// Multimap implementation where entries are stored as a flattened sorted vector.
pub mod multimap;

/// Ordered, deduplicated value set.
pub mod set;

mod error;

#[cfg(feature = "rayon")]
mod rayon;

#[cfg(feature = "serde")]
mod serde;

pub use error::DuplicateKeyError;
pub use map::FlatMap;
pub use multimap::FlatMultimap;
pub use set::ValueSet;
