//! Fast hash map and hash set type aliases.
//!
//! The selection store indexes sections and items by name on every
//! reconciliation. Keys are short strings owned by the process, so the Fx hash
//! from `rustc-hash` is used instead of the DoS-resistant std hasher.
//!
//! # Examples
//!
//! ```
//! use pd_core::{FxHashMap, fx_hash_map_with_capacity};
//!
//! let mut index: FxHashMap<&str, usize> = fx_hash_map_with_capacity(8);
//! index.insert("r/pics", 0);
//! assert_eq!(index.get("r/pics"), Some(&0));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new [`FxHashMap`] able to hold `capacity` entries without
/// reallocating.
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

/// Creates a new [`FxHashSet`] able to hold `capacity` entries without
/// reallocating.
///
/// # Examples
///
/// ```
/// use pd_core::fx_hash_set_with_capacity;
///
/// let set: pd_core::FxHashSet<String> = fx_hash_set_with_capacity(100);
/// assert!(set.capacity() >= 100);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_set_with_capacity<V>(capacity: usize) -> FxHashSet<V> {
    FxHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}
