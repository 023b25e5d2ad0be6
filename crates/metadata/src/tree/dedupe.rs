use std::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Reduces `items` to its distinct members.
///
/// Callers must not rely on the output order; this implementation happens to
/// keep first occurrences in encounter order.
pub fn dedupe<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> Vec<T> {
	let set: IndexSet<T, FxBuildHasher> = items.into_iter().collect();
	set.into_iter().collect()
}
