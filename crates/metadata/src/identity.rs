//! Opaque element identities.
//!
//! An [`Identity`] names one declarative element. Two identities are equal only
//! if they were produced by the same [`Identity::new`] call (or clones of it);
//! elements that happen to share a display name stay distinct.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

struct IdentityInner {
	name: Box<str>,
}

/// Handle naming a declarative element.
///
/// Cheap to clone. Equality and hashing use the allocation address, so an
/// identity is a valid cache key regardless of what its display name says.
#[derive(Clone)]
pub struct Identity(Arc<IdentityInner>);

impl Identity {
	/// Creates a fresh identity with the given display name.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self(Arc::new(IdentityInner { name: name.into() }))
	}

	/// Returns the display name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	fn addr(&self) -> usize {
		Arc::as_ptr(&self.0) as usize
	}
}

impl PartialEq for Identity {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for Identity {}

impl Hash for Identity {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.addr().hash(state);
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl fmt::Debug for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Identity").field(&self.name()).finish()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn same_name_is_not_same_identity() {
		let a = Identity::new("Hero");
		let b = Identity::new("Hero");
		assert_ne!(a, b);
		assert_eq!(a, a.clone());

		let set: HashSet<_> = [a.clone(), b, a].into_iter().collect();
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn display_uses_name() {
		let id = Identity::new("AppComponent");
		assert_eq!(id.to_string(), "AppComponent");
		assert_eq!(format!("{id:?}"), "Identity(\"AppComponent\")");
	}
}
