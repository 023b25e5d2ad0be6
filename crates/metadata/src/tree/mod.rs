//! Declaration trees and the passes that turn them into element identities.
//!
//! # Mental Model
//!
//! A declaration tree is what an element lists as the other elements it uses:
//! an ordered sequence whose members are identities, nested sequences, forward
//! references, or stray literal values. Resolving a tree runs three passes:
//!
//! 1. [`flatten`]: depth-first, left-to-right walk that resolves forward
//!    references before classifying each member, producing [`FlatEntry`] values.
//! 2. [`validate`]: rejects flattened values that are not element identities.
//! 3. [`dedupe`]: keeps one copy of each identity.
//!
//! # Invariants
//!
//! - Forward references are resolved before a member is classified as a
//!   sequence or a leaf.
//!   - Enforced in: [`flatten`] via [`resolve_forward_ref`].
//!   - Failure symptom: a deferred sequence is reported as an invalid entry.
//! - Flattening never drops or merges duplicates; only [`dedupe`] does.

use std::fmt;
use std::sync::Arc;

use crate::identity::Identity;

mod dedupe;
mod flatten;
mod forward;
mod validate;

pub use dedupe::dedupe;
pub use flatten::flatten;
pub use forward::{Resolved, resolve_forward_ref};
pub(crate) use validate::validated_elements;
pub use validate::validate;

/// A stray non-element value found in a declaration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	/// An absent value.
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string, including names that did not resolve to an element.
	String(String),
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::Number(v) => write!(f, "{v}"),
			Self::String(v) => f.write_str(v),
		}
	}
}

/// A deferred declaration, evaluated when the tree is flattened.
///
/// Lets a tree mention an element (or a whole sequence) before it exists.
#[derive(Clone)]
pub struct ForwardRef(Arc<dyn Fn() -> DeclarationEntry + Send + Sync>);

impl ForwardRef {
	/// Wraps a thunk producing the referenced entry.
	pub fn new(thunk: impl Fn() -> DeclarationEntry + Send + Sync + 'static) -> Self {
		Self(Arc::new(thunk))
	}

	/// Evaluates the thunk once.
	pub fn get(&self) -> DeclarationEntry {
		(self.0)()
	}
}

impl fmt::Debug for ForwardRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ForwardRef(..)")
	}
}

/// One member of a declaration tree.
#[derive(Debug, Clone)]
pub enum DeclarationEntry {
	/// A concrete element.
	Element(Identity),
	/// A nested sequence.
	List(Arc<[DeclarationEntry]>),
	/// A deferred reference to an element or a sequence.
	Forward(ForwardRef),
	/// Anything else; never valid after flattening.
	Literal(Literal),
}

impl DeclarationEntry {
	/// Builds a nested sequence.
	pub fn list(items: impl IntoIterator<Item = DeclarationEntry>) -> Self {
		Self::List(items.into_iter().collect())
	}
}

/// Builds a forward reference entry from a thunk.
pub fn forward_ref(thunk: impl Fn() -> DeclarationEntry + Send + Sync + 'static) -> DeclarationEntry {
	DeclarationEntry::Forward(ForwardRef::new(thunk))
}

impl From<Identity> for DeclarationEntry {
	fn from(id: Identity) -> Self {
		Self::Element(id)
	}
}

impl From<&Identity> for DeclarationEntry {
	fn from(id: &Identity) -> Self {
		Self::Element(id.clone())
	}
}

impl From<Vec<DeclarationEntry>> for DeclarationEntry {
	fn from(items: Vec<DeclarationEntry>) -> Self {
		Self::List(items.into())
	}
}

impl From<Literal> for DeclarationEntry {
	fn from(lit: Literal) -> Self {
		Self::Literal(lit)
	}
}

impl fmt::Display for DeclarationEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(id) => write!(f, "{id}"),
			Self::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Self::Forward(_) => f.write_str("forward_ref(..)"),
			Self::Literal(lit) => write!(f, "{lit}"),
		}
	}
}

/// A leaf produced by [`flatten`].
#[derive(Debug, Clone, PartialEq)]
pub enum FlatEntry {
	/// An element identity.
	Element(Identity),
	/// A stray value; fails [`validate`].
	Literal(Literal),
}

impl FlatEntry {
	/// Returns the identity if this entry names an element.
	pub fn as_element(&self) -> Option<&Identity> {
		match self {
			Self::Element(id) => Some(id),
			Self::Literal(_) => None,
		}
	}
}

impl fmt::Display for FlatEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(id) => write!(f, "{id}"),
			Self::Literal(lit) => write!(f, "{lit}"),
		}
	}
}

/// Limits that keep self-referential trees from recursing forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
	/// Maximum number of forward references followed in one chain.
	pub max_forward_depth: usize,
	/// Maximum number of nested sequence levels below the roots.
	pub max_nesting_depth: usize,
}

impl Default for TreeLimits {
	fn default() -> Self {
		Self {
			max_forward_depth: 32,
			max_nesting_depth: 64,
		}
	}
}
