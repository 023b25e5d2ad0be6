use std::sync::Arc;

use super::{DeclarationEntry, Literal};
use crate::error::DependencyError;
use crate::identity::Identity;

/// A declaration entry with every forward reference evaluated away.
#[derive(Debug, Clone)]
pub enum Resolved {
	/// A concrete element.
	Element(Identity),
	/// A nested sequence; its members may still hold forward references.
	List(Arc<[DeclarationEntry]>),
	/// A stray value.
	Literal(Literal),
}

/// Follows forward references until a concrete entry is reached.
///
/// Idempotent: a concrete entry comes back unchanged. A chain longer than
/// `max_depth` is treated as a cycle.
pub fn resolve_forward_ref(entry: &DeclarationEntry, max_depth: usize) -> Result<Resolved, DependencyError> {
	let mut current = entry.clone();
	let mut steps = 0;
	loop {
		match current {
			DeclarationEntry::Element(id) => return Ok(Resolved::Element(id)),
			DeclarationEntry::List(items) => return Ok(Resolved::List(items)),
			DeclarationEntry::Literal(lit) => return Ok(Resolved::Literal(lit)),
			DeclarationEntry::Forward(fwd) => {
				if steps == max_depth {
					return Err(DependencyError::ForwardRefCycle { depth: max_depth });
				}
				steps += 1;
				current = fwd.get();
			}
		}
	}
}
