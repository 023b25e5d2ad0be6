use super::{DeclarationEntry, FlatEntry, Resolved, TreeLimits, resolve_forward_ref};
use crate::error::DependencyError;

/// Flattens `extra` followed by `roots` into one ordered sequence of leaves.
///
/// The walk is depth-first and left-to-right. Each member is passed through
/// [`resolve_forward_ref`] before it is classified, so a forward reference may
/// stand for a whole nested sequence. Duplicates are kept.
pub fn flatten(
	roots: &[DeclarationEntry],
	extra: Option<&[DeclarationEntry]>,
	limits: TreeLimits,
) -> Result<Vec<FlatEntry>, DependencyError> {
	let mut out = Vec::new();
	if let Some(extra) = extra {
		flatten_into(extra, &mut out, 0, limits)?;
	}
	flatten_into(roots, &mut out, 0, limits)?;
	Ok(out)
}

fn flatten_into(
	tree: &[DeclarationEntry],
	out: &mut Vec<FlatEntry>,
	depth: usize,
	limits: TreeLimits,
) -> Result<(), DependencyError> {
	for entry in tree {
		match resolve_forward_ref(entry, limits.max_forward_depth)? {
			Resolved::List(items) => {
				if depth == limits.max_nesting_depth {
					return Err(DependencyError::NestingTooDeep {
						depth: limits.max_nesting_depth,
					});
				}
				flatten_into(&items, out, depth + 1, limits)?;
			}
			Resolved::Element(id) => out.push(FlatEntry::Element(id)),
			Resolved::Literal(lit) => out.push(FlatEntry::Literal(lit)),
		}
	}
	Ok(())
}
