use super::FlatEntry;
use crate::error::ResolveError;
use crate::identity::Identity;

/// Returns true if the entry is an element identity.
///
/// Literals (null, numbers, booleans, strings such as unresolved names) are
/// never valid.
pub fn validate(entry: &FlatEntry) -> bool {
	entry.as_element().is_some()
}

/// Converts flattened entries into identities, failing on the first invalid one.
///
/// Nothing is returned on failure, so callers never see a partial sequence.
pub(crate) fn validated_elements(entries: Vec<FlatEntry>, declaration: &Identity) -> Result<Vec<Identity>, ResolveError> {
	if let Some(bad) = entries.iter().find(|entry| !validate(entry)) {
		return Err(ResolveError::InvalidDeclarationEntry {
			value: bad.to_string(),
			declaration: declaration.to_string(),
		});
	}
	Ok(entries
		.into_iter()
		.filter_map(|entry| match entry {
			FlatEntry::Element(id) => Some(id),
			FlatEntry::Literal(_) => None,
		})
		.collect())
}
