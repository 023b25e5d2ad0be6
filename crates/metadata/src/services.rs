//! Collaborator interfaces the resolver calls through.
//!
//! Implementations are injected into [`crate::MetadataResolver`] as trait
//! objects. Every call is synchronous from the resolver's point of view and
//! must be deterministic for a given identity.

use std::sync::Arc;

use crate::error::DependencyError;
use crate::hooks::LifecycleHook;
use crate::identity::Identity;
use crate::raw::{RawDeclarationMetadata, ViewMetadata};
use crate::tree::DeclarationEntry;

/// Holds the raw declarative metadata attached to each identity.
pub trait AnnotationStore: Send + Sync {
	/// Returns the metadata for `identity`, or `None` if it has none.
	fn raw_metadata(&self, identity: &Identity) -> Result<Option<RawDeclarationMetadata>, DependencyError>;
}

/// Supplies view metadata for composite elements.
pub trait ViewResolver: Send + Sync {
	/// Returns the view metadata declared by `identity`.
	fn view_metadata(&self, identity: &Identity) -> Result<ViewMetadata, DependencyError>;
}

/// Answers capability questions about an identity.
pub trait Introspector: Send + Sync {
	/// Returns true if `identity` implements `hook`.
	fn implements_hook(&self, identity: &Identity, hook: LifecycleHook) -> Result<bool, DependencyError>;

	/// Derives the locator of the module defining `identity`.
	fn import_locator(&self, identity: &Identity) -> Result<String, DependencyError>;
}

/// Holds the declaration tree of each element.
pub trait DeclarationTreeStore: Send + Sync {
	/// Returns the declaration tree of `identity`.
	fn declaration_tree(&self, identity: &Identity) -> Result<Vec<DeclarationEntry>, DependencyError>;
}

/// The collaborator set a resolver is built from.
#[derive(Clone)]
pub struct Services {
	/// Source of raw declarative metadata.
	pub annotations: Arc<dyn AnnotationStore>,
	/// Source of view metadata for composite elements.
	pub views: Arc<dyn ViewResolver>,
	/// Hook probes and import locators.
	pub introspector: Arc<dyn Introspector>,
	/// Source of declaration trees.
	pub trees: Arc<dyn DeclarationTreeStore>,
}

impl Services {
	/// Uses one value for every collaborator role.
	pub fn from_shared<S>(shared: Arc<S>) -> Self
	where
		S: AnnotationStore + ViewResolver + Introspector + DeclarationTreeStore + 'static,
	{
		Self {
			annotations: shared.clone(),
			views: shared.clone(),
			introspector: shared.clone(),
			trees: shared,
		}
	}
}
